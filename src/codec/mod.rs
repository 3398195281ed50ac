//! (2,2) visual cryptography share codec
//!
//! - `patterns`: the 2×2 block patterns and the table pairing them
//! - `encode`: secret → (share A, share B)
//! - `decode`: (share A, share B) → reconstructed image

pub mod decode;
pub mod encode;
pub mod patterns;

pub use decode::{Rendering, decode, decode_with, is_well_formed, stack};
pub use encode::{encode, encode_seeded};
pub use patterns::{BLOCK_SIZE, BlockPattern, PatternTable};
