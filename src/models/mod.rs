pub mod binary_image;
pub mod pixel;
pub mod share;

pub use binary_image::BinaryImage;
pub use pixel::Pixel;
pub use share::{ShareImage, SharePair};
