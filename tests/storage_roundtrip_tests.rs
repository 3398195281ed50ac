//! Integration tests for persisting shares through raster files
//!
//! Shares only reconstruct if they come back bit-exact, so these tests push
//! them through PNG bytes and the filesystem store, and show that JPEG
//! cannot carry them.

use image::{DynamicImage, ImageOutputFormat};
use rust_vcs::codec::decode;
use rust_vcs::tools::{
    QrOptions, ShareStore, decode_share_bytes, encode_png, render_qr, save_binary,
    to_gray_image,
};
use rust_vcs::{Rendering, ShareCodec, VcsError};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_store() -> ShareStore {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX epoch")
        .as_nanos();
    let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    ShareStore::new(std::env::temp_dir().join(format!("rustvcs_it_{nanos}_{sequence}")))
}

fn qr_options() -> QrOptions {
    QrOptions {
        module_px: 3,
        ..QrOptions::default()
    }
}

#[test]
fn test_png_transport_roundtrip() {
    let secret = render_qr("https://example.edu/students/17", &qr_options()).unwrap();
    let pair = ShareCodec::new().split(&secret).unwrap();

    let first = decode_share_bytes(&encode_png(pair.first.as_image()).unwrap()).unwrap();
    let second = decode_share_bytes(&encode_png(pair.second.as_image()).unwrap()).unwrap();
    assert_eq!(first, pair.first);
    assert_eq!(second, pair.second);
    assert_eq!(decode(&first, &second).unwrap(), secret);
}

#[test]
fn test_store_enroll_reveal() {
    let store = temp_store();
    let codec = ShareCodec::new();
    let opts = qr_options();

    store.enroll("1042", "Grace Hopper", &opts, &codec).unwrap();
    let (first, second) = store.share_paths("1042").unwrap();
    assert!(first.is_file() && second.is_file());

    let secret = render_qr("Grace Hopper", &opts).unwrap();
    assert_eq!(
        store.reconstruct("1042", Rendering::HighContrast).unwrap(),
        secret
    );

    let pair = store.load("1042").unwrap();
    assert!(codec.is_well_formed(&pair.first));
    assert!(codec.is_well_formed(&pair.second));

    let _ = std::fs::remove_dir_all(store.root());
}

#[test]
fn test_shares_from_different_enrollments_do_not_reveal() {
    let store = temp_store();
    let codec = ShareCodec::new();
    let opts = qr_options();
    store.enroll("a", "same payload", &opts, &codec).unwrap();
    store.enroll("b", "same payload", &opts, &codec).unwrap();

    let a = store.load("a").unwrap();
    let b = store.load("b").unwrap();
    let secret = render_qr("same payload", &opts).unwrap();
    assert_ne!(decode(&a.first, &b.second).unwrap(), secret);

    let _ = std::fs::remove_dir_all(store.root());
}

#[test]
fn test_lossy_recompression_breaks_shares() {
    let secret = render_qr("lossy", &qr_options()).unwrap();
    let pair = ShareCodec::new().split(&secret).unwrap();
    let exact = to_gray_image(pair.first.as_image()).unwrap();

    let mut jpeg = Vec::new();
    DynamicImage::ImageLuma8(exact.clone())
        .write_to(&mut Cursor::new(&mut jpeg), ImageOutputFormat::Jpeg(75))
        .unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap().to_luma8();

    // JPEG smears the pure 0/255 cells into intermediate gray levels
    assert_eq!(decoded.dimensions(), exact.dimensions());
    assert!(decoded.as_raw().iter().any(|&v| v != 0 && v != 255));
    assert_ne!(decoded.as_raw(), exact.as_raw());
}

#[test]
fn test_lossy_share_files_are_refused() {
    let pair = ShareCodec::new()
        .split(&render_qr("lossy", &qr_options()).unwrap())
        .unwrap();
    let store = temp_store();
    std::fs::create_dir_all(store.root()).unwrap();

    for name in ["share.jpg", "share.jpeg"] {
        let path = store.root().join(name);
        assert!(matches!(
            save_binary(pair.first.as_image(), &path),
            Err(VcsError::LossyFormat(_))
        ));
        assert!(!path.exists());
    }

    let _ = std::fs::remove_dir_all(store.root());
}
