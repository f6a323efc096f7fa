//! 画像取り込みテスト

use genx_diagnostics::error::GenxError;
use genx_diagnostics::intake::load_image;
use image::{ImageBuffer, Luma, Rgb};
use tempfile::tempdir;

#[test]
fn test_load_png_passthrough() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("xray.png");
    ImageBuffer::from_pixel(64, 32, Luma([128u8]))
        .save(&path)
        .expect("PNG保存失敗");
    let original = std::fs::read(&path).unwrap();

    let upload = load_image(&path).expect("取り込み失敗");

    assert_eq!(upload.file_name, "xray.png");
    assert_eq!(upload.mime_type, "image/png");
    assert_eq!(upload.bytes, original);
    assert_eq!(upload.specs.width, 64);
    assert_eq!(upload.specs.height, 32);
    assert_eq!(upload.specs.format, "PNG");
    assert_eq!(upload.specs.color_mode, "L");
    assert_eq!(upload.specs.file_size, original.len() as u64);
}

#[test]
fn test_load_bmp_is_transcoded_to_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fundus.BMP");
    ImageBuffer::from_pixel(8, 8, Rgb([200u8, 40, 40]))
        .save_with_format(&path, image::ImageFormat::Bmp)
        .expect("BMP保存失敗");

    let upload = load_image(&path).expect("取り込み失敗");

    assert_eq!(upload.specs.format, "BMP");
    assert_eq!(upload.specs.color_mode, "RGB");
    assert_eq!(upload.mime_type, "image/png");
    assert_eq!(
        image::guess_format(&upload.bytes).unwrap(),
        image::ImageFormat::Png
    );
}

#[test]
fn test_load_jpeg() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("lesion.jpeg");
    ImageBuffer::from_pixel(16, 16, Rgb([90u8, 60, 30]))
        .save(&path)
        .expect("JPEG保存失敗");

    let upload = load_image(&path).expect("取り込み失敗");
    assert_eq!(upload.mime_type, "image/jpeg");
    assert_eq!(upload.specs.format, "JPEG");
}

#[test]
fn test_missing_file() {
    let err = load_image(std::path::Path::new("/nonexistent/path/12345/scan.png")).unwrap_err();
    assert!(matches!(err, GenxError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("animation.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, GenxError::UnsupportedFormat(_)));
}

#[test]
fn test_empty_file_is_missing_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.png");
    std::fs::write(&path, b"").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, GenxError::MissingImage));
}

#[test]
fn test_corrupt_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"this is not a jpeg").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, GenxError::ImageLoad(_)));
}
