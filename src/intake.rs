//! 画像取り込み
//!
//! 拡張子チェック → 読み込み → デコード（技術仕様の取得）→ 送信用データ作成

use crate::error::{GenxError, Result};
use image::{ColorType, DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// 受け付ける拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "dcm"];

/// 画像の技術仕様
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpecs {
    pub width: u32,
    pub height: u32,
    /// "PNG" / "JPEG" / "TIFF" / "BMP"
    pub format: String,
    pub file_size: u64,
    /// PIL形式のカラーモード名 ("L", "RGB", "RGBA" ...)
    pub color_mode: String,
}

impl ImageSpecs {
    pub fn file_size_kb(&self) -> f64 {
        self.file_size as f64 / 1024.0
    }
}

/// 取り込み済み画像
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// 送信時のMIMEタイプ
    pub mime_type: String,
    /// 送信用バイト列（PNG/JPEG以外はPNGに変換済み）
    pub bytes: Vec<u8>,
    pub specs: ImageSpecs,
}

pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// ファイルから画像を取り込む
pub fn load_image(path: &Path) -> Result<ImageUpload> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    check_extension(&file_name)?;

    if !path.is_file() {
        return Err(GenxError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    from_bytes(&file_name, bytes)
}

/// バイト列から画像を取り込む
pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<ImageUpload> {
    let extension = check_extension(file_name)?;

    if bytes.is_empty() {
        return Err(GenxError::MissingImage);
    }

    let format = ImageFormat::from_extension(&extension)
        .or_else(|| image::guess_format(&bytes).ok())
        .ok_or_else(|| {
            GenxError::ImageLoad(format!("{}: 画像としてデコードできません", file_name))
        })?;

    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| GenxError::ImageLoad(format!("{}: {}", file_name, e)))?;

    let specs = ImageSpecs {
        width: decoded.width(),
        height: decoded.height(),
        format: format_name(format).to_string(),
        file_size: bytes.len() as u64,
        color_mode: color_mode(decoded.color()).to_string(),
    };

    debug!(
        "取り込み: {} ({}x{}, {}, {})",
        file_name, specs.width, specs.height, specs.format, specs.color_mode
    );

    let (mime_type, upload_bytes) = match format {
        ImageFormat::Png => ("image/png", bytes),
        ImageFormat::Jpeg => ("image/jpeg", bytes),
        _ => ("image/png", encode_png(&decoded)?),
    };

    Ok(ImageUpload {
        file_name: file_name.to_string(),
        mime_type: mime_type.to_string(),
        bytes: upload_bytes,
        specs,
    })
}

fn check_extension(file_name: &str) -> Result<String> {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if !is_supported_extension(&extension) {
        return Err(GenxError::UnsupportedFormat(file_name.to_string()));
    }
    Ok(extension)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| GenxError::ImageLoad(format!("PNG変換エラー: {}", e)))?;
    Ok(buffer.into_inner())
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Bmp => "BMP",
        _ => "UNKNOWN",
    }
}

fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        _ => "UNKNOWN",
    }
}
