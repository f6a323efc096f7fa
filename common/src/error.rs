//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid precision: {0} (must be between 0.0 and 1.0)")]
    InvalidPrecision(f32),

    #[error("Unknown analysis focus: {0}")]
    UnknownFocus(String),

    #[error("Unknown model: {0}. Use gemini-1.5-flash or gemini-1.5-pro")]
    UnknownModel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
