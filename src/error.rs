use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenxError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`genx config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}（対応: png, jpg, jpeg, tiff, bmp, dcm）")]
    UnsupportedFormat(String),

    #[error("画像が選択されていません。解析する医療画像を指定してください")]
    MissingImage,

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("レポート本文が空です")]
    EmptyReport,

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] genx_common::Error),
}

pub type Result<T> = std::result::Result<T, GenxError>;
