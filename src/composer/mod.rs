//! レポート生成（Composer）
//!
//! プロンプトを組み立て、画像と一緒に推論APIへ1回だけ送信する。
//! リトライ・バックオフは行わない。

mod gemini;

pub use gemini::GeminiClient;

use crate::error::{GenxError, Result};
use crate::intake::ImageUpload;
use async_trait::async_trait;
use genx_common::{
    build_medical_prompt, AnalysisFocus, AnalysisResult, ModelName, Precision, RequestSummary,
};
use std::sync::Arc;
use tracing::debug;

/// 最大出力トークン数
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// 解析リクエスト
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImageUpload,
    pub analysis_focus: AnalysisFocus,
    pub clinical_context: Option<String>,
    pub model: ModelName,
    pub precision: Precision,
}

impl AnalysisRequest {
    /// 画像を除いたリクエスト情報
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            file_name: self.image.file_name.clone(),
            analysis_focus: self.analysis_focus,
            clinical_context: self
                .clinical_context
                .clone()
                .filter(|context| !context.trim().is_empty()),
            model: self.model,
            precision: self.precision,
        }
    }

    pub fn prompt(&self) -> String {
        build_medical_prompt(self.analysis_focus, self.clinical_context.as_deref())
    }
}

/// 生成パラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// 推論APIへ送る内容
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub model: ModelName,
    pub prompt: String,
    pub mime_type: String,
    pub image: Vec<u8>,
    pub generation: GenerationSettings,
}

/// 推論エンドポイント
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// 生成テキストをそのまま返す
    async fn generate(&self, request: &InferenceRequest) -> Result<String>;
}

#[async_trait]
impl<T: InferenceClient + ?Sized> InferenceClient for Arc<T> {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        (**self).generate(request).await
    }
}

/// リクエストから推論APIへの送信内容を作る
pub fn build_inference_request(request: &AnalysisRequest) -> InferenceRequest {
    InferenceRequest {
        model: request.model,
        prompt: request.prompt(),
        mime_type: request.image.mime_type.clone(),
        image: request.image.bytes.clone(),
        generation: GenerationSettings {
            temperature: request.precision.value(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

pub struct ReportComposer<C> {
    client: C,
}

impl<C: InferenceClient> ReportComposer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// 解析を実行してレポートを返す
    pub async fn compose(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        if request.image.bytes.is_empty() {
            return Err(GenxError::MissingImage);
        }

        let inference = build_inference_request(request);
        debug!(
            "推論リクエスト: model={}, temperature={}, プロンプト長={} chars, 画像={} bytes",
            inference.model,
            inference.generation.temperature,
            inference.prompt.len(),
            inference.image.len()
        );

        let report_text = self.client.generate(&inference).await?;
        debug!("レスポンス長: {} chars", report_text.len());

        if report_text.trim().is_empty() {
            return Err(GenxError::EmptyReport);
        }

        Ok(AnalysisResult {
            report_text,
            generated_at: chrono::Local::now().naive_local(),
            source_request: request.summary(),
        })
    }
}
