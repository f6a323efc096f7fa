//! Gemini API連携（generateContent）

use super::{InferenceClient, InferenceRequest};
use crate::config::Config;
use crate::error::{GenxError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use genx_common::ModelName;
use serde::{Deserialize, Serialize};

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// エラーレスポンス {"error": {"code", "message", "status"}}
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// 設定からクライアントを作成（APIキー必須）
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.get_api_key()?, config.base_url.clone()))
    }

    fn endpoint(&self, model: ModelName) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.id()
        )
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        let body = build_request_body(request);

        // キーはURLではなくヘッダで渡す（エラーメッセージにURLが含まれるため）
        let response = self
            .http
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        parse_response_body(status, &text)
    }
}

fn build_request_body(request: &InferenceRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text {
                    text: request.prompt.clone(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: request.mime_type.clone(),
                        data: STANDARD.encode(&request.image),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: request.generation.temperature,
            max_output_tokens: request.generation.max_output_tokens,
        },
    }
}

/// レスポンス本文から生成テキストを取り出す
fn parse_response_body(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.status.is_empty() => {
                format!("{} {}", envelope.error.status, envelope.error.message)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => body.trim().to_string(),
        };
        return Err(GenxError::ApiCall(format!("HTTP {}: {}", status, detail)));
    }

    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| GenxError::ApiParse(e.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        return Err(match reason {
            Some(reason) => GenxError::ApiCall(format!("プロンプトがブロックされました: {}", reason)),
            None => GenxError::ApiParse("候補（candidates）がありません".into()),
        });
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
            return Err(GenxError::ApiCall(format!(
                "応答が生成されませんでした (finishReason: {})",
                reason
            )));
        }
    }

    Ok(text)
}
