//! Composer統合テスト
//!
//! 推論エンドポイントをモックに差し替えて、プロンプト・生成パラメータ・
//! エラー伝搬・テキスト出力までを検証

use async_trait::async_trait;
use genx_common::{AnalysisFocus, ModelName, Precision, NO_CLINICAL_CONTEXT};
use genx_diagnostics::composer::{
    AnalysisRequest, InferenceClient, InferenceRequest, ReportComposer, MAX_OUTPUT_TOKENS,
};
use genx_diagnostics::error::{GenxError, Result};
use genx_diagnostics::export::{build_artifacts, ExportCapabilities, ExportFormat};
use genx_diagnostics::intake::{ImageSpecs, ImageUpload};
use std::sync::{Arc, Mutex};

/// 固定レスポンスを返し、受け取ったリクエストを記録するモック
struct MockClient {
    response: std::result::Result<String, String>,
    received: Mutex<Vec<InferenceRequest>>,
}

impl MockClient {
    fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            received: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            received: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<InferenceRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        self.received.lock().unwrap().push(request.clone());
        self.response.clone().map_err(GenxError::ApiCall)
    }
}

fn test_image() -> ImageUpload {
    ImageUpload {
        file_name: "chest_pa.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
        specs: ImageSpecs {
            width: 512,
            height: 512,
            format: "PNG".to_string(),
            file_size: 4,
            color_mode: "L".to_string(),
        },
    }
}

fn request(focus: AnalysisFocus, context: Option<&str>) -> AnalysisRequest {
    AnalysisRequest {
        image: test_image(),
        analysis_focus: focus,
        clinical_context: context.map(str::to_string),
        model: ModelName::Gemini15Flash,
        precision: Precision::new(0.2).unwrap(),
    }
}

#[tokio::test]
async fn test_general_analysis_scenario() {
    let client = MockClient::returning("FINDINGS: normal");
    let composer = ReportComposer::new(Arc::clone(&client));

    let result = composer
        .compose(&request(AnalysisFocus::General, Some("")))
        .await
        .expect("解析に失敗");

    assert_eq!(result.report_text, "FINDINGS: normal");
    assert_eq!(result.source_request.clinical_context, None);

    let outcome = build_artifacts(&result, ExportFormat::Text, ExportCapabilities::text_only())
        .expect("出力に失敗");
    let text = String::from_utf8(outcome.artifacts[0].bytes.clone()).unwrap();
    assert!(text.contains("FINDINGS: normal"));
    assert!(text.contains("Analysis Type: General Medical Analysis"));
    assert!(text.contains("Patient Information: Not provided"));
    assert!(text.contains("AI Model: gemini-1.5-flash"));
}

#[tokio::test]
async fn test_prompt_and_generation_settings_sent() {
    let client = MockClient::returning("ok");
    let composer = ReportComposer::new(Arc::clone(&client));
    let context = "Itchy pigmented lesion on left forearm, growing over 2 months";

    let mut req = request(AnalysisFocus::Dermatological, Some(context));
    req.model = ModelName::Gemini15Pro;
    req.precision = Precision::new(0.7).unwrap();
    composer.compose(&req).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1, "1回だけ呼ばれるべき");
    let sent = &calls[0];
    assert!(sent.prompt.contains(context));
    assert!(sent.prompt.contains("specializing in dermatological assessment"));
    assert_eq!(sent.model, ModelName::Gemini15Pro);
    assert_eq!(sent.generation.temperature, 0.7);
    assert_eq!(sent.generation.max_output_tokens, MAX_OUTPUT_TOKENS);
    assert_eq!(sent.mime_type, "image/png");
    assert_eq!(sent.image, test_image().bytes);
}

#[tokio::test]
async fn test_empty_context_uses_fallback_phrase() {
    let client = MockClient::returning("ok");
    let composer = ReportComposer::new(Arc::clone(&client));

    composer
        .compose(&request(AnalysisFocus::Ultrasound, None))
        .await
        .unwrap();

    assert!(client.calls()[0].prompt.contains(NO_CLINICAL_CONTEXT));
}

#[tokio::test]
async fn test_endpoint_failure_is_surfaced_once() {
    let client = MockClient::failing("HTTP 429: RESOURCE_EXHAUSTED Quota exceeded");
    let composer = ReportComposer::new(Arc::clone(&client));

    let err = composer
        .compose(&request(AnalysisFocus::General, None))
        .await
        .unwrap_err();

    assert!(matches!(err, GenxError::ApiCall(_)));
    assert!(err.to_string().contains("Quota exceeded"));
    assert_eq!(client.calls().len(), 1, "リトライしてはいけない");
}

#[tokio::test]
async fn test_missing_image_does_not_call_endpoint() {
    let client = MockClient::returning("unused");
    let composer = ReportComposer::new(Arc::clone(&client));

    let mut req = request(AnalysisFocus::General, None);
    req.image.bytes.clear();
    let err = composer.compose(&req).await.unwrap_err();

    assert!(matches!(err, GenxError::MissingImage));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_blank_response_is_rejected() {
    let client = MockClient::returning("  \n ");
    let composer = ReportComposer::new(Arc::clone(&client));

    let err = composer
        .compose(&request(AnalysisFocus::General, None))
        .await
        .unwrap_err();

    assert!(matches!(err, GenxError::EmptyReport));
}

#[tokio::test]
async fn test_response_is_returned_verbatim() {
    let raw = "## IMAGE ASSESSMENT\n\n- Adequate **inspiration**\n\n  trailing spaces  \n";
    let client = MockClient::returning(raw);
    let composer = ReportComposer::new(Arc::clone(&client));

    let result = composer
        .compose(&request(AnalysisFocus::Radiological, None))
        .await
        .unwrap();

    assert_eq!(result.report_text, raw);
    assert_eq!(result.source_request.file_name, "chest_pa.png");
    assert_eq!(result.source_request.analysis_focus, AnalysisFocus::Radiological);
}
