//! テキストレポート生成

use crate::types::AnalysisResult;
use chrono::NaiveDateTime;

pub const PLATFORM_NAME: &str = "GenX Healthcare Diagnostic Platform";
pub const TEXT_REPORT_HEADING: &str = "MEDICAL ANALYSIS REPORT";
pub const NOT_PROVIDED: &str = "Not provided";

/// テキストレポート末尾の免責事項（3行）
pub const TEXT_DISCLAIMER: &str = "DISCLAIMER: This analysis was generated by artificial intelligence for educational and\n\
assistive purposes only. This report should not replace professional medical diagnosis.\n\
Always consult qualified healthcare professionals for medical decisions.";

pub const TEXT_MIME: &str = "text/plain";
pub const PDF_MIME: &str = "application/pdf";

const FILE_PREFIX: &str = "genx_medical_report";

/// "Report Generated" 欄の書式
pub fn format_generated_at(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 出力ファイル名: genx_medical_report_YYYYMMDD_HHMMSS.<ext>
pub fn report_file_name(timestamp: &NaiveDateTime, extension: &str) -> String {
    format!("{}_{}.{}", FILE_PREFIX, timestamp.format("%Y%m%d_%H%M%S"), extension)
}

/// 患者情報（未入力は "Not provided"）
pub fn patient_information(result: &AnalysisResult) -> &str {
    result
        .source_request
        .clinical_context()
        .unwrap_or(NOT_PROVIDED)
}

/// メタデータ行（ラベル, 値）
///
/// PDFの表とテキストレポートで共通の4行。
pub fn metadata_rows(result: &AnalysisResult) -> Vec<(&'static str, String)> {
    vec![
        ("Report Generated:", format_generated_at(&result.generated_at)),
        ("Analysis Type:", result.source_request.analysis_focus.label().to_string()),
        ("Image File:", result.source_request.file_name.clone()),
        ("Patient Information:", patient_information(result).to_string()),
    ]
}

/// テキストレポート本文
pub fn render_text_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(PLATFORM_NAME);
    out.push('\n');
    out.push_str(TEXT_REPORT_HEADING);
    out.push_str("\n\n");

    for (label, value) in metadata_rows(result) {
        out.push_str(&format!("{} {}\n", label, value));
    }
    out.push_str(&format!("AI Model: {}\n", result.source_request.model.id()));

    out.push_str("\nDIAGNOSTIC ANALYSIS:\n");
    out.push_str(&result.report_text);
    if !result.report_text.ends_with('\n') {
        out.push('\n');
    }

    out.push('\n');
    out.push_str(TEXT_DISCLAIMER);
    out.push('\n');
    out
}
