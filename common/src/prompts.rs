//! プロンプト生成モジュール
//!
//! - DIAGNOSTIC_CAPABILITIES: 対応診断領域の一覧
//! - build_medical_prompt: 5セクション構成の医療レポート用プロンプト

use crate::types::AnalysisFocus;

/// 臨床情報が未入力の場合の文言
pub const NO_CLINICAL_CONTEXT: &str = "No additional clinical information provided";

/// 対応診断領域
pub const DIAGNOSTIC_CAPABILITIES: &[&str] = &[
    "Radiological Imaging (X-Ray, CT, MRI)",
    "Dermatological Assessment",
    "Ophthalmological Examination",
    "Pathological Specimen Review",
    "Medical Laboratory Results",
    "Ultrasound Imaging Analysis",
    "General Medical Image Evaluation",
];

/// レポートのセクション見出し（出力順）
pub const REPORT_SECTIONS: &[&str] = &[
    "IMAGE ASSESSMENT",
    "CLINICAL FINDINGS",
    "DIAGNOSTIC IMPRESSIONS",
    "CLINICAL RECOMMENDATIONS",
    "CONFIDENCE ASSESSMENT",
];

/// 医療画像解析プロンプト生成
///
/// # Arguments
/// * `focus` - 診断フォーカス
/// * `clinical_context` - 患者情報・症状（空白のみは未入力扱い）
///
/// # Returns
/// 画像と一緒に送信するプロンプト文字列
pub fn build_medical_prompt(focus: AnalysisFocus, clinical_context: Option<&str>) -> String {
    let specialty = focus.label().to_lowercase();
    let context = clinical_context
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(NO_CLINICAL_CONTEXT);

    format!(
        r#"You are an advanced medical AI assistant specializing in {specialty}.

Clinical Context: {context}

Please provide a comprehensive medical analysis structured as follows:

1. IMAGE ASSESSMENT
- Detailed technical description of the medical image
- Quality assessment and any limitations

2. CLINICAL FINDINGS
- Systematic evaluation of anatomical structures
- Identification of normal and abnormal findings
- Quantitative measurements where applicable

3. DIAGNOSTIC IMPRESSIONS
- Primary diagnostic considerations
- Differential diagnoses ranked by likelihood
- Supporting evidence for each consideration

4. CLINICAL RECOMMENDATIONS
- Suggested additional imaging or testing
- Recommended clinical correlation
- Follow-up recommendations

5. CONFIDENCE ASSESSMENT
- Analysis confidence level with justification
- Limitations and uncertainties

CRITICAL REQUIREMENTS:
- Maintain professional medical terminology
- Provide evidence-based analysis
- Include appropriate medical disclaimers
- Emphasize need for professional medical review

Format your response professionally as a medical report."#
    )
}
