#[cfg(feature = "pdf")]
pub mod pdf;

use crate::error::{GenxError, Result};
use genx_common::export::text_core::{render_text_report, report_file_name, PDF_MIME, TEXT_MIME};
use genx_common::AnalysisResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
    #[default]
    Both,
}

impl ExportFormat {
    pub fn includes_text(&self) -> bool {
        matches!(self, ExportFormat::Text | ExportFormat::Both)
    }

    pub fn includes_pdf(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use text, pdf, or both", s)),
        }
    }
}

/// 出力機能の有無（起動時に判定）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportCapabilities {
    pub pdf: bool,
}

impl ExportCapabilities {
    /// `pdf` フィーチャ付きでビルドされていればPDF出力可
    pub fn detect() -> Self {
        Self {
            pdf: cfg!(feature = "pdf"),
        }
    }

    pub fn text_only() -> Self {
        Self { pdf: false }
    }
}

/// 出力ファイル1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub artifacts: Vec<ExportArtifact>,
    /// PDFを出せなかった場合の警告
    pub warnings: Vec<String>,
}

pub fn text_artifact(result: &AnalysisResult) -> ExportArtifact {
    ExportArtifact {
        file_name: report_file_name(&result.generated_at, "txt"),
        mime_type: TEXT_MIME,
        bytes: render_text_report(result).into_bytes(),
    }
}

#[cfg(feature = "pdf")]
pub fn pdf_artifact(result: &AnalysisResult) -> Result<ExportArtifact> {
    Ok(ExportArtifact {
        file_name: report_file_name(&result.generated_at, "pdf"),
        mime_type: PDF_MIME,
        bytes: pdf::generate_pdf(result)?,
    })
}

#[cfg(not(feature = "pdf"))]
pub fn pdf_artifact(_result: &AnalysisResult) -> Result<ExportArtifact> {
    Err(GenxError::PdfGeneration(format!(
        "PDF出力は無効です（{} を生成できません）",
        PDF_MIME
    )))
}

/// 解析結果から出力ファイルを作成
///
/// PDFが使えない・失敗した場合は警告を残してテキストのみ出力する。
pub fn build_artifacts(
    result: &AnalysisResult,
    format: ExportFormat,
    capabilities: ExportCapabilities,
) -> Result<ExportOutcome> {
    if !result.has_report() {
        return Err(GenxError::EmptyReport);
    }

    let mut outcome = ExportOutcome::default();

    if format.includes_text() {
        outcome.artifacts.push(text_artifact(result));
    }

    if format.includes_pdf() {
        let pdf = if capabilities.pdf {
            pdf_artifact(result)
        } else {
            Err(GenxError::PdfGeneration(
                "PDF出力機能が利用できません（`pdf` フィーチャを有効にしてビルドしてください）".into(),
            ))
        };

        match pdf {
            Ok(artifact) => outcome.artifacts.push(artifact),
            Err(e) => {
                warn!("PDF出力をスキップ: {}", e);
                outcome.warnings.push(e.to_string());
                if !format.includes_text() {
                    outcome.artifacts.push(text_artifact(result));
                }
            }
        }
    }

    Ok(outcome)
}

/// 出力先ディレクトリへ書き込み
pub fn write_artifacts(artifacts: &[ExportArtifact], output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)?;
        info!("出力: {} ({}, {} bytes)", path.display(), artifact.mime_type, artifact.bytes.len());
        written.push(path);
    }
    Ok(written)
}

/// 解析結果をJSONで保存（`export` コマンドで再出力できる形式）
pub fn save_result(result: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

/// 保存済みの解析結果JSONを読み込む
pub fn load_result(path: &Path) -> Result<AnalysisResult> {
    if !path.is_file() {
        return Err(GenxError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("both".parse::<ExportFormat>().unwrap(), ExportFormat::Both);
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_flags() {
        assert!(ExportFormat::Both.includes_text() && ExportFormat::Both.includes_pdf());
        assert!(!ExportFormat::Text.includes_pdf());
        assert!(!ExportFormat::Pdf.includes_text());
    }

    #[test]
    fn test_detect_matches_feature() {
        assert_eq!(ExportCapabilities::detect().pdf, cfg!(feature = "pdf"));
    }
}
