//! GenX Common Library
//!
//! CLIと他のフロントエンドで共有される型とユーティリティ（I/Oなし）

pub mod error;
pub mod export;
pub mod layout;
pub mod prompts;
pub mod types;

pub use error::{Error, Result};
pub use export::pdf_core::{plan_document, DocumentPlan};
pub use export::text_core::{render_text_report, report_file_name};
pub use prompts::{build_medical_prompt, DIAGNOSTIC_CAPABILITIES, NO_CLINICAL_CONTEXT};
pub use types::{AnalysisFocus, AnalysisResult, ModelName, Precision, RequestSummary};
