//! 解析リクエスト・結果の型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - AnalysisFocus: 診断フォーカス（8種類固定）
//! - ModelName: 推論モデル（flash / pro）
//! - Precision: 生成温度（0.0〜1.0）
//! - RequestSummary: 画像を除いたリクエスト情報
//! - AnalysisResult: レポート本文 + 生成日時 + リクエスト情報

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 診断フォーカス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalysisFocus {
    #[default]
    #[serde(rename = "General Medical Analysis")]
    General,
    #[serde(rename = "Radiological Interpretation")]
    Radiological,
    #[serde(rename = "CT/MRI Scan Review")]
    CtMri,
    #[serde(rename = "Dermatological Assessment")]
    Dermatological,
    #[serde(rename = "Ophthalmological Examination")]
    Ophthalmological,
    #[serde(rename = "Pathological Analysis")]
    Pathological,
    #[serde(rename = "Laboratory Results Review")]
    Laboratory,
    #[serde(rename = "Ultrasound Interpretation")]
    Ultrasound,
}

impl AnalysisFocus {
    /// 選択肢の表示順
    pub const ALL: [AnalysisFocus; 8] = [
        AnalysisFocus::General,
        AnalysisFocus::Radiological,
        AnalysisFocus::CtMri,
        AnalysisFocus::Dermatological,
        AnalysisFocus::Ophthalmological,
        AnalysisFocus::Pathological,
        AnalysisFocus::Laboratory,
        AnalysisFocus::Ultrasound,
    ];

    /// 画面・レポートに出すラベル
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisFocus::General => "General Medical Analysis",
            AnalysisFocus::Radiological => "Radiological Interpretation",
            AnalysisFocus::CtMri => "CT/MRI Scan Review",
            AnalysisFocus::Dermatological => "Dermatological Assessment",
            AnalysisFocus::Ophthalmological => "Ophthalmological Examination",
            AnalysisFocus::Pathological => "Pathological Analysis",
            AnalysisFocus::Laboratory => "Laboratory Results Review",
            AnalysisFocus::Ultrasound => "Ultrasound Interpretation",
        }
    }

    /// CLI用の短縮名
    pub fn slug(&self) -> &'static str {
        match self {
            AnalysisFocus::General => "general",
            AnalysisFocus::Radiological => "radiological",
            AnalysisFocus::CtMri => "ct-mri",
            AnalysisFocus::Dermatological => "dermatological",
            AnalysisFocus::Ophthalmological => "ophthalmological",
            AnalysisFocus::Pathological => "pathological",
            AnalysisFocus::Laboratory => "laboratory",
            AnalysisFocus::Ultrasound => "ultrasound",
        }
    }
}

impl fmt::Display for AnalysisFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalysisFocus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        AnalysisFocus::ALL
            .iter()
            .copied()
            .find(|focus| {
                focus.label().eq_ignore_ascii_case(needle) || focus.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| Error::UnknownFocus(s.to_string()))
    }
}

/// 推論モデル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelName {
    #[default]
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
}

impl ModelName {
    pub const ALL: [ModelName; 2] = [ModelName::Gemini15Flash, ModelName::Gemini15Pro];

    /// APIのモデルID
    pub fn id(&self) -> &'static str {
        match self {
            ModelName::Gemini15Flash => "gemini-1.5-flash",
            ModelName::Gemini15Pro => "gemini-1.5-pro",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelName::Gemini15Flash => "Optimized for speed",
            ModelName::Gemini15Pro => "Enhanced analytical depth",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini-1.5-flash" | "flash" => Ok(ModelName::Gemini15Flash),
            "gemini-1.5-pro" | "pro" => Ok(ModelName::Gemini15Pro),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

/// 解析精度（生成温度）
///
/// 0.0〜1.0の範囲のみ保持できる。UIの刻みは0.1。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Precision(f32);

impl Precision {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    pub const STEP: f32 = 0.1;
    pub const DEFAULT: f32 = 0.2;

    pub fn new(value: f32) -> Result<Self> {
        if value.is_nan() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::InvalidPrecision(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f32> for Precision {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Precision::new(value)
    }
}

impl From<Precision> for f32 {
    fn from(precision: Precision) -> f32 {
        precision.0
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("precision must be a number: {}", s)))?;
        Precision::new(value)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// 画像を除いたリクエスト情報
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub file_name: String,

    #[serde(default)]
    pub analysis_focus: AnalysisFocus,

    #[serde(default)]
    pub clinical_context: Option<String>,

    #[serde(default)]
    pub model: ModelName,

    #[serde(default)]
    pub precision: Precision,
}

impl RequestSummary {
    /// 空白のみの臨床情報は未入力として扱う
    pub fn clinical_context(&self) -> Option<&str> {
        self.clinical_context
            .as_deref()
            .filter(|context| !context.trim().is_empty())
    }
}

/// AI解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// APIレスポンス本文（無加工）
    pub report_text: String,

    /// 生成日時（ローカル時刻）
    pub generated_at: NaiveDateTime,

    pub source_request: RequestSummary,
}

impl AnalysisResult {
    pub fn has_report(&self) -> bool {
        !self.report_text.trim().is_empty()
    }
}
