use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use genx_common::{AnalysisFocus, ModelName, Precision};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "genx")]
#[command(about = "GenX - 医療画像AI解析・診断レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 医療画像を解析してレポートを出力
    Analyze {
        /// 画像ファイル (png/jpg/jpeg/tiff/bmp/dcm)
        #[arg(required = true)]
        image: PathBuf,

        /// 診断フォーカス（ラベルまたは短縮名: general, radiological, ct-mri, ...）
        #[arg(short, long, default_value = "general")]
        focus: AnalysisFocus,

        /// 患者情報・症状（任意）
        #[arg(short, long)]
        context: Option<String>,

        /// モデル（省略時は設定値）
        #[arg(short, long)]
        model: Option<ModelName>,

        /// 解析精度 0.0-1.0（省略時は設定値）
        #[arg(short, long)]
        precision: Option<Precision>,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (text/pdf/both)
        #[arg(long, default_value = "both")]
        format: ExportFormat,

        /// 解析結果JSONの保存先
        #[arg(long)]
        save_json: Option<PathBuf>,

        /// フォーカスと臨床情報を対話的に入力
        #[arg(short, long)]
        interactive: bool,
    },

    /// 保存済みの解析結果JSONからレポートを再出力
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (text/pdf/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,
    },

    /// 画像の技術仕様を表示
    Inspect {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 診断フォーカス・対応領域・モデルの一覧
    Focuses,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定モデルを設定
        #[arg(long)]
        model: Option<ModelName>,

        /// 既定の解析精度を設定
        #[arg(long)]
        precision: Option<Precision>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
