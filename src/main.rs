use anyhow::{Context, Result};
use clap::Parser;
use genx_common::prompts::DIAGNOSTIC_CAPABILITIES;
use genx_common::{AnalysisFocus, AnalysisResult, ModelName};
use genx_diagnostics::composer::{AnalysisRequest, GeminiClient, ReportComposer};
use genx_diagnostics::export::{self, ExportCapabilities, ExportFormat};
use genx_diagnostics::intake::{self, ImageSpecs};
use genx_diagnostics::{cli, config};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONSOLE_DISCLAIMER: &[(&str, &str)] = &[
    ("Professional Use Only", "This platform is designed as a diagnostic aid for healthcare professionals"),
    ("Not a Replacement", "AI analysis does not replace clinical judgment or professional medical diagnosis"),
    ("Clinical Correlation Required", "All findings must be correlated with clinical presentation and additional testing"),
    ("Emergency Situations", "For urgent medical situations, contact emergency services immediately"),
    ("Liability", "Users assume full responsibility for clinical decisions based on this analysis"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            image,
            focus,
            context,
            model,
            precision,
            output,
            format,
            save_json,
            interactive,
        } => {
            println!("🔬 GenX - 医療画像解析\n");
            let config = Config::load()?;

            // 1. 画像読み込み
            println!("[1/3] 画像を読み込み中...");
            let upload = intake::load_image(&image)
                .with_context(|| format!("画像を読み込めません: {}", image.display()))?;
            print_specs(&upload.file_name, &upload.specs);
            println!();

            let (focus, context) = if interactive {
                prompt_focus_and_context(focus, context)?
            } else {
                (focus, context)
            };

            let request = AnalysisRequest {
                image: upload,
                analysis_focus: focus,
                clinical_context: context,
                model: model.unwrap_or(config.model),
                precision: precision.unwrap_or(config.precision),
            };

            // 2. AI解析（1回のみ、リトライなし）
            println!("[2/3] AI解析中... ({}, 精度 {})", request.model, request.precision);
            let composer = ReportComposer::new(GeminiClient::from_config(&config)?);

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Processing medical image analysis...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let composed = composer.compose(&request).await;
            spinner.finish_and_clear();

            let result =
                composed.context("Analysis Error - Unable to process medical image")?;
            println!("✔ Analysis Complete - Diagnostic report generated successfully\n");

            println!("== Diagnostic Report ==\n");
            println!("{}\n", result.report_text.trim_end());

            if let Some(json_path) = save_json {
                export::save_result(&result, &json_path)?;
                println!("✔ 結果を保存: {}", json_path.display());
            }

            // 3. 出力
            println!("[3/3] レポートを出力中...");
            export_and_report(&result, format, output.as_deref())?;

            print_console_disclaimer();
            println!("\n✅ 完了");
        }

        Commands::Export { input, output, format } => {
            println!("📄 GenX - レポート出力\n");

            let result = export::load_result(&input)
                .with_context(|| format!("入力ファイルを読み込めません: {}", input.display()))?;

            export_and_report(&result, format, output.as_deref())?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Inspect { image } => {
            let upload = intake::load_image(&image)?;
            println!("Technical Specifications");
            print_specs(&upload.file_name, &upload.specs);
            println!("  送信形式: {}", upload.mime_type);
        }

        Commands::Focuses => {
            println!("Diagnostic Focus Areas:");
            for focus in AnalysisFocus::ALL {
                println!("  {:<18} {}", focus.slug(), focus.label());
            }

            println!("\nSupported Diagnostic Areas:");
            for capability in DIAGNOSTIC_CAPABILITIES {
                println!("  • {}", capability);
            }

            println!("\nAI Models:");
            for model in ModelName::ALL {
                println!("  {:<18} {}", model.id(), model.description());
            }
        }

        Commands::Config {
            set_api_key,
            model,
            precision,
            show,
        } => {
            let mut config = Config::load()?;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if model.is_some() || precision.is_some() {
                if let Some(model) = model {
                    config.model = model;
                }
                if let Some(precision) = precision {
                    config.precision = precision;
                }
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  解析精度: {}", config.precision);
                println!("  エンドポイント: {}", config.base_url);
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,genx=debug,genx_diagnostics=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_specs(file_name: &str, specs: &ImageSpecs) {
    println!("  ファイル: {}", file_name);
    println!("  Dimensions: {} × {}", specs.width, specs.height);
    println!("  Format: {}", specs.format);
    println!("  File Size: {:.1} KB", specs.file_size_kb());
    println!("  Color Mode: {}", specs.color_mode);
}

fn prompt_focus_and_context(
    focus: AnalysisFocus,
    context: Option<String>,
) -> Result<(AnalysisFocus, Option<String>)> {
    let labels: Vec<&str> = AnalysisFocus::ALL.iter().map(|f| f.label()).collect();
    let default_index = AnalysisFocus::ALL
        .iter()
        .position(|f| *f == focus)
        .unwrap_or(0);

    let selected = dialoguer::Select::new()
        .with_prompt("Diagnostic Focus Area")
        .items(&labels)
        .default(default_index)
        .interact()?;

    let entered: String = dialoguer::Input::new()
        .with_prompt("Patient history and symptoms (optional)")
        .with_initial_text(context.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let context = Some(entered).filter(|c| !c.trim().is_empty());
    Ok((AnalysisFocus::ALL[selected], context))
}

fn export_and_report(
    result: &AnalysisResult,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let outcome = export::build_artifacts(result, format, ExportCapabilities::detect())?;
    for warning in &outcome.warnings {
        println!("⚠ {}", warning);
    }

    let written = export::write_artifacts(&outcome.artifacts, &output_dir)?;
    for (artifact, path) in outcome.artifacts.iter().zip(&written) {
        println!("✔ 出力 ({}): {}", artifact.mime_type, path.display());
    }
    Ok(())
}

fn print_console_disclaimer() {
    println!("\nImportant Medical Disclaimer");
    for (title, text) in CONSOLE_DISCLAIMER {
        println!("  • {}: {}", title, text);
    }
}
