//! CLIバイナリの統合テスト
//!
//! HOMEを一時ディレクトリに向けて設定ファイルの影響を検証

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_genx(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_genx"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("genx の起動に失敗")
}

fn write_broken_config(home: &Path) {
    let config_dir = home.join(".config").join("genx");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), "{ not json").unwrap();
}

/// 壊れた設定ファイルがあっても設定を使わないコマンドは動く
#[test]
fn test_focuses_ignores_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let output = run_genx(home.path(), &["focuses"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("General Medical Analysis"));
    assert!(stdout.contains("gemini-1.5-pro"));
}

#[test]
fn test_inspect_ignores_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let image_path = home.path().join("scan.png");
    image::ImageBuffer::from_pixel(10, 20, image::Luma([0u8]))
        .save(&image_path)
        .unwrap();

    let output = run_genx(home.path(), &["inspect", image_path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("10 × 20"));
}

/// 設定を読むコマンドは壊れた設定ファイルをエラーにする
#[test]
fn test_config_show_reports_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let output = run_genx(home.path(), &["config", "--show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON解析エラー"));
}
