//! レイアウト設定モジュール
//!
//! pt基準のレイアウト定義（PDF座標系: 原点は左下）

// ============================================
// ページ・余白
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// ページサイズ（pt）
pub const PAGE_WIDTH_PT: f32 = A4_WIDTH_MM * MM_TO_PT; // 595.28pt
pub const PAGE_HEIGHT_PT: f32 = A4_HEIGHT_MM * MM_TO_PT; // 841.89pt

/// 余白（pt）: 上下左右とも1inch
pub const MARGIN_PT: f32 = 72.0;

/// 本文フレーム幅（pt）
pub const FRAME_WIDTH_PT: f32 = PAGE_WIDTH_PT - MARGIN_PT * 2.0;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

// ============================================
// 色
// ============================================

/// RGB色（0.0〜1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    /// 0xRRGGBB から生成
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

pub const BLACK: RgbColor = RgbColor::from_hex(0x000000);
pub const TITLE_COLOR: RgbColor = RgbColor::from_hex(0x1e3c72);
pub const HEADER_COLOR: RgbColor = RgbColor::from_hex(0x2a5298);
pub const TABLE_LABEL_BACKGROUND: RgbColor = RgbColor::from_hex(0xf8fafc);
pub const TABLE_GRID_COLOR: RgbColor = RgbColor::from_hex(0xe5e7eb);
pub const DISCLAIMER_COLOR: RgbColor = RgbColor::from_hex(0xdc2626);

// ============================================
// 文字サイズ・間隔（pt）
// ============================================

pub const TITLE_FONT_SIZE: f32 = 24.0;
pub const TITLE_SPACE_AFTER: f32 = 30.0;
pub const TITLE_SPACER: f32 = 20.0;

pub const HEADER_FONT_SIZE: f32 = 14.0;
pub const HEADER_SPACE_BEFORE: f32 = 20.0;
pub const HEADER_SPACE_AFTER: f32 = 10.0;

pub const BODY_FONT_SIZE: f32 = 10.0;
pub const BODY_LEADING: f32 = 12.0;
pub const PARAGRAPH_SPACER: f32 = 10.0;
pub const SECTION_SPACER: f32 = 30.0;

pub const DISCLAIMER_INDENT: f32 = 20.0;
pub const DISCLAIMER_SPACE_BEFORE: f32 = 20.0;

/// 行送り = 文字サイズ × 1.2
pub fn leading_for(font_size: f32) -> f32 {
    font_size * 1.2
}

// ============================================
// メタデータ表
// ============================================

/// 列幅: 2inch / 4inch
pub const TABLE_LABEL_WIDTH_PT: f32 = 144.0;
pub const TABLE_VALUE_WIDTH_PT: f32 = 288.0;
pub const TABLE_FONT_SIZE: f32 = 10.0;
pub const TABLE_PADDING_LEFT: f32 = 6.0;
pub const TABLE_PADDING_TOP: f32 = 3.0;
pub const TABLE_PADDING_BOTTOM: f32 = 12.0;
pub const TABLE_GRID_WIDTH: f32 = 1.0;

// ============================================
// フォント幅（Helvetica, 1000単位）
// ============================================

/// ASCII 0x20〜0x7E のHelvetica文字幅
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const DEFAULT_CHAR_WIDTH: u16 = 556;

/// 文字列の描画幅（pt）
///
/// 太字も同じ表で近似する。
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7e).contains(&code) {
                HELVETICA_WIDTHS[(code - 0x20) as usize] as u32
            } else {
                DEFAULT_CHAR_WIDTH as u32
            }
        })
        .sum();
    units as f32 * font_size / 1000.0
}

/// 指定幅に収まるよう単語単位で折り返す
///
/// 1単語が幅を超える場合は文字単位で分割する。空文字列は空のVecを返す。
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, font_size) <= max_width {
            current = word.to_string();
        } else {
            // 長い単語（URL等）
            for c in word.chars() {
                current.push(c);
                if text_width(&current, font_size) > max_width {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_pt() {
        assert!((PAGE_WIDTH_PT - 595.28).abs() < 0.1);
        assert!((PAGE_HEIGHT_PT - 841.89).abs() < 0.1);
        assert!((pt_to_mm(mm_to_pt(12.5)) - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_hex_color() {
        let c = RgbColor::from_hex(0xff0000);
        assert_eq!(c, RgbColor { r: 1.0, g: 0.0, b: 0.0 });
    }

    #[test]
    fn test_text_width() {
        // "H" = 722, "i" = 222
        assert!((text_width("Hi", 10.0) - 9.44).abs() < 0.001);
        assert_eq!(text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_wrap_short_line() {
        assert_eq!(wrap_text("FINDINGS: normal", 10.0, 400.0), vec!["FINDINGS: normal"]);
        assert!(wrap_text("   ", 10.0, 400.0).is_empty());
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "The cardiomediastinal silhouette is within normal limits. ".repeat(10);
        let lines = wrap_text(&text, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0) <= 200.0, "幅超過: {}", line);
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
