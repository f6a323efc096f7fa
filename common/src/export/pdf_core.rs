//! PDF export core utilities.
//!
//! レポートの配置計算のみを行い、ページごとの描画命令（DrawOp）を返す。
//! 実際のPDF生成は描画側（printpdf）が担当する。

use crate::export::text_core::metadata_rows;
use crate::layout::*;
use crate::types::AnalysisResult;

pub const PDF_TITLE: &str = "GenX Healthcare Diagnostic Report";
pub const RESULTS_HEADER: &str = "Medical Analysis Results";
pub const DISCLAIMER_HEADER: &str = "Important Medical Disclaimer";

pub const PDF_DISCLAIMER: &str = "This analysis was generated by artificial intelligence and is intended for \
educational and assistive purposes only. This report should NOT be used as a substitute for professional \
medical diagnosis, treatment, or advice. Always consult with qualified healthcare professionals for medical \
decisions. In case of medical emergency, contact emergency services immediately.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// 描画要素の所属ブロック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Title,
    MetadataLabel,
    MetadataValue,
    SectionHeader,
    Body,
    Disclaimer,
}

/// 1行分のテキスト（y はベースライン, pt）
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: RgbColor,
    pub block: Block,
}

/// 矩形（x, y は左下, pt）
#[derive(Debug, Clone, PartialEq)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: RgbColor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    FillRect(RectSpec),
    StrokeRect { rect: RectSpec, line_width: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub ops: Vec<DrawOp>,
}

/// 文書全体の描画計画
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub title: String,
    pub pages: Vec<PagePlan>,
    /// 本文の段落数（空行を除いた行数）
    pub paragraph_count: usize,
}

impl DocumentPlan {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| {
            page.ops.iter().filter_map(|op| match op {
                DrawOp::Text(run) => Some(run),
                _ => None,
            })
        })
    }

    pub fn runs_in(&self, block: Block) -> Vec<&TextRun> {
        self.text_runs().filter(|run| run.block == block).collect()
    }
}

/// 本文を段落に分割（改行区切り、空行は除外）
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 縦方向の配置カーソル
struct Cursor {
    pages: Vec<PagePlan>,
    /// 残り領域の上端（pt）
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PagePlan::default()],
            y: Self::top(),
        }
    }

    fn top() -> f32 {
        PAGE_HEIGHT_PT - MARGIN_PT
    }

    fn at_page_top(&self) -> bool {
        self.y >= Self::top()
    }

    fn new_page(&mut self) {
        self.pages.push(PagePlan::default());
        self.y = Self::top();
    }

    /// 高さ `height` が収まらなければ改ページ
    fn ensure(&mut self, height: f32) {
        if self.y - height < MARGIN_PT && !self.at_page_top() {
            self.new_page();
        }
    }

    /// 空白はページ下端で打ち切る
    fn space(&mut self, height: f32) {
        if !self.at_page_top() {
            self.y = (self.y - height).max(MARGIN_PT);
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text_line(
        &mut self,
        text: String,
        x: f32,
        font_size: f32,
        leading: f32,
        weight: FontWeight,
        color: RgbColor,
        block: Block,
    ) {
        self.ensure(leading);
        let baseline = self.y - font_size;
        self.push(DrawOp::Text(TextRun {
            text,
            x,
            y: baseline,
            font_size,
            weight,
            color,
            block,
        }));
        self.y -= leading;
    }

    fn section_header(&mut self, text: &str) {
        self.space(HEADER_SPACE_BEFORE);
        // 見出しだけがページ末尾に残らないようにする
        self.ensure(leading_for(HEADER_FONT_SIZE) + HEADER_SPACE_AFTER + BODY_LEADING);
        self.text_line(
            text.to_string(),
            MARGIN_PT,
            HEADER_FONT_SIZE,
            leading_for(HEADER_FONT_SIZE),
            FontWeight::Bold,
            HEADER_COLOR,
            Block::SectionHeader,
        );
        self.space(HEADER_SPACE_AFTER);
    }
}

/// レポートの描画計画を作成
pub fn plan_document(result: &AnalysisResult) -> DocumentPlan {
    let mut cursor = Cursor::new();

    // タイトル（中央揃え）
    let title_x = (PAGE_WIDTH_PT - text_width(PDF_TITLE, TITLE_FONT_SIZE)) / 2.0;
    cursor.text_line(
        PDF_TITLE.to_string(),
        title_x,
        TITLE_FONT_SIZE,
        leading_for(TITLE_FONT_SIZE),
        FontWeight::Bold,
        TITLE_COLOR,
        Block::Title,
    );
    cursor.space(TITLE_SPACE_AFTER + TITLE_SPACER);

    plan_metadata_table(&mut cursor, result);
    cursor.space(SECTION_SPACER);

    // 解析結果
    cursor.section_header(RESULTS_HEADER);
    let paragraphs = split_paragraphs(&result.report_text);
    for paragraph in &paragraphs {
        for line in wrap_text(paragraph, BODY_FONT_SIZE, FRAME_WIDTH_PT) {
            cursor.text_line(
                line,
                MARGIN_PT,
                BODY_FONT_SIZE,
                BODY_LEADING,
                FontWeight::Regular,
                BLACK,
                Block::Body,
            );
        }
        cursor.space(PARAGRAPH_SPACER);
    }
    cursor.space(SECTION_SPACER);

    // 免責事項
    cursor.section_header(DISCLAIMER_HEADER);
    cursor.space(DISCLAIMER_SPACE_BEFORE);
    let disclaimer_width = FRAME_WIDTH_PT - DISCLAIMER_INDENT * 2.0;
    for line in wrap_text(PDF_DISCLAIMER, BODY_FONT_SIZE, disclaimer_width) {
        cursor.text_line(
            line,
            MARGIN_PT + DISCLAIMER_INDENT,
            BODY_FONT_SIZE,
            BODY_LEADING,
            FontWeight::Regular,
            DISCLAIMER_COLOR,
            Block::Disclaimer,
        );
    }

    DocumentPlan {
        title: PDF_TITLE.to_string(),
        pages: cursor.pages,
        paragraph_count: paragraphs.len(),
    }
}

/// メタデータ表の列位置
struct TableGeometry {
    table_x: f32,
    value_x: f32,
    leading: f32,
}

/// メタデータ表（2列×4行、罫線あり）
///
/// 1ページに収まらない行は値の行単位でページをまたいで分割する。
/// ラベルは最初の区画にのみ描画する。
fn plan_metadata_table(cursor: &mut Cursor, result: &AnalysisResult) {
    let table_width = TABLE_LABEL_WIDTH_PT + TABLE_VALUE_WIDTH_PT;
    let table_x = MARGIN_PT + (FRAME_WIDTH_PT - table_width) / 2.0;
    let geometry = TableGeometry {
        table_x,
        value_x: table_x + TABLE_LABEL_WIDTH_PT,
        leading: leading_for(TABLE_FONT_SIZE),
    };
    let value_text_width = TABLE_VALUE_WIDTH_PT - TABLE_PADDING_LEFT * 2.0;

    for (label, value) in metadata_rows(result) {
        let mut value_lines = wrap_text(&value, TABLE_FONT_SIZE, value_text_width);
        if value_lines.is_empty() {
            value_lines.push(String::new());
        }

        let mut remaining = value_lines.as_slice();
        let mut row_label = Some(label);
        while !remaining.is_empty() {
            let needed = row_height(remaining.len(), geometry.leading);
            if needed > cursor.y - MARGIN_PT && !cursor.at_page_top() {
                // 新しいページに収まる行、または1行も入らない場合は改ページ
                let fits_fresh_page = needed <= Cursor::top() - MARGIN_PT;
                if fits_fresh_page || table_lines_fitting(cursor.y, geometry.leading) == 0 {
                    cursor.new_page();
                }
            }

            let take = table_lines_fitting(cursor.y, geometry.leading)
                .max(1)
                .min(remaining.len());
            let (segment, rest) = remaining.split_at(take);
            plan_table_row(cursor, &geometry, row_label.take(), segment);
            remaining = rest;
        }
    }
}

fn row_height(lines: usize, leading: f32) -> f32 {
    TABLE_PADDING_TOP + lines as f32 * leading + TABLE_PADDING_BOTTOM
}

/// 上端 `y` から下余白までに入る値の行数
fn table_lines_fitting(y: f32, leading: f32) -> usize {
    let available = y - MARGIN_PT - TABLE_PADDING_TOP - TABLE_PADDING_BOTTOM;
    if available <= 0.0 {
        0
    } else {
        (available / leading).floor() as usize
    }
}

fn plan_table_row(
    cursor: &mut Cursor,
    geometry: &TableGeometry,
    label: Option<&str>,
    value_lines: &[String],
) {
    let height = row_height(value_lines.len(), geometry.leading);
    let row_bottom = cursor.y - height;

    let label_cell = RectSpec {
        x: geometry.table_x,
        y: row_bottom,
        width: TABLE_LABEL_WIDTH_PT,
        height,
        color: TABLE_LABEL_BACKGROUND,
    };
    let value_cell = RectSpec {
        x: geometry.value_x,
        y: row_bottom,
        width: TABLE_VALUE_WIDTH_PT,
        height,
        color: TABLE_GRID_COLOR,
    };

    cursor.push(DrawOp::FillRect(label_cell.clone()));
    cursor.push(DrawOp::StrokeRect {
        rect: RectSpec { color: TABLE_GRID_COLOR, ..label_cell },
        line_width: TABLE_GRID_WIDTH,
    });
    cursor.push(DrawOp::StrokeRect {
        rect: value_cell,
        line_width: TABLE_GRID_WIDTH,
    });

    let first_baseline = cursor.y - TABLE_PADDING_TOP - TABLE_FONT_SIZE;
    if let Some(label) = label {
        cursor.push(DrawOp::Text(TextRun {
            text: label.to_string(),
            x: geometry.table_x + TABLE_PADDING_LEFT,
            y: first_baseline,
            font_size: TABLE_FONT_SIZE,
            weight: FontWeight::Regular,
            color: BLACK,
            block: Block::MetadataLabel,
        }));
    }
    for (i, line) in value_lines.iter().enumerate() {
        cursor.push(DrawOp::Text(TextRun {
            text: line.clone(),
            x: geometry.value_x + TABLE_PADDING_LEFT,
            y: first_baseline - i as f32 * geometry.leading,
            font_size: TABLE_FONT_SIZE,
            weight: FontWeight::Regular,
            color: BLACK,
            block: Block::MetadataValue,
        }));
    }

    cursor.y = row_bottom;
}
