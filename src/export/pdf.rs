use crate::error::{GenxError, Result};
use genx_common::export::pdf_core::{plan_document, DocumentPlan, DrawOp, FontWeight, RectSpec};
use genx_common::layout::{pt_to_mm, RgbColor, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use genx_common::AnalysisResult;
use printpdf::path::PaintMode;
use printpdf::*;

/// PDFレポートを生成してバイト列で返す
pub fn generate_pdf(result: &AnalysisResult) -> Result<Vec<u8>> {
    paint_document(&plan_document(result))
}

/// 描画計画をPDFに描画
pub fn paint_document(plan: &DocumentPlan) -> Result<Vec<u8>> {
    let page_width = Mm(pt_to_mm(PAGE_WIDTH_PT));
    let page_height = Mm(pt_to_mm(PAGE_HEIGHT_PT));

    let (doc, page1, layer1) =
        PdfDocument::new(plan.title.as_str(), page_width, page_height, "Layer 1");

    // 標準14フォント（埋め込み不要）
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| GenxError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| GenxError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page_idx, layer_idx) = doc.add_page(page_width, page_height, "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for op in &page.ops {
            match op {
                DrawOp::Text(run) => {
                    let font = match run.weight {
                        FontWeight::Regular => &regular,
                        FontWeight::Bold => &bold,
                    };
                    layer.set_fill_color(to_color(run.color));
                    layer.use_text(
                        pdf_safe_text(&run.text),
                        run.font_size,
                        Mm(pt_to_mm(run.x)),
                        Mm(pt_to_mm(run.y)),
                        font,
                    );
                }
                DrawOp::FillRect(rect) => {
                    layer.set_fill_color(to_color(rect.color));
                    layer.add_rect(to_rect(rect).with_mode(PaintMode::Fill));
                }
                DrawOp::StrokeRect { rect, line_width } => {
                    layer.set_outline_color(to_color(rect.color));
                    layer.set_outline_thickness(*line_width);
                    layer.add_rect(to_rect(rect).with_mode(PaintMode::Stroke));
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| GenxError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
}

fn to_color(color: RgbColor) -> Color {
    Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

fn to_rect(rect: &RectSpec) -> Rect {
    Rect::new(
        Mm(pt_to_mm(rect.x)),
        Mm(pt_to_mm(rect.y)),
        Mm(pt_to_mm(rect.x + rect.width)),
        Mm(pt_to_mm(rect.y + rect.height)),
    )
}

/// 標準フォント（WinAnsi）で出せない文字を置換
fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2022}' | '\u{25CF}' => '*',
            '\u{00A0}' | '\t' => ' ',
            c if (' '..='~').contains(&c) || ('\u{00A1}'..='\u{00FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}
