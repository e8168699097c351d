//! PDF rendering for transaction reports.
//!
//! Branded header band, period/filter banner, summary block, paginated
//! table with repeating header and alternating row shading, diagonal
//! watermark, and a page-numbered footer. Coordinates here are page
//! geometry, not money.

#![allow(clippy::float_arithmetic, clippy::cast_precision_loss)]

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb, TextMatrix,
};

use super::error::ReportError;
use super::types::{ReportTransaction, TransactionReport};

// A4 portrait.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;

const HEADER_BAND_HEIGHT: f32 = 30.0;
const FIRST_PAGE_TABLE_TOP: f32 = 74.0;
const CONT_PAGE_TABLE_TOP: f32 = 24.0;
const TABLE_HEADER_HEIGHT: f32 = 8.0;
const ROW_HEIGHT: f32 = 7.0;
const FOOTER_TOP: f32 = 281.0;

/// Rows that fit under the heading blocks on the first page.
const FIRST_PAGE_ROWS: usize = 28;
/// Rows that fit on a continuation page.
const CONT_PAGE_ROWS: usize = 35;

// Column x positions; the amount column is right-aligned at the
// table's right edge.
const COL_DATE_X: f32 = MARGIN + 2.0;
const COL_CATEGORY_X: f32 = 40.0;
const COL_DESCRIPTION_X: f32 = 72.0;
const COL_METHOD_X: f32 = 118.0;
const COL_PARTY_X: f32 = 138.0;
const TABLE_RIGHT_X: f32 = PAGE_WIDTH - MARGIN - 2.0;

/// Renderer for branded transaction report PDFs.
pub struct PdfRenderer;

impl PdfRenderer {
    /// Renders a transaction report to PDF bytes.
    ///
    /// Pure given its input: the rows and the generation timestamp are
    /// supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::RenderFailed` if the PDF backend fails.
    pub fn render(report: &TransactionReport) -> Result<Vec<u8>, ReportError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Transaction Report",
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::RenderFailed(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::RenderFailed(e.to_string()))?;

        let pages = paginate(&report.transactions);
        let total_pages = pages.len();

        for (page_index, rows) in pages.into_iter().enumerate() {
            let layer = if page_index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            draw_watermark(&layer, &bold);

            let table_top = if page_index == 0 {
                draw_heading(&layer, &regular, &bold, report);
                FIRST_PAGE_TABLE_TOP
            } else {
                CONT_PAGE_TABLE_TOP
            };

            draw_table(&layer, &regular, &bold, rows, table_top);
            draw_footer(&layer, &regular, &bold, report, page_index + 1, total_pages);
        }

        doc.save_to_bytes()
            .map_err(|e| ReportError::RenderFailed(e.to_string()))
    }
}

/// Splits rows into per-page slices. Always yields at least one page.
fn paginate(rows: &[ReportTransaction]) -> Vec<&[ReportTransaction]> {
    let (first, rest) = rows.split_at(rows.len().min(FIRST_PAGE_ROWS));
    let mut pages = vec![first];
    pages.extend(rest.chunks(CONT_PAGE_ROWS));
    pages
}

fn draw_watermark(layer: &PdfLayerReference, bold: &IndirectFontRef) {
    layer.set_fill_color(watermark_color());
    layer.begin_text_section();
    layer.set_font(bold, 72.0);
    layer.set_text_matrix(TextMatrix::TranslateRotate(
        Mm(55.0).into(),
        Mm(95.0).into(),
        45.0,
    ));
    layer.write_text("ORBIT", bold);
    layer.end_text_section();
}

fn draw_heading(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    report: &TransactionReport,
) {
    // Brand band across the top.
    layer.set_fill_color(brand_color());
    layer.add_rect(
        Rect::new(
            Mm(0.0),
            mm_from_top(HEADER_BAND_HEIGHT),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
        )
        .with_mode(PaintMode::Fill),
    );

    layer.set_fill_color(white());
    layer.use_text("ORBIT", 22.0, Mm(MARGIN), mm_from_top(13.5), bold);
    layer.use_text(
        "Transaction Management System",
        9.0,
        Mm(MARGIN),
        mm_from_top(20.5),
        regular,
    );
    let title = "TRANSACTION REPORT";
    layer.use_text(
        title,
        13.0,
        Mm(PAGE_WIDTH - MARGIN - text_width(title, 13.0)),
        mm_from_top(17.0),
        bold,
    );

    // Period and filter banner.
    layer.set_fill_color(text_color());
    let period = match (report.filter.from_date, report.filter.to_date) {
        (Some(from), Some(to)) => format!("Period: {from} to {to}"),
        (Some(from), None) => format!("Period: from {from}"),
        (None, Some(to)) => format!("Period: until {to}"),
        (None, None) => "Period: all transactions".to_string(),
    };
    layer.use_text(period, 10.0, Mm(MARGIN), mm_from_top(38.5), bold);

    let mut filters = Vec::new();
    if let Some(category) = &report.filter.category {
        filters.push(format!("category {category}"));
    }
    if let Some(method) = &report.filter.payment_method {
        filters.push(format!("payment method {method}"));
    }
    if !filters.is_empty() {
        layer.use_text(
            format!("Filters: {}", filters.join(", ")),
            9.0,
            Mm(MARGIN),
            mm_from_top(44.5),
            regular,
        );
    }

    layer.set_fill_color(muted_color());
    layer.use_text(
        format!(
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        8.5,
        Mm(MARGIN),
        mm_from_top(50.0),
        regular,
    );

    // Summary block.
    layer.set_fill_color(summary_background());
    layer.add_rect(
        Rect::new(
            Mm(MARGIN),
            mm_from_top(68.0),
            Mm(PAGE_WIDTH - MARGIN),
            mm_from_top(54.0),
        )
        .with_mode(PaintMode::Fill),
    );

    layer.set_fill_color(muted_color());
    layer.use_text("Total Transactions", 8.0, Mm(MARGIN + 6.0), mm_from_top(59.5), regular);
    layer.use_text("Total Amount", 8.0, Mm(MARGIN + 76.0), mm_from_top(59.5), regular);

    layer.set_fill_color(text_color());
    layer.use_text(
        report.summary.count.to_string(),
        12.0,
        Mm(MARGIN + 6.0),
        mm_from_top(65.5),
        bold,
    );
    layer.use_text(
        format!("{:.2}", report.summary.total_amount),
        12.0,
        Mm(MARGIN + 76.0),
        mm_from_top(65.5),
        bold,
    );
}

fn draw_table(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    rows: &[ReportTransaction],
    table_top: f32,
) {
    // Repeating header row.
    layer.set_fill_color(brand_color());
    layer.add_rect(
        Rect::new(
            Mm(MARGIN),
            mm_from_top(table_top + TABLE_HEADER_HEIGHT),
            Mm(PAGE_WIDTH - MARGIN),
            mm_from_top(table_top),
        )
        .with_mode(PaintMode::Fill),
    );

    layer.set_fill_color(white());
    let label_y = mm_from_top(table_top + 5.5);
    layer.use_text("Date", 9.0, Mm(COL_DATE_X), label_y, bold);
    layer.use_text("Category", 9.0, Mm(COL_CATEGORY_X), label_y, bold);
    layer.use_text("Description", 9.0, Mm(COL_DESCRIPTION_X), label_y, bold);
    layer.use_text("Method", 9.0, Mm(COL_METHOD_X), label_y, bold);
    layer.use_text("Party", 9.0, Mm(COL_PARTY_X), label_y, bold);
    layer.use_text(
        "Amount",
        9.0,
        Mm(TABLE_RIGHT_X - text_width("Amount", 9.0)),
        label_y,
        bold,
    );

    if rows.is_empty() {
        layer.set_fill_color(muted_color());
        let message = "No transactions found";
        layer.use_text(
            message,
            10.0,
            Mm((PAGE_WIDTH - text_width(message, 10.0)) / 2.0),
            mm_from_top(table_top + 22.0),
            regular,
        );
        return;
    }

    let mut row_top = table_top + TABLE_HEADER_HEIGHT;
    for (index, row) in rows.iter().enumerate() {
        if index % 2 == 1 {
            layer.set_fill_color(row_shade_color());
            layer.add_rect(
                Rect::new(
                    Mm(MARGIN),
                    mm_from_top(row_top + ROW_HEIGHT),
                    Mm(PAGE_WIDTH - MARGIN),
                    mm_from_top(row_top),
                )
                .with_mode(PaintMode::Fill),
            );
        }

        layer.set_fill_color(text_color());
        let baseline = mm_from_top(row_top + 5.0);
        layer.use_text(
            row.date.format("%Y-%m-%d").to_string(),
            8.5,
            Mm(COL_DATE_X),
            baseline,
            regular,
        );
        layer.use_text(
            truncate(&row.category, 19),
            8.5,
            Mm(COL_CATEGORY_X),
            baseline,
            regular,
        );
        let description = row.description.as_deref().unwrap_or("-");
        layer.use_text(
            truncate(description, 27),
            8.5,
            Mm(COL_DESCRIPTION_X),
            baseline,
            regular,
        );
        layer.use_text(
            row.payment_method.as_str(),
            8.5,
            Mm(COL_METHOD_X),
            baseline,
            regular,
        );
        layer.use_text(
            truncate(&row.party_name, 19),
            8.5,
            Mm(COL_PARTY_X),
            baseline,
            regular,
        );
        let amount = format!("{:.2}", row.amount);
        layer.use_text(
            amount.as_str(),
            8.5,
            Mm(TABLE_RIGHT_X - text_width(&amount, 8.5)),
            baseline,
            regular,
        );

        row_top += ROW_HEIGHT;
    }
}

fn draw_footer(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    report: &TransactionReport,
    page: usize,
    total_pages: usize,
) {
    layer.set_outline_color(line_color());
    layer.set_outline_thickness(0.4);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), mm_from_top(FOOTER_TOP)), false),
            (
                Point::new(Mm(PAGE_WIDTH - MARGIN), mm_from_top(FOOTER_TOP)),
                false,
            ),
        ],
        is_closed: false,
    });

    layer.set_fill_color(muted_color());
    layer.use_text(
        format!(
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        7.5,
        Mm(MARGIN),
        mm_from_top(287.0),
        regular,
    );

    let label = format!("Page {page} of {total_pages}");
    layer.use_text(
        label.as_str(),
        7.5,
        Mm((PAGE_WIDTH - text_width(&label, 7.5)) / 2.0),
        mm_from_top(287.0),
        regular,
    );

    layer.use_text(
        "ORBIT",
        7.5,
        Mm(TABLE_RIGHT_X - text_width("ORBIT", 7.5)),
        mm_from_top(287.0),
        bold,
    );
}

/// Shortens text to at most `max_chars`, appending an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

// Average glyph width for Helvetica, good enough for alignment.
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * 0.352_778
}

// The PDF origin is the bottom-left corner; layout works from the top.
fn mm_from_top(from_top: f32) -> Mm {
    Mm(PAGE_HEIGHT - from_top)
}

fn brand_color() -> Color {
    Color::Rgb(Rgb::new(0.145, 0.388, 0.922, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.15, 0.17, 0.21, None))
}

fn muted_color() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.47, 0.5, None))
}

fn row_shade_color() -> Color {
    Color::Rgb(Rgb::new(0.955, 0.96, 0.97, None))
}

fn summary_background() -> Color {
    Color::Rgb(Rgb::new(0.93, 0.94, 0.96, None))
}

fn watermark_color() -> Color {
    Color::Rgb(Rgb::new(0.92, 0.92, 0.94, None))
}

fn line_color() -> Color {
    Color::Rgb(Rgb::new(0.78, 0.8, 0.83, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Office", 19), "Office");
    }

    #[test]
    fn test_truncate_long_text_gets_ellipsis() {
        let long = "A very long category name that overflows";
        let result = truncate(long, 19);
        assert_eq!(result.chars().count(), 19);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_paginate_empty_yields_one_page() {
        let pages = paginate(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }
}
