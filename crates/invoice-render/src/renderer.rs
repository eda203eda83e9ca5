//! Invoice page rendering
//!
//! Draws one laid-out page onto a [`Canvas`]. The header block appears only
//! on the first page, the summary block only on the last, and every other
//! page ends with a continuation marker. Row numbers are the absolute
//! position in the full item list plus one; they are never restarted per
//! page.

use invoice_layout::Page;

use crate::surface::{Align, Canvas, Cell, TableSpec, TextStyle};
use crate::transform::{PageSize, Rect};

/// One invoice row, already formatted for display.
///
/// The engine identifies a row solely by its position in the full list; the
/// cell texts are opaque (pricing and locale formatting happen upstream).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineItem {
    pub cells: Vec<String>,
}

impl LineItem {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// One column of the line-item table
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub title: String,
    pub width: f32,
    pub align: Align,
}

impl TableColumn {
    pub fn new(title: impl Into<String>, width: f32, align: Align) -> Self {
        Self {
            title: title.into(),
            width,
            align,
        }
    }
}

/// Header block content: document title plus label/value pairs
/// (invoice number, date, customer)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderData {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

/// Closing summary block: label/value totals plus an optional note
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FooterData {
    pub lines: Vec<(String, String)>,
    pub note: Option<String>,
}

/// Visual knobs for page rendering, passed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub margin_pt: f32,
    pub title_size_pt: f32,
    pub body_size_pt: f32,
    pub row_height_pt: f32,
    /// Leftmost column is the row number; the rest hold the item cells
    pub columns: Vec<TableColumn>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let page_size = PageSize::A4;
        let margin_pt = 36.0;
        let content_width = page_size.width - 2.0 * margin_pt;
        Self {
            page_size,
            margin_pt,
            title_size_pt: 16.0,
            body_size_pt: 10.0,
            row_height_pt: 18.0,
            columns: vec![
                TableColumn::new("#", 40.0, Align::Center),
                TableColumn::new("Description", content_width - 280.0, Align::Left),
                TableColumn::new("Qty", 60.0, Align::Center),
                TableColumn::new("Unit Price", 90.0, Align::Right),
                TableColumn::new("Total", 90.0, Align::Right),
            ],
        }
    }
}

const CONTINUED_MARKER: &str = "Continued on next page";

/// Draws one page's header, rows, and summary onto a canvas.
///
/// Rendering is a pure side effect on the supplied canvas; the renderer
/// itself holds no mutable state and can be reused across pages and exports.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    options: RenderOptions,
}

impl PageRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Logical page size the renderer draws in
    pub fn page_size(&self) -> PageSize {
        self.options.page_size
    }

    /// Draw `page` onto `canvas`. `items` is the full item list; the rows for
    /// this page are taken from `page.item_range()`.
    pub fn render(
        &self,
        page: &Page,
        items: &[LineItem],
        header: &HeaderData,
        footer: &FooterData,
        canvas: &mut dyn Canvas,
    ) {
        let o = &self.options;
        let left = o.margin_pt;
        let right = o.page_size.width - o.margin_pt;
        let body = TextStyle::plain(o.body_size_pt);
        let mut y = o.page_size.height - o.margin_pt;

        if page.is_first {
            y -= o.title_size_pt;
            canvas.draw_text(
                o.page_size.width / 2.0,
                y,
                TextStyle::bold(o.title_size_pt),
                Align::Center,
                &header.title,
            );
            y -= o.title_size_pt;
            for (label, value) in &header.fields {
                y -= o.body_size_pt * 1.5;
                canvas.draw_text(left, y, body, Align::Left, label);
                canvas.draw_text(left + 140.0, y, body, Align::Left, value);
            }
            y -= o.body_size_pt;
        }

        if !page.is_empty() {
            y = self.render_table(page, items, y, canvas);
        }

        if page.is_last {
            for (label, value) in &footer.lines {
                y -= o.body_size_pt * 1.8;
                canvas.draw_text(right - 200.0, y, body, Align::Left, label);
                canvas.draw_text(right, y, body, Align::Right, value);
            }
            if let Some(note) = &footer.note {
                y -= o.body_size_pt * 2.5;
                canvas.draw_text(left, y, body, Align::Left, note);
            }
        } else {
            canvas.draw_text(right, o.margin_pt, body, Align::Right, CONTINUED_MARKER);
        }
    }

    /// Draw the column header row and this page's item rows; returns the new
    /// cursor position below the table.
    fn render_table(
        &self,
        page: &Page,
        items: &[LineItem],
        y: f32,
        canvas: &mut dyn Canvas,
    ) -> f32 {
        let o = &self.options;
        let widths: Vec<f32> = o.columns.iter().map(|c| c.width).collect();
        let table_width: f32 = widths.iter().sum();

        let header_row: Vec<Cell> = o
            .columns
            .iter()
            .map(|col| Cell::new(col.title.clone(), Align::Center))
            .collect();
        canvas.draw_table(&TableSpec {
            rect: Rect::new(o.margin_pt, y - o.row_height_pt, table_width, o.row_height_pt),
            row_height: o.row_height_pt,
            columns: widths.clone(),
            rows: vec![header_row],
            style: TextStyle::bold(o.body_size_pt),
            rules: true,
        });
        let y = y - o.row_height_pt;

        let mut rows = Vec::with_capacity(page.row_count());
        for (offset, item) in items[page.item_range()].iter().enumerate() {
            let absolute = page.start + offset;
            let mut row = Vec::with_capacity(o.columns.len());
            row.push(Cell::new((absolute + 1).to_string(), o.columns[0].align));
            for (text, col) in item.cells.iter().zip(o.columns.iter().skip(1)) {
                row.push(Cell::new(text.clone(), col.align));
            }
            rows.push(row);
        }

        let used = rows.len() as f32 * o.row_height_pt;
        canvas.draw_table(&TableSpec {
            rect: Rect::new(o.margin_pt, y - used, table_width, used),
            row_height: o.row_height_pt,
            columns: widths,
            rows,
            style: TextStyle::plain(o.body_size_pt),
            rules: true,
        });

        y - used - o.body_size_pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawOp, RecordedPage, RecordingSurface};
    use crate::surface::MultiPageSurface;
    use crate::transform::RenderTransform;
    use invoice_layout::{LayoutConfig, PaginatedDocument};

    fn items(count: usize) -> Vec<LineItem> {
        (0..count)
            .map(|i| LineItem::new([format!("Service {}", i), "2".into(), "100".into(), "200".into()]))
            .collect()
    }

    fn header() -> HeaderData {
        HeaderData {
            title: "Invoice".to_string(),
            fields: vec![("Customer".to_string(), "Acme".to_string())],
        }
    }

    fn footer() -> FooterData {
        FooterData {
            lines: vec![("Grand total".to_string(), "1,200".to_string())],
            note: Some("Payable within 30 days".to_string()),
        }
    }

    fn render_page(item_count: usize, page_number: usize) -> Vec<DrawOp> {
        let config = LayoutConfig::new(10, 14, 21, 16).unwrap();
        let doc = PaginatedDocument::new(item_count, &config).unwrap();
        let items = items(item_count);
        let renderer = PageRenderer::new(RenderOptions::default());

        let mut surface = RecordingSurface::new(Rect::new(0.0, 0.0, 595.0, 842.0));
        surface.begin_page(RenderTransform::IDENTITY).unwrap();
        renderer.render(
            doc.page(page_number).unwrap(),
            &items,
            &header(),
            &footer(),
            surface.canvas(),
        );
        let mut pages: Vec<RecordedPage> = surface.finish().unwrap();
        pages.remove(0).ops
    }

    fn texts(ops: &[DrawOp]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_compact_page_has_header_and_summary() {
        let texts = texts(&render_page(5, 1));
        assert!(texts.contains(&"Invoice".to_string()));
        assert!(texts.contains(&"Grand total".to_string()));
        assert!(!texts.contains(&CONTINUED_MARKER.to_string()));
    }

    #[test]
    fn test_first_of_many_has_no_summary() {
        let texts = texts(&render_page(30, 1));
        assert!(texts.contains(&"Invoice".to_string()));
        assert!(texts.contains(&CONTINUED_MARKER.to_string()));
        assert!(!texts.contains(&"Grand total".to_string()));
    }

    #[test]
    fn test_row_numbers_are_absolute() {
        // Page 2 of a 30-item document holds rows 14..30; the first rendered
        // row number must be 15, not 1.
        let texts = texts(&render_page(30, 2));
        assert!(texts.contains(&"15".to_string()));
        assert!(texts.contains(&"30".to_string()));
        assert!(!texts.contains(&"1".to_string()));
        assert!(texts.contains(&"Service 14".to_string()));
    }

    #[test]
    fn test_empty_closing_page_is_summary_only() {
        // 12 items produce a row-less second page that hosts the summary.
        let ops = render_page(12, 2);
        let texts = texts(&ops);
        assert!(texts.contains(&"Grand total".to_string()));
        assert!(texts.contains(&"Payable within 30 days".to_string()));
        assert!(!texts.contains(&"Invoice".to_string()));
        // No table at all: no column headers, no rules
        assert!(!texts.contains(&"Description".to_string()));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn test_middle_page_has_rows_only() {
        let texts = texts(&render_page(60, 2));
        assert!(!texts.contains(&"Invoice".to_string()));
        assert!(!texts.contains(&"Grand total".to_string()));
        assert!(texts.contains(&CONTINUED_MARKER.to_string()));
        assert!(texts.contains(&"Service 14".to_string()));
    }
}
