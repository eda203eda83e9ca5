//! Drawing surface abstractions
//!
//! The engine draws through these traits and never touches a concrete
//! graphics toolkit. `Canvas` is one page worth of drawing primitives in
//! logical page coordinates; `MultiPageSurface` is a paginated output device
//! (PDF document, printer job, raster snapshot) that hands out a canvas per
//! page.

use crate::Result;
use crate::transform::{Rect, RenderTransform};

/// Horizontal alignment for text and table cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Text style for canvas text calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn plain(size_pt: f32) -> Self {
        Self {
            size_pt,
            bold: false,
        }
    }

    pub fn bold(size_pt: f32) -> Self {
        Self {
            size_pt,
            bold: true,
        }
    }
}

/// One table cell: preformatted text plus its alignment
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }
}

/// A tabular grid of rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Area the grid occupies; rows are laid out from the top edge down
    pub rect: Rect,
    pub row_height: f32,
    /// Column widths, left to right; must match the cell count per row
    pub columns: Vec<f32>,
    pub rows: Vec<Vec<Cell>>,
    pub style: TextStyle,
    /// Draw the grid rules around cells
    pub rules: bool,
}

/// Horizontal padding between a rule and cell text
const CELL_PAD: f32 = 4.0;

/// Abstract 2-D drawing surface for a single page.
///
/// Coordinates are logical page points, origin at the bottom-left. Font
/// shaping and text measurement stay inside the backend; `draw_text` takes an
/// anchor point whose meaning follows `align`.
pub trait Canvas {
    /// Draw `text` anchored at (`x`, `y`); `align` selects which edge of the
    /// text sits on the anchor.
    fn draw_text(&mut self, x: f32, y: f32, style: TextStyle, align: Align, text: &str);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32);

    fn draw_rect(&mut self, rect: Rect, thickness: f32);

    /// Draw a tabular grid. The default places each cell with `draw_text` and
    /// strokes the rules with `draw_line`; backends with a native table
    /// primitive may override.
    fn draw_table(&mut self, table: &TableSpec) {
        let top = table.rect.top();
        let total_width: f32 = table.columns.iter().sum();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_top = top - row_idx as f32 * table.row_height;
            let text_y = row_top - table.row_height
                + (table.row_height - table.style.size_pt) / 2.0;

            let mut x = table.rect.x;
            for (cell, &width) in row.iter().zip(&table.columns) {
                let anchor = match cell.align {
                    Align::Left => x + CELL_PAD,
                    Align::Center => x + width / 2.0,
                    Align::Right => x + width - CELL_PAD,
                };
                self.draw_text(anchor, text_y, table.style, cell.align, &cell.text);
                x += width;
            }
        }

        if table.rules && !table.rows.is_empty() {
            let bottom = top - table.rows.len() as f32 * table.row_height;
            for i in 0..=table.rows.len() {
                let y = top - i as f32 * table.row_height;
                self.draw_line(table.rect.x, y, table.rect.x + total_width, y, 0.5);
            }
            let mut x = table.rect.x;
            self.draw_line(x, bottom, x, top, 0.5);
            for &width in &table.columns {
                x += width;
                self.draw_line(x, bottom, x, top, 0.5);
            }
        }
    }
}

/// A paginated output device.
///
/// One export owns one surface: the coordinator calls `begin_page` before
/// drawing each page and ends the export with exactly one of `finish` or
/// `abort`, so the device is released on every exit path.
pub trait MultiPageSurface {
    /// What `finish` produces: document bytes, captured ops, a spooled job id
    type Artifact;

    /// Physical page rect, same unit system as `Canvas`
    fn page_rect(&self) -> Rect;

    /// True when the device holds exactly one page (raster snapshot)
    fn single_page_only(&self) -> bool {
        false
    }

    /// Start the next physical page; subsequent canvas calls draw onto it
    /// through `transform`.
    fn begin_page(&mut self, transform: RenderTransform) -> Result<()>;

    /// Canvas for the page most recently begun
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Flush everything and release the device
    fn finish(self) -> Result<Self::Artifact>;

    /// Release the device and discard any partially written output
    fn abort(self);
}
