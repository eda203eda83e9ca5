//! In-memory surface for tests and single-page snapshots
//!
//! Captures draw calls instead of producing device output. A host that wants
//! a raster snapshot replays the recorded ops onto its own pixel canvas; the
//! engine never encodes pixels itself. The snapshot flavour holds exactly one
//! page, which is what makes multi-page documents an invalid target for it.

use crate::surface::{Align, Canvas, MultiPageSurface, TextStyle};
use crate::transform::{Rect, RenderTransform};
use crate::{ExportError, Result};

/// One captured draw call, in logical page coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size_pt: f32,
        bold: bool,
        align: Align,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },
    Rect {
        rect: Rect,
        thickness: f32,
    },
}

/// All draw calls for one page plus the transform it was begun with
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub transform: RenderTransform,
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    page_rect: Rect,
    single_page: bool,
    fail_after_pages: Option<usize>,
    pages: Vec<RecordedPage>,
}

impl RecordingSurface {
    pub fn new(page_rect: Rect) -> Self {
        Self {
            page_rect,
            single_page: false,
            fail_after_pages: None,
            pages: Vec::new(),
        }
    }

    /// Mark the surface as a single-page snapshot target
    pub fn single_page(mut self) -> Self {
        self.single_page = true;
        self
    }

    /// Test hook: `begin_page` fails once `pages` pages have been started
    pub fn fail_after(mut self, pages: usize) -> Self {
        self.fail_after_pages = Some(pages);
        self
    }
}

impl Canvas for RecordingSurface {
    fn draw_text(&mut self, x: f32, y: f32, style: TextStyle, align: Align, text: &str) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(DrawOp::Text {
                x,
                y,
                size_pt: style.size_pt,
                bold: style.bold,
                align,
                text: text.to_string(),
            });
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
            });
        }
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(DrawOp::Rect { rect, thickness });
        }
    }
}

impl MultiPageSurface for RecordingSurface {
    type Artifact = Vec<RecordedPage>;

    fn page_rect(&self) -> Rect {
        self.page_rect
    }

    fn single_page_only(&self) -> bool {
        self.single_page
    }

    fn begin_page(&mut self, transform: RenderTransform) -> Result<()> {
        if self.fail_after_pages == Some(self.pages.len()) {
            return Err(ExportError::Io(std::io::Error::other(
                "simulated device failure",
            )));
        }
        if self.single_page && !self.pages.is_empty() {
            return Err(ExportError::UnsupportedFormat {
                pages: self.pages.len() + 1,
            });
        }
        self.pages.push(RecordedPage {
            transform,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        self
    }

    fn finish(self) -> Result<Vec<RecordedPage>> {
        Ok(self.pages)
    }

    fn abort(self) {}
}
