//! printpdf-backed document surface
//!
//! Implements [`Canvas`] and [`MultiPageSurface`] on top of a printpdf op
//! stream. Pages are assembled in memory and serialized by `finish`; nothing
//! touches the filesystem here, so `abort` has no partial output to clean up.

use printpdf::{
    BuiltinFont, CurTransMat, Line, LinePoint, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Polygon, PolygonRing, Pt, TextItem, TextMatrix, WindingOrder,
};

use crate::surface::{Align, Canvas, MultiPageSurface, TextStyle};
use crate::transform::{PageSize, Rect, RenderTransform};
use crate::{ExportError, Result};

/// Approximate Helvetica advance as a fraction of the font size, used to
/// resolve centered and right-aligned anchors without shaping the text.
const CHAR_WIDTH_RATIO: f32 = 0.5;

pub struct PdfSurface {
    doc: PdfDocument,
    paper: PageSize,
    ops: Vec<Op>,
    page_open: bool,
}

impl PdfSurface {
    pub fn new(title: &str, paper: PageSize) -> Result<Self> {
        if paper.width <= 0.0 || paper.height <= 0.0 {
            return Err(ExportError::RenderInit(format!(
                "page size must be positive, got {}x{}",
                paper.width, paper.height
            )));
        }
        Ok(Self {
            doc: PdfDocument::new(title),
            paper,
            ops: Vec::new(),
            page_open: false,
        })
    }

    fn font_for(style: TextStyle) -> BuiltinFont {
        if style.bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        }
    }

    fn point(x: f32, y: f32) -> LinePoint {
        LinePoint {
            p: Point {
                x: Pt(x),
                y: Pt(y),
            },
            bezier: false,
        }
    }

    fn flush_page(&mut self) {
        if !self.page_open {
            return;
        }
        let mut ops = std::mem::take(&mut self.ops);
        ops.push(Op::RestoreGraphicsState);
        let paper = self.paper;
        let page_box = move || printpdf::Rect {
            x: Pt(0.0),
            y: Pt(0.0),
            width: Pt(paper.width),
            height: Pt(paper.height),
        };
        self.doc.pages.push(PdfPage {
            media_box: page_box(),
            trim_box: page_box(),
            crop_box: page_box(),
            ops,
        });
        self.page_open = false;
    }
}

impl Canvas for PdfSurface {
    fn draw_text(&mut self, x: f32, y: f32, style: TextStyle, align: Align, text: &str) {
        let font = Self::font_for(style);
        let width = text.chars().count() as f32 * style.size_pt * CHAR_WIDTH_RATIO;
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(style.size_pt),
            font,
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(y)),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![Self::point(x1, y1), Self::point(x2, y2)],
                is_closed: false,
            },
        });
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f32) {
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: vec![
                        Self::point(rect.x, rect.y),
                        Self::point(rect.right(), rect.y),
                        Self::point(rect.right(), rect.top()),
                        Self::point(rect.x, rect.top()),
                    ],
                }],
                mode: PaintMode::Stroke,
                winding_order: WindingOrder::NonZero,
            },
        });
    }
}

impl MultiPageSurface for PdfSurface {
    type Artifact = Vec<u8>;

    fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.paper.width, self.paper.height)
    }

    fn begin_page(&mut self, transform: RenderTransform) -> Result<()> {
        self.flush_page();
        self.page_open = true;
        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetTransformationMatrix {
            matrix: CurTransMat::Raw([
                transform.scale_x,
                0.0,
                0.0,
                transform.scale_y,
                transform.translate_x,
                transform.translate_y,
            ]),
        });
        Ok(())
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        self
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_page();
        let mut warnings = Vec::new();
        Ok(self.doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    // Pages only ever live in memory; dropping them is the whole cleanup.
    fn abort(self) {}
}
