mod export;
mod pdf;
mod recording;
mod renderer;
mod surface;
mod transform;

pub use export::{CancelToken, export, export_pdf_file};
pub use pdf::PdfSurface;
pub use recording::{DrawOp, RecordedPage, RecordingSurface};
pub use renderer::{FooterData, HeaderData, LineItem, PageRenderer, RenderOptions, TableColumn};
pub use surface::{Align, Canvas, Cell, MultiPageSurface, TableSpec, TextStyle};
pub use transform::{FitStrategy, PageSize, Rect, RenderTransform, ScalePreset};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Drawing surface failed to initialize: {0}")]
    RenderInit(String),
    #[error("Document has {pages} pages but the target holds a single page only")]
    UnsupportedFormat { pages: usize },
    #[error("Export cancelled")]
    Cancelled,
    #[error("Export failed after partial write: {0}")]
    PartialWrite(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
