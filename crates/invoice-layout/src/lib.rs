mod config;
mod navigator;
mod paginate;

pub use config::LayoutConfig;
pub use navigator::Navigator;
pub use paginate::{Page, PaginatedDocument, compute_total_pages, item_range_for_page};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    Config(String),
    #[error("Page {requested} is out of range (document has {total} pages)")]
    PageOutOfRange { requested: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
