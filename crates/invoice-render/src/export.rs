//! Multi-page export
//!
//! Walks a paginated document and drives one [`MultiPageSurface`], beginning
//! a fresh physical page per layout page. The surface is released on every
//! exit path; a failed or cancelled export leaves no partial artifact behind.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use invoice_layout::PaginatedDocument;

use crate::pdf::PdfSurface;
use crate::renderer::{FooterData, HeaderData, LineItem, PageRenderer};
use crate::surface::MultiPageSurface;
use crate::transform::FitStrategy;
use crate::{ExportError, Result};

/// Cooperative cancellation flag, polled between pages
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Render every page of `document` onto `surface` and return its artifact.
///
/// Fails up front with [`ExportError::UnsupportedFormat`] when a multi-page
/// document meets a single-page-only target, before anything is drawn.
/// Device errors mid-export and cancellation both abort the surface, so no
/// partially written output survives. The caller must not mutate `items`
/// while the export runs.
#[allow(clippy::too_many_arguments)]
pub fn export<S: MultiPageSurface>(
    document: &PaginatedDocument,
    items: &[LineItem],
    header: &HeaderData,
    footer: &FooterData,
    renderer: &PageRenderer,
    fit: FitStrategy,
    cancel: &CancelToken,
    mut surface: S,
) -> Result<S::Artifact> {
    if document.total_pages() > 1 && surface.single_page_only() {
        return Err(ExportError::UnsupportedFormat {
            pages: document.total_pages(),
        });
    }

    log::debug!(
        "exporting {} pages ({} items)",
        document.total_pages(),
        document.item_count()
    );

    for page in document.pages() {
        if cancel.is_cancelled() {
            log::debug!("export cancelled before page {}", page.number);
            surface.abort();
            return Err(ExportError::Cancelled);
        }

        let transform = fit.transform(renderer.page_size(), surface.page_rect());
        if let Err(cause) = surface.begin_page(transform) {
            log::warn!("output device failed on page {}: {}", page.number, cause);
            surface.abort();
            return Err(ExportError::PartialWrite(format!(
                "output device failed on page {}",
                page.number
            )));
        }

        renderer.render(page, items, header, footer, surface.canvas());
    }

    surface.finish()
}

/// Render the document to a PDF file, off the calling thread.
///
/// The PDF is assembled in memory and written in one pass; if the write
/// fails, the partial file is removed before the error is returned.
#[allow(clippy::too_many_arguments)]
pub async fn export_pdf_file(
    document: &PaginatedDocument,
    items: &[LineItem],
    header: &HeaderData,
    footer: &FooterData,
    renderer: &PageRenderer,
    fit: FitStrategy,
    cancel: &CancelToken,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let document = document.clone();
    let items = items.to_vec();
    let header = header.clone();
    let footer = footer.clone();
    let renderer = renderer.clone();
    let cancel = cancel.clone();
    let title = header.title.clone();
    let path = output_path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || {
        let surface = PdfSurface::new(&title, renderer.page_size())?;
        export(
            &document, &items, &header, &footer, &renderer, fit, &cancel, surface,
        )
    })
    .await??;

    if let Err(cause) = tokio::fs::write(&path, bytes).await {
        log::warn!("failed to write {}: {}", path.display(), cause);
        let _ = tokio::fs::remove_file(&path).await;
        return Err(ExportError::PartialWrite(format!(
            "could not write {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSurface;
    use crate::renderer::RenderOptions;
    use crate::surface::Canvas;
    use crate::transform::{Rect, RenderTransform, ScalePreset};
    use invoice_layout::LayoutConfig;

    fn fixture(item_count: usize) -> (PaginatedDocument, Vec<LineItem>, HeaderData, FooterData) {
        let config = LayoutConfig::new(10, 14, 21, 16).unwrap();
        let document = PaginatedDocument::new(item_count, &config).unwrap();
        let items = (0..item_count)
            .map(|i| LineItem::new([format!("Row {}", i), "2".into(), "50".into(), "100".into()]))
            .collect();
        let header = HeaderData {
            title: "Invoice".to_string(),
            fields: vec![],
        };
        let footer = FooterData {
            lines: vec![("Total".to_string(), "100".to_string())],
            note: None,
        };
        (document, items, header, footer)
    }

    fn page_rect() -> Rect {
        Rect::new(0.0, 0.0, 612.0, 792.0)
    }

    #[test]
    fn test_exports_one_surface_page_per_layout_page() {
        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        let pages = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            RecordingSurface::new(page_rect()),
        )
        .unwrap();

        assert_eq!(pages.len(), 3);
        // The row-less closing page still gets a physical page
        assert!(!pages[2].ops.is_empty());
    }

    #[test]
    fn test_stretch_transform_reaches_surface() {
        let (document, items, header, footer) = fixture(5);
        let renderer = PageRenderer::new(RenderOptions::default());

        let pages = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            RecordingSurface::new(page_rect()),
        )
        .unwrap();

        let expected = FitStrategy::Stretch.transform(renderer.page_size(), page_rect());
        assert_eq!(pages[0].transform, expected);
        assert_ne!(pages[0].transform.scale_x, pages[0].transform.scale_y);
    }

    #[test]
    fn test_uniform_transform_is_aspect_preserving() {
        let (document, items, header, footer) = fixture(5);
        let renderer = PageRenderer::new(RenderOptions::default());

        let pages = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::UniformCentered(ScalePreset::Reduced75),
            &CancelToken::new(),
            RecordingSurface::new(page_rect()),
        )
        .unwrap();

        assert_eq!(pages[0].transform.scale_x, pages[0].transform.scale_y);
    }

    #[test]
    fn test_multi_page_into_single_page_target_fails_before_drawing() {
        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        // fail_after(0) would error on the very first begin_page, so getting
        // UnsupportedFormat proves validation ran before any drawing.
        let result = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            RecordingSurface::new(page_rect()).single_page().fail_after(0),
        );

        assert!(matches!(
            result,
            Err(ExportError::UnsupportedFormat { pages: 3 })
        ));
    }

    #[test]
    fn test_single_page_document_into_snapshot_target() {
        let (document, items, header, footer) = fixture(5);
        let renderer = PageRenderer::new(RenderOptions::default());

        let pages = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            RecordingSurface::new(page_rect()).single_page(),
        )
        .unwrap();

        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_device_failure_becomes_partial_write() {
        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        let result = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            RecordingSurface::new(page_rect()).fail_after(1),
        );

        assert!(matches!(result, Err(ExportError::PartialWrite(_))));
    }

    /// Surface that flips the cancel token while a page is being begun,
    /// and records whether the device was released via `abort`.
    struct CancellingSurface {
        inner: RecordingSurface,
        token: CancelToken,
        cancel_after_pages: usize,
        aborted: Arc<AtomicBool>,
    }

    impl MultiPageSurface for CancellingSurface {
        type Artifact = ();

        fn page_rect(&self) -> Rect {
            self.inner.page_rect()
        }

        fn begin_page(&mut self, transform: RenderTransform) -> Result<()> {
            self.inner.begin_page(transform)?;
            self.cancel_after_pages -= 1;
            if self.cancel_after_pages == 0 {
                self.token.cancel();
            }
            Ok(())
        }

        fn canvas(&mut self) -> &mut dyn Canvas {
            self.inner.canvas()
        }

        fn finish(self) -> Result<()> {
            panic!("cancelled export must not finish");
        }

        fn abort(self) {
            self.aborted.store(true, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_cancellation_after_first_page_releases_device() {
        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        let token = CancelToken::new();
        let aborted = Arc::new(AtomicBool::new(false));
        let surface = CancellingSurface {
            inner: RecordingSurface::new(page_rect()),
            token: token.clone(),
            cancel_after_pages: 1,
            aborted: aborted.clone(),
        };

        let result = export(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &token,
            surface,
        );

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert!(aborted.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_export_pdf_file_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");

        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        export_pdf_file(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &CancelToken::new(),
            &path,
        )
        .await
        .unwrap();

        let bytes = tokio::fs::read(&path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_cancelled_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");

        let (document, items, header, footer) = fixture(31);
        let renderer = PageRenderer::new(RenderOptions::default());

        let token = CancelToken::new();
        token.cancel();

        let result = export_pdf_file(
            &document,
            &items,
            &header,
            &footer,
            &renderer,
            FitStrategy::Stretch,
            &token,
            &path,
        )
        .await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert!(!path.exists());
    }
}
