//! Drives a [`DocumentSession`] through load, edit and export.
//!
//! All engine calls are awaited one after another. Only one page raster is
//! in flight at a time while rendering, and export progress grows linearly
//! with the number of pages copied.

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::config::RemoverConfig;
use crate::engine::{ConstructionEngine, DecodingEngine};
use crate::error::{EngineError, RemoverError};
use crate::filename::output_file_name;
use crate::presenter::{Presenter, Tile, ViewState};
use crate::session::DocumentSession;
use crate::source::FileSource;
use crate::validation::check_upload;

/// What a successful export produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub file_name: String,
    pub page_count: usize,
    pub byte_len: usize,
}

pub struct WorkflowController<D, C, P> {
    config: RemoverConfig,
    decoder: D,
    builder: C,
    presenter: P,
    session: DocumentSession,
}

impl<D, C, P> WorkflowController<D, C, P>
where
    D: DecodingEngine,
    C: ConstructionEngine,
    P: Presenter<Raster = D::Raster>,
{
    pub fn new(
        config: RemoverConfig,
        decoder: D,
        builder: C,
        mut presenter: P,
    ) -> Result<Self, RemoverError> {
        config.validate()?;
        presenter.set_view(ViewState::Empty);
        Ok(Self {
            config,
            decoder,
            builder,
            presenter,
            session: DocumentSession::new(),
        })
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    pub fn config(&self) -> &RemoverConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Loads `file` and renders a thumbnail for each of its pages.
    ///
    /// A rejected upload leaves the current session untouched. Any failure
    /// past that point clears the session.
    pub async fn load<F: FileSource>(&mut self, file: &F) -> Result<(), RemoverError> {
        if let Err(err) = check_upload(file, &self.config) {
            warn!("Rejected upload {:?}: {}", file.name(), err);
            self.presenter.notify(&err.to_string(), true);
            return Err(err);
        }

        self.session.reset();
        self.presenter.clear_tiles();
        self.presenter.set_view(ViewState::Loading);

        match self.load_accepted(file).await {
            Ok(()) => {
                self.presenter.set_view(ViewState::Editing);
                self.presenter.notify("PDF loaded successfully", false);
                Ok(())
            }
            Err(err) => {
                error!("Loading {:?} failed: {}", file.name(), err);
                self.session.reset();
                self.presenter.clear_tiles();
                self.presenter.page_count_changed(0, 0);
                self.presenter.set_view(ViewState::Empty);
                self.presenter.notify(&err.to_string(), true);
                Err(err)
            }
        }
    }

    async fn load_accepted<F: FileSource>(&mut self, file: &F) -> Result<(), RemoverError> {
        let name = file.name();
        let bytes = file.read().await.map_err(RemoverError::Read)?;

        let document = self
            .decoder
            .open_document(&bytes)
            .await
            .map_err(RemoverError::Decode)?;
        let page_count = self.decoder.page_count(&document);
        info!("Opened {:?}: {} pages, {} bytes", name, page_count, bytes.len());

        let output_name = output_file_name(&name, &self.config.output_suffix);
        self.session.load(bytes, page_count, output_name)?;
        self.presenter
            .page_count_changed(self.session.remaining(), page_count);

        self.render_all(&document, page_count).await
    }

    async fn render_all(&mut self, document: &D::Document, page_count: u32) -> Result<(), RemoverError> {
        for number in 1..=page_count {
            let tile = self
                .render_page(document, number)
                .await
                .map_err(|source| RemoverError::Render {
                    page: number,
                    source,
                })?;
            self.presenter.add_tile(tile);

            let percent = 100.0 * f64::from(number) / f64::from(page_count);
            self.presenter.progress(
                percent,
                &format!("Rendering page {} of {}...", number, page_count),
            );
        }
        Ok(())
    }

    async fn render_page(&self, document: &D::Document, number: u32) -> Result<Tile<D::Raster>, EngineError> {
        let page = self.decoder.page(document, number).await?;

        let native = self.decoder.viewport(&page, 1.0);
        if !(native.width.is_finite() && native.width > 0.0) {
            return Err(EngineError::ZeroWidth(number));
        }
        let scale = self.config.thumbnail_width / native.width;
        let viewport = self.decoder.viewport(&page, scale);
        let raster = self.decoder.render(&page, viewport).await?;

        debug!(
            "Rendered page {} at scale {:.3} ({:.0}x{:.0})",
            number, scale, viewport.width, viewport.height
        );
        Ok(Tile {
            page_number: number,
            width: viewport.width,
            height: viewport.height,
            raster,
        })
    }

    /// Removes an original page number from the edit and returns how many
    /// pages remain. Unknown or already removed pages are ignored.
    pub fn remove_page(&mut self, page: u32) -> usize {
        if !self.session.contains(page) {
            debug!("Page {} is not part of the document, ignoring", page);
            return self.session.remaining();
        }

        let remaining = self.session.remove_page(page);
        self.presenter.remove_tile(page);
        self.presenter
            .page_count_changed(remaining, self.session.total_pages());
        self.presenter.notify(&format!("Page {} removed", page), false);

        if remaining == 0 {
            info!("Every page was removed");
            self.presenter.set_view(ViewState::Empty);
        }
        remaining
    }

    /// Rebuilds the document from the surviving pages, in original order,
    /// and offers it for download.
    ///
    /// A failure leaves the session as it was so the export can be retried.
    pub async fn export(&mut self) -> Result<ExportSummary, RemoverError> {
        if !self.session.is_exportable() {
            let err = if self.session.is_loaded() {
                RemoverError::NothingToExport
            } else {
                RemoverError::NoDocument
            };
            warn!("Export refused: {}", err);
            self.presenter.notify(&err.to_string(), true);
            return Err(err);
        }

        self.presenter.set_view(ViewState::Exporting);

        match self.build_export().await {
            Ok(summary) => {
                self.presenter.progress(100.0, "Download complete!");
                self.presenter.set_view(ViewState::Editing);
                self.presenter.notify("PDF downloaded successfully", false);
                Ok(summary)
            }
            Err(err) => {
                error!("Export failed: {}", err);
                self.presenter.set_view(ViewState::Editing);
                self.presenter.notify(&err.to_string(), true);
                Err(err)
            }
        }
    }

    async fn build_export(&mut self) -> Result<ExportSummary, RemoverError> {
        let bands = self.config.export_progress;
        let bytes = self.session.source_bytes().ok_or(RemoverError::NoDocument)?;

        self.presenter.progress(bands.opening, "Loading PDF...");
        let source = self
            .builder
            .open_document(bytes)
            .await
            .map_err(RemoverError::Export)?;

        self.presenter.progress(bands.copy_floor, "Processing pages...");
        let mut target = self
            .builder
            .create_document()
            .await
            .map_err(RemoverError::Export)?;

        let pages = self.session.surviving_pages();
        let total = pages.len();
        for (done, &number) in pages.iter().enumerate() {
            let copied = self
                .builder
                .copy_pages(&mut target, &source, &[number - 1])
                .await
                .map_err(RemoverError::Export)?;
            for page in copied {
                self.builder
                    .append_page(&mut target, page)
                    .map_err(RemoverError::Export)?;
            }

            self.presenter.progress(
                bands.copying(done + 1, total),
                &format!("Processing page {} of {}...", done + 1, total),
            );
        }

        self.presenter.progress(bands.copy_ceiling, "Saving PDF...");
        let output = self
            .builder
            .serialize(target)
            .await
            .map_err(RemoverError::Export)?;

        let file_name = self.session.output_name().to_string();
        let byte_len = output.len();
        self.presenter
            .offer_download(&file_name, output)
            .map_err(|source| RemoverError::Download {
                file_name: file_name.clone(),
                source,
            })?;

        info!("Exported {} pages to {:?} ({} bytes)", total, file_name, byte_len);
        Ok(ExportSummary {
            file_name,
            page_count: total,
            byte_len,
        })
    }

    /// Forgets the loaded document and empties the page grid.
    pub fn reset(&mut self) {
        self.session.reset();
        self.presenter.clear_tiles();
        self.presenter.page_count_changed(0, 0);
        self.presenter.set_view(ViewState::Empty);
    }
}
