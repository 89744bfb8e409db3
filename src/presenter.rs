use std::io;

/// Which part of the page the front-end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing to edit: before the first upload, after a reset or failed
    /// load, and once every page has been removed.
    Empty,
    Loading,
    Editing,
    Exporting,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Empty => "empty",
            ViewState::Loading => "loading",
            ViewState::Editing => "editing",
            ViewState::Exporting => "exporting",
        }
    }
}

/// One thumbnail in the page grid.
#[derive(Debug, Clone)]
pub struct Tile<R> {
    /// Original page number; the label shown under the thumbnail.
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
    pub raster: R,
}

/// Everything the workflow needs from a user interface.
pub trait Presenter {
    type Raster;

    fn progress(&mut self, percent: f64, message: &str);

    fn notify(&mut self, message: &str, is_error: bool);

    fn set_view(&mut self, view: ViewState);

    fn page_count_changed(&mut self, remaining: usize, total: u32);

    fn clear_tiles(&mut self);

    fn add_tile(&mut self, tile: Tile<Self::Raster>);

    fn remove_tile(&mut self, page_number: u32);

    fn offer_download(&mut self, file_name: &str, bytes: Vec<u8>) -> io::Result<()>;
}
