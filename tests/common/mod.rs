#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use pdf_page_remover::{
    ConstructionEngine, DecodingEngine, EngineError, FileSource, Presenter, RemoverConfig, Tile,
    Viewport, ViewState, WorkflowController,
};

/// Calls seen by the mock engines, plus knobs to make them fail.
#[derive(Debug, Default)]
pub struct Calls {
    pub opened: usize,
    pub rendered: Vec<u32>,
    pub source_opened: usize,
    pub created: usize,
    pub copied: Vec<u32>,
    pub serialized: usize,

    pub fail_open: bool,
    pub fail_render_at: Option<u32>,
    pub fail_copy_at: Option<u32>,
    pub fail_source_open: bool,
    pub fail_serialize: bool,
}

impl Calls {
    pub fn construction_calls(&self) -> usize {
        self.source_opened + self.created + self.copied.len() + self.serialized
    }
}

pub type SharedCalls = Rc<RefCell<Calls>>;

/// Decodes any input into a document whose page count is fixed up front.
pub struct MockDecoder {
    pub page_count: u32,
    pub page_width: f64,
    pub calls: SharedCalls,
}

impl DecodingEngine for MockDecoder {
    type Document = u32;
    type Page = u32;
    type Raster = u32;

    async fn open_document(&self, _bytes: &[u8]) -> Result<u32, EngineError> {
        let mut calls = self.calls.borrow_mut();
        calls.opened += 1;
        if calls.fail_open {
            return Err(EngineError::Js("Invalid PDF structure".into()));
        }
        Ok(self.page_count)
    }

    fn page_count(&self, document: &u32) -> u32 {
        *document
    }

    async fn page(&self, document: &u32, number: u32) -> Result<u32, EngineError> {
        if number == 0 || number > *document {
            return Err(EngineError::MissingPage(number));
        }
        Ok(number)
    }

    fn viewport(&self, _page: &u32, scale: f64) -> Viewport {
        Viewport {
            width: self.page_width * scale,
            height: self.page_width * 1.5 * scale,
            scale,
        }
    }

    async fn render(&self, page: &u32, _viewport: Viewport) -> Result<u32, EngineError> {
        let mut calls = self.calls.borrow_mut();
        calls.rendered.push(*page);
        if calls.fail_render_at == Some(*page) {
            return Err(EngineError::Js("canvas context lost".into()));
        }
        Ok(*page)
    }
}

/// "Serializes" a document as the list of copied 0-based page indices.
pub struct MockBuilder {
    pub calls: SharedCalls,
}

impl ConstructionEngine for MockBuilder {
    type Source = ();
    type Target = Vec<u32>;
    type PageRef = u32;

    async fn open_document(&self, _bytes: &[u8]) -> Result<(), EngineError> {
        let mut calls = self.calls.borrow_mut();
        calls.source_opened += 1;
        if calls.fail_source_open {
            return Err(EngineError::Js("source bytes are corrupt".into()));
        }
        Ok(())
    }

    async fn create_document(&self) -> Result<Vec<u32>, EngineError> {
        self.calls.borrow_mut().created += 1;
        Ok(Vec::new())
    }

    async fn copy_pages(
        &self,
        _target: &mut Vec<u32>,
        _source: &(),
        indices: &[u32],
    ) -> Result<Vec<u32>, EngineError> {
        let mut calls = self.calls.borrow_mut();
        for &index in indices {
            calls.copied.push(index);
            if calls.fail_copy_at == Some(index) {
                return Err(EngineError::MissingPage(index + 1));
            }
        }
        Ok(indices.to_vec())
    }

    fn append_page(&self, target: &mut Vec<u32>, page: u32) -> Result<(), EngineError> {
        target.push(page);
        Ok(())
    }

    async fn serialize(&self, target: Vec<u32>) -> Result<Vec<u8>, EngineError> {
        let mut calls = self.calls.borrow_mut();
        calls.serialized += 1;
        if calls.fail_serialize {
            return Err(EngineError::Io(io::Error::other("out of memory")));
        }
        Ok(target.into_iter().map(|i| i as u8).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Progress(f64, String),
    Notify(String, bool),
    View(ViewState),
    PageCount(usize, u32),
    ClearTiles,
    AddTile(u32),
    RemoveTile(u32),
    Download(String, Vec<u8>),
}

pub struct RecordingPresenter<R> {
    pub events: Vec<Event>,
    pub tiles: Vec<Tile<R>>,
    pub fail_download: bool,
}

impl<R> Default for RecordingPresenter<R> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            tiles: Vec::new(),
            fail_download: false,
        }
    }
}

impl<R> RecordingPresenter<R> {
    pub fn tile_numbers(&self) -> Vec<u32> {
        self.tiles.iter().map(|t| t.page_number).collect()
    }

    pub fn last_view(&self) -> Option<ViewState> {
        self.events.iter().rev().find_map(|e| match e {
            Event::View(v) => Some(*v),
            _ => None,
        })
    }

    pub fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Download(name, bytes) => Some((name.clone(), bytes.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Notify(message, true) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Progress(percent, _) => Some(*percent),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl<R> Presenter for RecordingPresenter<R> {
    type Raster = R;

    fn progress(&mut self, percent: f64, message: &str) {
        self.events.push(Event::Progress(percent, message.to_string()));
    }

    fn notify(&mut self, message: &str, is_error: bool) {
        self.events.push(Event::Notify(message.to_string(), is_error));
    }

    fn set_view(&mut self, view: ViewState) {
        self.events.push(Event::View(view));
    }

    fn page_count_changed(&mut self, remaining: usize, total: u32) {
        self.events.push(Event::PageCount(remaining, total));
    }

    fn clear_tiles(&mut self) {
        self.tiles.clear();
        self.events.push(Event::ClearTiles);
    }

    fn add_tile(&mut self, tile: Tile<R>) {
        self.events.push(Event::AddTile(tile.page_number));
        self.tiles.push(tile);
    }

    fn remove_tile(&mut self, page_number: u32) {
        self.tiles.retain(|t| t.page_number != page_number);
        self.events.push(Event::RemoveTile(page_number));
    }

    fn offer_download(&mut self, file_name: &str, bytes: Vec<u8>) -> io::Result<()> {
        if self.fail_download {
            return Err(io::Error::other("disk full"));
        }
        self.events
            .push(Event::Download(file_name.to_string(), bytes));
        Ok(())
    }
}

pub type MockController = WorkflowController<MockDecoder, MockBuilder, RecordingPresenter<u32>>;

pub fn mock_controller(page_count: u32) -> (MockController, SharedCalls) {
    mock_controller_with(page_count, RemoverConfig::default())
}

pub fn mock_controller_with(page_count: u32, config: RemoverConfig) -> (MockController, SharedCalls) {
    mock_controller_sized(page_count, 600.0, config)
}

pub fn mock_controller_sized(
    page_count: u32,
    page_width: f64,
    config: RemoverConfig,
) -> (MockController, SharedCalls) {
    let calls = SharedCalls::default();
    let decoder = MockDecoder {
        page_count,
        page_width,
        calls: Rc::clone(&calls),
    };
    let builder = MockBuilder {
        calls: Rc::clone(&calls),
    };
    let controller =
        WorkflowController::new(config, decoder, builder, RecordingPresenter::default()).unwrap();
    (controller, calls)
}

/// Claims to be a huge PDF; reading it is a test failure.
pub struct HugeFile {
    pub size: u64,
}

impl FileSource for HugeFile {
    fn name(&self) -> String {
        "huge.pdf".to_string()
    }

    fn mime_type(&self) -> String {
        "application/pdf".to_string()
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        panic!("oversized files must not be read");
    }
}

/// A file whose read is interrupted.
pub struct AbortedFile;

impl FileSource for AbortedFile {
    fn name(&self) -> String {
        "aborted.pdf".to_string()
    }

    fn mime_type(&self) -> String {
        "application/pdf".to_string()
    }

    fn size(&self) -> u64 {
        1024
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Interrupted, "read aborted"))
    }
}

/// PDF with `num_pages` pages; page n has a MediaBox width of 100 + n so
/// page order survives a round trip.
pub fn sample_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Courier".to_vec())),
    ]));
    let resources = Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]);

    let mut page_ids = Vec::new();
    for n in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
                Operation::new("Td", vec![Object::Integer(20), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", n).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(100 + n as i64),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Resources", Object::Dictionary(resources)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// `sample_pdf(num_pages)` with an `/Encrypt` entry in its trailer.
pub fn encrypted_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::load_mem(&sample_pdf(num_pages)).unwrap();
    let encrypt_id = doc.add_object(Dictionary::from_iter(vec![
        ("Filter", Object::Name(b"Standard".to_vec())),
        ("V", Object::Integer(1)),
        ("R", Object::Integer(2)),
    ]));
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// MediaBox widths of the pages of `bytes`, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).unwrap();
            page.get(b"MediaBox").unwrap().as_array().unwrap()[2]
                .as_i64()
                .unwrap()
        })
        .collect()
}
