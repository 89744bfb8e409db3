#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

// The browser build only ships the library.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs::{self, File};
    use std::io;
    use std::ops::RangeInclusive;
    use std::path::PathBuf;
    use std::sync::LazyLock;

    use anyhow::{bail, Context, Result};
    use clap::Parser;
    use futures::executor::block_on;
    use log::{debug, error, info, warn, LevelFilter};
    use regex::Regex;
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

    use pdf_page_remover::{
        LocalFile, LopdfBuilder, LopdfDecoder, PagePreview, Presenter, RemoverConfig, Tile,
        ViewState, WorkflowController,
    };

    static PAGE_ITEM: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)\s*)?$").unwrap());

    #[derive(Parser, Debug)]
    #[command(name = "pdf-page-remover", version, about = "Remove pages from a PDF")]
    struct Args {
        /// PDF to edit
        input: PathBuf,

        /// Pages to remove, e.g. "2,5-7"
        #[arg(short, long)]
        remove: String,

        /// Directory the trimmed copy is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Largest accepted input, in MiB
        #[arg(long, default_value_t = 50)]
        max_size_mib: u64,

        /// Write the log to this file instead of stderr
        #[arg(long)]
        log_file: Option<PathBuf>,

        #[arg(short, long)]
        verbose: bool,
    }

    /// Turns "1,3-5" into [1..=1, 3..=5]. Pages are 1-based.
    pub(crate) fn parse_page_list(spec: &str) -> Result<Vec<RangeInclusive<u32>>> {
        let mut ranges = Vec::new();
        for item in spec.split(',').filter(|s| !s.trim().is_empty()) {
            let Some(caps) = PAGE_ITEM.captures(item) else {
                bail!("invalid page selection {:?}", item.trim());
            };
            let start: u32 = caps[1].parse()?;
            let end: u32 = match caps.get(2) {
                Some(m) => m.as_str().parse()?,
                None => start,
            };
            if start == 0 || end < start {
                bail!("invalid page range {:?}", item.trim());
            }
            ranges.push(start..=end);
        }
        if ranges.is_empty() {
            bail!("no pages selected");
        }
        Ok(ranges)
    }

    /// Pages of a `total`-page document covered by `ranges`, ascending and
    /// without repeats.
    pub(crate) fn pages_in(ranges: &[RangeInclusive<u32>], total: u32) -> Vec<u32> {
        let mut pages: Vec<u32> = ranges
            .iter()
            .flat_map(|range| *range.start()..=(*range.end()).min(total))
            .collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    pub(crate) fn mib_to_bytes(mib: u64) -> Result<u64> {
        let Some(bytes) = mib.checked_mul(1024 * 1024) else {
            bail!("--max-size-mib {} is too large", mib);
        };
        Ok(bytes)
    }

    /// Reports through the log and saves downloads into a directory.
    struct CliPresenter {
        out_dir: PathBuf,
        saved: Option<PathBuf>,
    }

    impl Presenter for CliPresenter {
        type Raster = PagePreview;

        fn progress(&mut self, percent: f64, message: &str) {
            debug!("{:>3.0}% {}", percent, message);
        }

        fn notify(&mut self, message: &str, is_error: bool) {
            if is_error {
                error!("{}", message);
            } else {
                info!("{}", message);
            }
        }

        fn set_view(&mut self, view: ViewState) {
            debug!("view: {}", view.as_str());
        }

        fn page_count_changed(&mut self, remaining: usize, total: u32) {
            debug!("{} of {} pages remaining", remaining, total);
        }

        fn clear_tiles(&mut self) {}

        fn add_tile(&mut self, tile: Tile<PagePreview>) {
            debug!(
                "page {}: {}x{} preview",
                tile.page_number, tile.raster.width, tile.raster.height
            );
        }

        fn remove_tile(&mut self, _page_number: u32) {}

        fn offer_download(&mut self, file_name: &str, bytes: Vec<u8>) -> io::Result<()> {
            fs::create_dir_all(&self.out_dir)?;
            let path = self.out_dir.join(file_name);
            fs::write(&path, bytes)?;
            self.saved = Some(path);
            Ok(())
        }
    }

    fn init_logging(args: &Args) -> Result<()> {
        let level = if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        match &args.log_file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("cannot create log file {}", path.display()))?;
                WriteLogger::init(level, Config::default(), file)?;
            }
            None => {
                TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
            }
        }
        Ok(())
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_logging(&args)?;

        let ranges = parse_page_list(&args.remove)?;
        let config = RemoverConfig {
            max_file_size: mib_to_bytes(args.max_size_mib)?,
            ..Default::default()
        };
        let presenter = CliPresenter {
            out_dir: args.out_dir.clone(),
            saved: None,
        };
        let mut controller = WorkflowController::new(config, LopdfDecoder, LopdfBuilder, presenter)?;

        let input = LocalFile::open(&args.input)
            .with_context(|| format!("cannot open {}", args.input.display()))?;

        block_on(async {
            controller.load(&input).await?;

            let total = controller.session().total_pages();
            if ranges.iter().any(|range| *range.end() > total) {
                warn!("the document has {} pages, skipping selections past the end", total);
            }
            for page in pages_in(&ranges, total) {
                controller.remove_page(page);
            }

            let summary = controller.export().await?;
            let saved = controller
                .presenter()
                .saved
                .clone()
                .unwrap_or_else(|| args.out_dir.join(&summary.file_name));
            println!(
                "Wrote {} pages ({} bytes) to {}",
                summary.page_count,
                summary.byte_len,
                saved.display()
            );
            Ok::<(), anyhow::Error>(())
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_single_pages() {
            assert_eq!(parse_page_list("2").unwrap(), vec![2..=2]);
            assert_eq!(parse_page_list("1, 3 ,5").unwrap(), vec![1..=1, 3..=3, 5..=5]);
        }

        #[test]
        fn test_parse_ranges() {
            assert_eq!(parse_page_list("2-4,7").unwrap(), vec![2..=4, 7..=7]);
            assert_eq!(parse_page_list("5 - 5").unwrap(), vec![5..=5]);
        }

        #[test]
        fn test_huge_range_is_clamped_to_document() {
            let ranges = parse_page_list("1-4000000000").unwrap();
            assert_eq!(ranges, vec![1..=4_000_000_000]);
            assert_eq!(pages_in(&ranges, 3), vec![1, 2, 3]);
        }

        #[test]
        fn test_pages_in_sorts_and_dedups() {
            let ranges = parse_page_list("6-9,2,3-4,9").unwrap();
            assert_eq!(pages_in(&ranges, 7), vec![2, 3, 4, 6, 7]);
            assert!(pages_in(&ranges, 1).is_empty());
        }

        #[test]
        fn test_size_limit_overflow_is_an_error() {
            assert_eq!(mib_to_bytes(50).unwrap(), 50 * 1024 * 1024);
            assert!(mib_to_bytes(u64::MAX / 1024).is_err());
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_page_list("").is_err());
            assert!(parse_page_list("0").is_err());
            assert!(parse_page_list("4-2").is_err());
            assert!(parse_page_list("two").is_err());
            assert!(parse_page_list("1-").is_err());
        }
    }
}
