//! Files handed to the workflow by a front-end.

use std::io;

/// A user-supplied file. Metadata is available up front so uploads can be
/// rejected before the content is read.
#[allow(async_fn_in_trait)]
pub trait FileSource {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// A file whose content is already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: "application/pdf".to_string(),
            bytes,
        }
    }
}

impl FileSource for InMemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use local::LocalFile;

#[cfg(not(target_arch = "wasm32"))]
mod local {
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use super::FileSource;

    /// A file on the local disk. The MIME type is guessed from the extension.
    #[derive(Debug, Clone)]
    pub struct LocalFile {
        path: PathBuf,
        size: u64,
    }

    impl LocalFile {
        pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
            let path = path.into();
            let size = fs::metadata(&path)?.len();
            Ok(Self { path, size })
        }
    }

    impl FileSource for LocalFile {
        fn name(&self) -> String {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        }

        fn mime_type(&self) -> String {
            let is_pdf = self
                .path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf {
                "application/pdf".to_string()
            } else {
                "application/octet-stream".to_string()
            }
        }

        fn size(&self) -> u64 {
            self.size
        }

        async fn read(&self) -> io::Result<Vec<u8>> {
            fs::read(&self.path)
        }
    }
}
