use crate::models::{Page, Title};
use crate::render::Escaping;
use relative_path::RelativePathBuf;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid data directory: {0}")]
    InvalidDataDir(String),
}

/// Flat-file page storage: one `<title>.txt` per page in a single directory.
///
/// There is no locking. Two concurrent saves of the same title race at the
/// file system and the last write wins.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    /// Open the store, creating the data directory if it does not exist yet
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(StoreError::InvalidDataDir(format!(
                "{} is not a directory",
                data_dir.display()
            )));
        }
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.clone(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn page_path(&self, title: &Title) -> PathBuf {
        RelativePathBuf::from(title.file_name()).to_path(&self.data_dir)
    }

    /// Read a page's raw content.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so an
    /// existing page is never mistaken for a missing one.
    pub fn load(&self, title: &Title) -> Result<String, StoreError> {
        let path = self.page_path(title);
        match fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8(bytes)
                .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(path)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Load a page and render its link notation
    pub fn load_page(&self, title: &Title, escaping: Escaping) -> Result<Page, StoreError> {
        let body = self.load(title)?;
        log::debug!("Loaded {} ({} bytes)", title, body.len());
        Ok(Page::from_body(title.clone(), body, escaping))
    }

    /// Write `content` verbatim, creating or replacing the page file
    pub fn save(&self, title: &Title, content: &str) -> Result<(), StoreError> {
        let path = self.page_path(title);
        write_private(&path, content.as_bytes()).map_err(|source| StoreError::Io { path, source })
    }

    /// Persist a page's body; the rendered form is never stored
    pub fn save_page(&self, page: &Page) -> Result<(), StoreError> {
        self.save(page.title(), page.body())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}
