use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A path-addressable byte store rooted at a base directory.
///
/// Request targets are appended to the root verbatim: `..` segments are
/// NOT normalized, so a client that sends them can address files outside
/// the root. Callers deploying this engine must root it in a directory
/// where that is acceptable.
///
/// Writes are not guarded by any cross-connection lock; concurrent
/// PUT/POST to the same path from different connections race in the
/// underlying filesystem.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, target: &str) -> PathBuf {
        self.root.join(target.trim_start_matches('/'))
    }

    /// Reads the whole file at the target path.
    pub async fn read(&self, target: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(target)).await
    }

    /// Writes `bytes` to the target path, truncating existing content.
    pub async fn write(&self, target: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.resolve(target), bytes).await
    }

    /// Appends `bytes` to the target path, creating the file if absent.
    pub async fn append(&self, target: &str, bytes: &[u8]) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.resolve(target))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }

    /// Returns the modification time of the file at the target path.
    pub async fn modified(&self, target: &str) -> io::Result<SystemTime> {
        let meta = tokio::fs::metadata(self.resolve(target)).await?;
        meta.modified()
    }
}
