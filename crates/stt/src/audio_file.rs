use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

/// Uploaded audio parked on disk for the duration of one request
///
/// The file is removed by [`ScopedAudioFile::remove`] once the provider call
/// returns. If the request future is dropped or returns early, dropping the
/// inner `NamedTempFile` removes it instead.
pub(crate) struct ScopedAudioFile {
    file: NamedTempFile,
}

impl ScopedAudioFile {
    /// Write `audio` to a fresh `.webm` file in `dir` (system temp dir if `None`)
    pub async fn create(dir: Option<&Path>, audio: Vec<u8>) -> io::Result<Self> {
        let dir = dir.map(Path::to_path_buf);

        tokio::task::spawn_blocking(move || -> io::Result<Self> {
            let mut builder = tempfile::Builder::new();
            builder.prefix("relay-audio-").suffix(".webm");

            let mut file = match dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };

            file.write_all(&audio)?;
            file.flush()?;

            Ok(Self { file })
        })
        .await
        .map_err(io::Error::other)?
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the stored audio back
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.file.path()).await
    }

    /// Delete the file now, logging rather than failing if that is impossible
    ///
    /// The unlink runs on the blocking pool, like the write in [`Self::create`].
    pub async fn remove(self) {
        let path: PathBuf = self.file.path().to_path_buf();
        let file = self.file;

        match tokio::task::spawn_blocking(move || file.close()).await {
            Ok(Ok(())) => tracing::debug!(path = %path.display(), "removed temporary audio file"),
            Ok(Err(e)) => tracing::warn!(path = %path.display(), "failed to remove temporary audio file: {e}"),
            Err(e) => tracing::warn!(path = %path.display(), "temporary audio file removal did not complete: {e}"),
        }
    }
}
