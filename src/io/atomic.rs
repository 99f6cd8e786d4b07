use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Write-then-rename wrapper so that a failed run never leaves a partial output.
///
/// Bytes go to a temporary file next to the target; [`PendingWrite::finalize`]
/// moves it into place. Dropping a `PendingWrite` without finalizing deletes the
/// temporary file.
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: BufWriter<NamedTempFile>,
}

impl PendingWrite {
    pub(crate) fn open(target: &Path) -> Result<Self> {
        let dir = target.parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        Ok(Self { target: target.to_path_buf(), tmp: BufWriter::new(tmp) })
    }

    pub(crate) fn finalize(self) -> Result<()> {
        let Self { target, tmp } = self;
        let tmp = tmp.into_inner().map_err(|e| Error::io(&target, e.into_error()))?;
        tmp.as_file().sync_all().ok(); // best-effort fsync file
        tmp.persist(&target).map_err(|e| Error::io(&target, e.error))?;
        if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

/// Finalize staged writes in order. If one fails, the targets already moved
/// into place are removed again and the rest are discarded, so the group lands
/// together or not at all.
pub(crate) fn finalize_all(writes: Vec<PendingWrite>) -> Result<()> {
    let mut done: Vec<PathBuf> = Vec::with_capacity(writes.len());
    for pending in writes {
        let target = pending.target.clone();
        if let Err(err) = pending.finalize() {
            for path in &done {
                let _ = std::fs::remove_file(path);
            }
            return Err(err);
        }
        done.push(target);
    }
    Ok(())
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}
