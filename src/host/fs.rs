use super::{DirEntryInfo, FileSystem};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|metadata| !metadata.is_dir())
            .unwrap_or(false)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::trace!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            // Directory links and junctions count as directories.
            let is_dir = match entry.file_type() {
                Ok(t) if t.is_symlink() => fs::metadata(entry.path())
                    .map(|m| m.is_dir())
                    .unwrap_or(false),
                Ok(t) => t.is_dir(),
                Err(_) => false,
            };

            entries.push(DirEntryInfo {
                name: entry.file_name(),
                is_dir,
            });
        }

        Ok(entries)
    }

    fn read_first_line(&self, path: &Path) -> io::Result<String> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        let capacity = usize::try_from(size)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "file too large"))?
            .saturating_add(1);

        let mut line = String::with_capacity(capacity);
        let read = BufReader::new(file).read_line(&mut line)?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} is empty", path.display()),
            ));
        }

        Ok(line)
    }
}
