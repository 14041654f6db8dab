use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Request, RequestId, RequestStore, Result};

/// Filesystem-backed request store: one tab-indented JSON file per
/// record, named `<id>.json`, under a single spool directory.
///
/// Records carry email addresses and SSH keys, so files are written
/// with mode `0600` (owner read/write only).
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Opens a store rooted at `dir`, creating the directory (and any
    /// missing parents) if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: RequestId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    fn write_record(&self, path: &Path, request: &Request) -> Result<()> {
        let bytes = to_indented_json(request)?;
        let mut file = open_owner_only(path)?;
        file.write_all(&bytes)?;
        Ok(())
    }
}

impl RequestStore for FsStore {
    fn save(&self, request: &Request) -> Result<RequestId> {
        let id = RequestId::generate();
        self.write_record(&self.record_path(id), request)?;
        Ok(id)
    }

    fn load(&self, id: RequestId) -> Result<Request> {
        let bytes = fs::read(self.record_path(id)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound { id },
            _ => Error::Io(err),
        })?;
        // A record that exists but no longer parses is as unusable as a
        // missing one; both surface as NotFound.
        serde_json::from_slice(&bytes).map_err(|_| Error::NotFound { id })
    }

    fn update(&self, id: RequestId, request: &Request) -> Result<()> {
        self.write_record(&self.record_path(id), request)
    }

    fn ids(&self) -> Result<Vec<RequestId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if let Ok(id) = stem.parse::<RequestId>() {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

/// Serializes a record into the on-disk format: pretty JSON indented
/// with a single tab, trailing newline.
fn to_indented_json(request: &Request) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(request, &mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}
