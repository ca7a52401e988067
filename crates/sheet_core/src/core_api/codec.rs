use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::character::CharacterRecord;
use crate::format::{DecodeReport, decode_record, encode_record};

use super::error::{CoreError, CoreErrorCode};

/// Reads and writes character sheet files.
///
/// Decoding is best-effort: only failing to read the file is an error.
/// Encoding replaces the target in one rename, so an interrupted save
/// leaves the previous file in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct SheetCodec;

impl SheetCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_to_string(&self, record: &CharacterRecord) -> String {
        encode_record(record)
    }

    pub fn encode<P: AsRef<Path>>(&self, record: &CharacterRecord, path: P) -> Result<(), CoreError> {
        let path = path.as_ref();
        let text = self.encode_to_string(record);
        log::debug!(
            "writing sheet {:?} ({} bytes) to {}",
            record.name(),
            text.len(),
            path.display()
        );

        write_atomically(path, text.as_bytes()).map_err(|e| {
            CoreError::new(
                CoreErrorCode::WriteFailure,
                format!("failed to write {}: {e}", path.display()),
            )
        })
    }

    pub fn decode_str(&self, text: &str) -> CharacterRecord {
        self.decode_str_with_warnings(text).record
    }

    pub fn decode_str_with_warnings(&self, text: &str) -> DecodeReport {
        let report = decode_record(text);
        for warning in &report.warnings {
            log::warn!("{warning}");
        }
        report
    }

    pub fn decode<P: AsRef<Path>>(&self, path: P) -> Result<CharacterRecord, CoreError> {
        self.decode_with_warnings(path).map(DecodeReport::into_record)
    }

    pub fn decode_with_warnings<P: AsRef<Path>>(&self, path: P) -> Result<DecodeReport, CoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| unreadable(path, e))?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        Ok(self.decode_str_with_warnings(&String::from_utf8_lossy(&bytes)))
    }

    /// Like [`decode`](Self::decode), but a path that does not exist yet
    /// yields a fresh default record.
    pub fn load_or_new<P: AsRef<Path>>(&self, path: P) -> Result<CharacterRecord, CoreError> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => Ok(self.decode_str(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, starting a new sheet", path.display());
                Ok(CharacterRecord::new_default())
            }
            Err(e) => Err(unreadable(path, e)),
        }
    }
}

fn unreadable(path: &Path, err: io::Error) -> CoreError {
    CoreError::new(
        CoreErrorCode::UnreadableFile,
        format!("failed to read {}: {err}", path.display()),
    )
}

#[cfg(unix)]
const NEW_SHEET_MODE: u32 = 0o644;

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Dropped (and deleted) on every early return below.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    carry_permissions(path, tmp.as_file())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Temp files are created owner-only; give the saved sheet the mode of the
/// file it replaces, or an ordinary 0644 when there is none.
#[cfg(unix)]
fn carry_permissions(path: &Path, file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let perms = match fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => fs::Permissions::from_mode(NEW_SHEET_MODE),
    };
    file.set_permissions(perms)
}

#[cfg(not(unix))]
fn carry_permissions(_path: &Path, _file: &fs::File) -> io::Result<()> {
    Ok(())
}
