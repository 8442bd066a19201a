//! File load / save.
//!
//! Synchronous and single-buffer. Loading never fails: a missing or
//! unreadable path starts an empty session that will be created on first
//! save. Saving is atomic (temp file in the target directory, then rename).
//!
//! Format: lines joined by the recorded line-ending style with no trailing
//! separator. Loading splits on every separator, so a file that ends with a
//! separator gains a final empty line and saves back byte-identical.
//!
//! Bytes that are not valid UTF-8 are shown as U+FFFD. Writing them back
//! would change the file, so `save` refuses until the caller confirms with
//! `save_replacing_invalid` (`!w`).

use core_state::{EditorState, LineEnding, normalize_line_endings};
use core_text::Buffer;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("no file name")]
    NoFileName,
    #[error("{} is not valid UTF-8; press !w to write it with invalid bytes replaced", .path.display())]
    InvalidUtf8 { path: PathBuf },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Buffer plus the metadata needed to write it back faithfully.
#[derive(Debug)]
pub struct Loaded {
    pub buffer: Buffer,
    pub line_ending: LineEnding,
    pub mixed_line_endings: bool,
    /// Invalid UTF-8 was replaced while decoding.
    pub lossy: bool,
    /// False when the path could not be read (new file).
    pub existed: bool,
}

pub fn read_file(path: &Path) -> Loaded {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                info!(target: "io", path = %path.display(), "new_file");
            } else {
                warn!(target: "io", path = %path.display(), error = %e, "file_unreadable");
            }
            return Loaded {
                buffer: Buffer::new(),
                line_ending: LineEnding::Lf,
                mixed_line_endings: false,
                lossy: false,
                existed: false,
            };
        }
    };
    let (content, lossy) = match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    };
    let norm = normalize_line_endings(&content);
    let buffer = Buffer::from_text(&norm.normalized);
    info!(
        target: "io",
        path = %path.display(),
        lines = buffer.line_count(),
        line_ending = ?norm.original,
        mixed = norm.mixed,
        lossy,
        "file_loaded"
    );
    Loaded {
        buffer,
        line_ending: norm.original,
        mixed_line_endings: norm.mixed,
        lossy,
        existed: true,
    }
}

/// Start a session on `path`. The path is remembered even when the file does
/// not exist yet; the session is never marked modified. Anything a later
/// save would silently change is announced with a Warn.
pub fn load(path: &Path) -> EditorState {
    let loaded = read_file(path);
    let mut state = EditorState::new(loaded.buffer);
    state.file_name = Some(path.to_path_buf());
    state.line_ending = loaded.line_ending;
    state.mixed_line_endings = loaded.mixed_line_endings;
    state.lossy_encoding = loaded.lossy;
    if loaded.mixed_line_endings {
        state.messages.warn(format!(
            "mixed line endings: saving will use {}",
            loaded.line_ending.label()
        ));
    }
    if loaded.lossy {
        state
            .messages
            .warn("file is not valid UTF-8: invalid bytes shown as \u{FFFD}");
    }
    state
}

/// Save to the session's file name. Returns the number of lines written.
pub fn save(state: &mut EditorState) -> Result<usize, IoError> {
    let path = state.file_name.clone().ok_or(IoError::NoFileName)?;
    if state.lossy_encoding {
        warn!(target: "io", path = %path.display(), "write_refused_invalid_utf8");
        return Err(IoError::InvalidUtf8 { path });
    }
    save_as(state, &path)
}

/// Save even though the loaded file was not valid UTF-8. The replacement
/// characters are written as-is.
pub fn save_replacing_invalid(state: &mut EditorState) -> Result<usize, IoError> {
    let path = state.file_name.clone().ok_or(IoError::NoFileName)?;
    save_as(state, &path)
}

/// Save to `path`. On success the modified flag and the message log are
/// cleared; on failure the state is untouched.
pub fn save_as(state: &mut EditorState, path: &Path) -> Result<usize, IoError> {
    let content = serialize(state.buffer(), state.line_ending);
    write_atomic(path, content.as_bytes()).map_err(|source| {
        warn!(target: "io", path = %path.display(), error = %source, "write_failed");
        IoError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let lines = state.buffer().line_count();
    info!(target: "io", path = %path.display(), lines, bytes = content.len(), "file_written");
    state.modified = false;
    state.lossy_encoding = false;
    state.mixed_line_endings = false;
    state.messages.clear();
    Ok(lines)
}

fn serialize(buffer: &Buffer, ending: LineEnding) -> String {
    match ending {
        LineEnding::Lf => buffer.to_text(),
        other => buffer.lines().collect::<Vec<_>>().join(other.as_str()),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
