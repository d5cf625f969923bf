//! File load and save.

use core_state::EditorState;
use core_text::RowStore;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no file name")]
    NoFileName,
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Load `path` into `state`, replacing the buffer. The syntax definition is
/// chosen from the file name and the buffer starts clean.
pub fn open_file(state: &mut EditorState, path: &Path) -> io::Result<()> {
    let file = File::open(path).inspect_err(|e| {
        tracing::error!(target: "io", path = %path.display(), error = %e, "file_open_error");
    })?;
    let rows = RowStore::from_reader(BufReader::new(file), state.rows.tab_stop(), None)?;
    let count = rows.len();
    state.replace_rows(rows, Some(path.to_path_buf()));
    tracing::info!(
        target: "io",
        path = %path.display(),
        rows = count,
        file_type = state.file_type(),
        "file_opened"
    );
    Ok(())
}

fn write_resized(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)
}

/// Write the buffer to its file name. Returns the number of bytes written.
///
/// The file is opened without truncation and resized to the new length
/// before writing, so a failed open leaves existing content untouched.
pub fn save_file(state: &mut EditorState) -> Result<usize, SaveError> {
    let path = state.file_name.clone().ok_or(SaveError::NoFileName)?;
    let bytes = state.rows.to_bytes();

    match write_resized(&path, &bytes) {
        Ok(()) => {
            state.rows.clear_dirty();
            tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_saved");
            Ok(bytes.len())
        }
        Err(e) => {
            tracing::warn!(target: "io", path = %path.display(), error = %e, "file_save_error");
            Err(e.into())
        }
    }
}
