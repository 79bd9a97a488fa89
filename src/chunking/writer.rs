use super::chunker::ChunkerError;
use std::{fs::File, io::Write, path::Path};

pub const DEFAULT_EXTENSION: &str = "exe";

/// `test_case_<index>.<ext>`, index zero-padded to the digit count of `total`.
pub fn test_case_name(index: usize, total: usize, extension: &str) -> String {
    let width = total.to_string().len();
    format!("test_case_{index:0width$}.{extension}")
}

/// Writes every chunk to its own file under `directory`, overwriting any file
/// already there. Stops at the first failed write; files written before it are
/// left in place.
pub fn save<'a>(
    directory: &'a Path,
    chunks: &[&[u8]],
    extension: Option<&str>,
) -> Result<&'a Path, ChunkerError> {
    let extension = match extension {
        Some(ext) if !ext.is_empty() => ext,
        _ => DEFAULT_EXTENSION,
    };

    for (index, chunk) in chunks.iter().enumerate() {
        let path = directory.join(test_case_name(index, chunks.len(), extension));
        let mut f = File::create(&path).map_err(|err| ChunkerError::Write(path.clone(), err))?;
        f.write_all(chunk)
            .map_err(|err| ChunkerError::Write(path.clone(), err))?;
        tracing::debug!("Wrote {} bytes to {}", chunk.len(), path.display());
    }

    Ok(directory)
}
