use quick_error::quick_error;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

quick_error! {
    #[derive(Debug)]
    pub enum ChunkerError {
        Read(path: PathBuf, err: io::Error) {
            display("Error while reading {}: {err}", path.display())
            source(err)
        }
        Write(path: PathBuf, err: io::Error) {
            display("Error while writing {}: {err}", path.display())
            source(err)
        }
        InvalidArgument(err: &'static str) {
            display("Invalid argument: {err}")
        }
    }
}

pub trait Chunker {
    /// Splits `data` into borrowed chunks, in order.
    fn chunk<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ChunkerError> {
        let read = |err: io::Error| ChunkerError::Read(path.to_path_buf(), err);
        let mut f = File::open(path).map_err(read)?;
        let mut buffer = Vec::new();
        f.read_to_end(&mut buffer).map_err(read)?;

        Ok(buffer)
    }
}
