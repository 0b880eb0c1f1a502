pub mod config;
pub mod utils;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not find file {0:?}")]
    NotFound(PathBuf),
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("could not create {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every line of the file at `path`, without line endings. Bytes that are not valid UTF-8 are
/// replaced rather than rejected, since tweet dumps are rarely clean.
pub fn try_read_lines(path: &Path) -> Result<Vec<String>, ReadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound(path.to_owned()),
        _ => ReadError::Io {
            path: path.to_owned(),
            source: e,
        },
    })?;
    let mut lines = Vec::new();
    for raw in BufReader::new(file).split(b'\n') {
        let mut raw = raw.map_err(|e| ReadError::Io {
            path: path.to_owned(),
            source: e,
        })?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        lines.push(String::from_utf8_lossy(&raw).into_owned());
    }
    Ok(lines)
}

/// Like [`try_read_lines`], but logs the failure and hands back no lines instead.
pub fn read_lines(path: &Path) -> Vec<String> {
    match try_read_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

pub fn create_output(path: &Path) -> Result<BufWriter<File>, WriteError> {
    match File::create(path) {
        Ok(file) => Ok(BufWriter::new(file)),
        Err(e) => Err(WriteError::Create {
            path: path.to_owned(),
            source: e,
        }),
    }
}
