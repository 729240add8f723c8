use crate::analysis::types::ParseError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A decoded line, or the per-line reason it could not be decoded.
pub type RawLine = Result<String, ParseError>;

/// Lazy, finite line reader over a plain or gzip-compressed log file.
///
/// The file handle (and decoder) is owned by the source and released when the
/// source is dropped, whether or not it was read to the end. A source cannot
/// be rewound; open a new one to read the file again.
pub struct LineSource {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    buf: Vec<u8>,
    failed: bool,
}

impl LineSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;

        let reader: Box<dyn BufRead> = if is_compressed(&path) {
            // logrotate output may be several concatenated gzip members
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            path,
            reader,
            buf: Vec::with_capacity(512),
            failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LineSource {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut end = self.buf.len();
                while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
                    end -= 1;
                }

                let line = std::str::from_utf8(&self.buf[..end])
                    .map(str::to_owned)
                    .map_err(|_| ParseError::InvalidEncoding);

                Some(Ok(line))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Files ending in `.gz` are read through a gzip decoder.
pub fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
