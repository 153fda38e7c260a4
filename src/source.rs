use crate::error::{AnalyzerError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lines of a log, read lazily and only once.
///
/// Lines that are not valid UTF-8 are skipped with a warning and counted;
/// any other read failure is handed back to the caller.
pub struct LogSource<R> {
    lines: io::Lines<R>,
    line_number: usize,
    unreadable: usize,
}

impl LogSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AnalyzerError::OpenLog {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(LogSource::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> LogSource<R> {
    pub fn from_reader(reader: R) -> Self {
        LogSource {
            lines: reader.lines(),
            line_number: 0,
            unreadable: 0,
        }
    }

    /// Lines skipped because they could not be decoded
    pub fn unreadable(&self) -> usize {
        self.unreadable
    }
}

impl<R: BufRead> Iterator for LogSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.lines.next()?;
            self.line_number += 1;
            match result {
                Ok(line) => return Some(Ok(line)),
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    log::warn!("skipping unreadable line {}: {}", self.line_number, e);
                    self.unreadable += 1;
                }
                Err(source) => {
                    return Some(Err(AnalyzerError::ReadLog {
                        line: self.line_number,
                        source,
                    }))
                }
            }
        }
    }
}
