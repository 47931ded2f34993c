//! Line splitting for playlist files.
//!
//! Lines are read as raw bytes so a stray Latin-1 byte does not end the
//! stream: valid UTF-8 is used as-is, anything else is decoded as
//! Windows-1252.

use std::io::BufRead;

use encoding_rs::WINDOWS_1252;

pub(super) struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    first: bool,
}

impl<R: BufRead> Lines<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            first: true,
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                let mut line = decode_line(&self.buf);
                if std::mem::take(&mut self.first) {
                    if let Some(stripped) = line.strip_prefix('\u{feff}') {
                        line = stripped.to_string();
                    }
                }
                Some(line)
            }
            Err(e) => {
                log::warn!("playlist read stopped early: {e}");
                None
            }
        }
    }
}

pub(super) fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => WINDOWS_1252
            .decode_without_bom_handling(bytes)
            .0
            .into_owned(),
    }
}

/// Value of a `Key=Value` line: everything after the last `=`.
pub(super) fn value_of(line: &str) -> &str {
    line.rsplit_once('=').map(|(_, v)| v.trim()).unwrap_or("")
}
