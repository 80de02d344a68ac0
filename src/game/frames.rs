//! JSON-lines pose frame input.
//!
//! Each non-blank line is one frame: a JSON array of subjects.
//!
//! ```text
//! [{"id": 1, "keypoints": [{"joint": 0, "x": 312.0, "y": 88.5}]}]
//! []
//! ```

use std::io::BufRead;

use crate::core::{FrameError, TrackedSubject};

/// One frame of pose input.
pub type Frame = Vec<TrackedSubject>;

/// Iterator over the frames of a JSON-lines stream.
///
/// A malformed line yields an error and the iterator moves on to the next
/// line; an I/O error is yielded once and ends the stream.
pub struct FrameReader<R> {
    reader: R,
    line: usize,
    buf: String,
    done: bool,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
            done: false,
        }
    }

    /// Line number of the most recently read line (1-based).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(text).map_err(|source| FrameError::Parse {
                        line: self.line,
                        source,
                    }));
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
        None
    }
}
