//! Frame sources feeding the session loop.

use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;
use repcoach_core::{Detection, Error, JointSet, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// Supplier of one detection per frame
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame; `Ok(None)` once the source is exhausted
    async fn next_frame(&mut self) -> Result<Option<Detection>>;
}

/// In-memory source, mostly for tests and scripted sessions
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    frames: VecDeque<Detection>,
}

impl VecSource {
    pub fn new(frames: impl IntoIterator<Item = Detection>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl FrameSource for VecSource {
    async fn next_frame(&mut self) -> Result<Option<Detection>> {
        Ok(self.frames.pop_front())
    }
}

/// Recorded landmark stream, one JSON document per line.
///
/// A line is either a landmark map such as
/// `{"LEFT_SHOULDER": {"x": 0.41, "y": 0.32}, ...}` or `null` for a frame in
/// which no person was detected. Blank lines are ignored.
pub struct ReplaySource<R> {
    lines: Lines<BufReader<R>>,
    line_no: usize,
}

impl ReplaySource<tokio::fs::File> {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::FrameSource(format!("cannot open {}: {}", path.display(), e)))?;
        Ok(Self::new(file))
    }
}

impl<R: AsyncRead + Unpin + Send> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> FrameSource for ReplaySource<R> {
    async fn next_frame(&mut self) -> Result<Option<Detection>> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| Error::FrameSource(format!("read failed after line {}: {}", self.line_no, e)))?;

            let Some(line) = line else {
                return Ok(None);
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let joints: Option<JointSet> = serde_json::from_str(line)
                .map_err(|e| Error::FrameSource(format!("line {}: {}", self.line_no, e)))?;
            return Ok(Some(joints.into()));
        }
    }
}
