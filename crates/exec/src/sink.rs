// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out writer for a process's stdout.

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use super::error::ExecError;

const CHUNK: usize = 8 * 1024;

/// One destination for captured output.
#[derive(Debug)]
pub enum Sink {
    File(tokio::fs::File),
    Memory(Vec<u8>),
}

/// Writes every chunk to each of its sinks, in order.
///
/// With no sinks the output is discarded.
#[derive(Debug, Default)]
pub struct OutputSink {
    sinks: Vec<Sink>,
}

impl OutputSink {
    pub fn discard() -> Self {
        Self::default()
    }

    pub fn memory() -> Self {
        Self { sinks: vec![Sink::Memory(Vec::new())] }
    }

    pub fn file(file: tokio::fs::File) -> Self {
        Self { sinks: vec![Sink::File(file)] }
    }

    /// Output duplicated to a file and an in-memory buffer.
    pub fn tee(file: tokio::fs::File) -> Self {
        Self { sinks: vec![Sink::File(file), Sink::Memory(Vec::new())] }
    }

    /// Build the sink for a main run: `save` creates (or truncates) the file,
    /// `capture` adds the in-memory buffer.
    pub async fn open(save: Option<&Path>, capture: bool) -> Result<Self, ExecError> {
        let file = match save {
            Some(path) => Some(tokio::fs::File::create(path).await.map_err(|source| {
                ExecError::SaveFile { path: path.to_path_buf(), source }
            })?),
            None => None,
        };
        Ok(match (file, capture) {
            (Some(file), true) => Self::tee(file),
            (Some(file), false) => Self::file(file),
            (None, true) => Self::memory(),
            (None, false) => Self::discard(),
        })
    }

    pub fn is_discard(&self) -> bool {
        self.sinks.is_empty()
    }

    pub async fn write_all(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        for sink in &mut self.sinks {
            match sink {
                Sink::File(file) => file.write_all(chunk).await?,
                Sink::Memory(buf) => buf.extend_from_slice(chunk),
            }
        }
        Ok(())
    }

    pub async fn flush(&mut self) -> std::io::Result<()> {
        for sink in &mut self.sinks {
            if let Sink::File(file) = sink {
                file.flush().await?;
            }
        }
        Ok(())
    }

    /// Copy `reader` to EOF into every sink, then flush. Returns bytes copied.
    pub async fn pump<R: AsyncRead + Unpin>(&mut self, reader: &mut R) -> std::io::Result<u64> {
        let mut buf = vec![0u8; CHUNK];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            self.write_all(&buf[..n]).await?;
            total += n as u64;
        }
        self.flush().await?;
        Ok(total)
    }

    /// The in-memory copy, if this sink keeps one.
    pub fn into_captured(self) -> Option<Vec<u8>> {
        self.sinks.into_iter().find_map(|sink| match sink {
            Sink::Memory(buf) => Some(buf),
            Sink::File(_) => None,
        })
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
