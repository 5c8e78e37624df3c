//! Channel types for feeding text lines into the plotter.
//!
//! Any producer thread (file reader, serial port, socket) owns a [`LineSink`]
//! and sends raw lines; the UI thread drains the matching receiver once per
//! frame and hands each command to the engine.

use std::io::{self, BufRead};
use std::sync::mpsc::{Receiver, SendError, Sender};

/// Messages sent over the channel to drive the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotCommand {
    /// One input record.
    Line(String),
    /// A chunk of records, processed in order.
    Lines(Vec<String>),
    /// Drop all samples and metadata.
    ClearAll,
}

/// Cloneable sender half handed to producers.
#[derive(Clone, Debug)]
pub struct LineSink {
    tx: Sender<PlotCommand>,
}

impl LineSink {
    pub fn send_line<S: Into<String>>(&self, line: S) -> Result<(), SendError<PlotCommand>> {
        self.tx.send(PlotCommand::Line(line.into()))
    }

    /// Send a chunk of lines (cheaper than line-by-line for bursts).
    pub fn send_lines<I, S>(&self, lines: I) -> Result<(), SendError<PlotCommand>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tx
            .send(PlotCommand::Lines(lines.into_iter().map(Into::into).collect()))
    }

    pub fn clear_all(&self) -> Result<(), SendError<PlotCommand>> {
        self.tx.send(PlotCommand::ClearAll)
    }

    /// Forward every line of `reader` until EOF or until the receiver is
    /// dropped. Returns the number of lines sent.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a noisy
    /// line never stops the stream. `\n` and `\r\n` endings are stripped.
    pub fn forward_lines<R: BufRead>(&self, mut reader: R) -> io::Result<usize> {
        let mut buf = Vec::new();
        let mut total = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let mut line = buf.as_slice();
            if let Some(rest) = line.strip_suffix(b"\n") {
                line = rest;
            }
            if let Some(rest) = line.strip_suffix(b"\r") {
                line = rest;
            }
            if self.send_line(String::from_utf8_lossy(line)).is_err() {
                break;
            }
            total += 1;
        }
        Ok(total)
    }
}

/// Create a new channel pair for feeding lines to the plotter.
pub fn channel_lines() -> (LineSink, Receiver<PlotCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (LineSink { tx }, rx)
}
