use std::io;

use tokio_util::{
    bytes::{Buf, BytesMut},
    codec::Decoder,
};

/// A newline separated frame from the host
#[derive(Debug, PartialEq, Eq)]
pub enum HostLine {
    /// line contents without the trailing `\n` or `\r\n`, not checked for UTF-8
    Line(BytesMut),
    /// a line longer than the limit, dropped
    TooLong,
}

/// Splits input into lines like [LinesCodec](tokio_util::codec::LinesCodec),
/// except that nothing about a line's contents is an error, so the stream
/// keeps going after garbage. Lines over `max_length` bytes are discarded
/// without buffering them whole.
#[derive(Debug, Clone)]
pub struct HostLineCodec {
    max_length: usize,
    next_index: usize,
    discarding: bool,
}

impl HostLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }
}

impl Decoder for HostLineCodec {
    type Item = HostLine;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<HostLine>, io::Error> {
        loop {
            let read_to = buf.len().min(self.max_length.saturating_add(1));
            let newline = buf[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.discarding, newline) {
                (true, Some(offset)) => {
                    buf.advance(offset + self.next_index + 1);
                    self.discarding = false;
                    self.next_index = 0;
                    return Ok(Some(HostLine::TooLong));
                }
                (true, None) => {
                    buf.advance(read_to);
                    self.next_index = 0;
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let end = offset + self.next_index;
                    self.next_index = 0;
                    let mut line = buf.split_to(end + 1);
                    line.truncate(end);
                    if line.last() == Some(&b'\r') {
                        line.truncate(end - 1);
                    }
                    return Ok(Some(HostLine::Line(line)));
                }
                (false, None) if buf.len() > self.max_length => {
                    self.discarding = true;
                    self.next_index = 0;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<HostLine>, io::Error> {
        if let Some(frame) = self.decode(buf)? {
            return Ok(Some(frame));
        }
        self.next_index = 0;
        if buf.is_empty() || self.discarding {
            buf.clear();
            Ok(None)
        } else {
            Ok(Some(HostLine::Line(buf.split())))
        }
    }
}
