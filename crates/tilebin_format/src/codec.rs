//! Primitive codec - fixed-width values and length-prefixed strings over a
//! byte stream, optionally behind a DEFLATE filter
//!
//! Integers and floats are big-endian, bools a single 0/1 byte, strings an
//! `i32` byte length followed by raw UTF-8 bytes. Whether the stream is
//! compressed is NOT recorded in the stream itself; the writing and reading
//! sides must agree on it out of band.

use std::io::{BufReader, BufWriter, Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::error::FormatError;

/// Upper bound on a single string record, in bytes. Real map names and
/// resource paths are tiny; a length beyond this means the stream is
/// corrupt (or being decoded with the wrong compression flag), and
/// rejecting it avoids a pathological allocation.
pub const MAX_STRING_LEN: i32 = 16 * 1024 * 1024;

/// Stream filter applied to the whole byte stream.
///
/// Stands in for the out-of-band boolean compression flag: both sides must
/// pass the same variant or the stream decodes to garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Raw bytes.
    #[default]
    None,
    /// DEFLATE-compressed bytes (raw deflate, no zlib/gzip wrapper).
    Deflate,
}

enum Sink<W: Write> {
    Plain(BufWriter<W>),
    Deflate(DeflateEncoder<BufWriter<W>>),
}

/// Buffered primitive writer over a byte stream.
///
/// All writes are buffered; [`BinaryWriter::finish`] flushes the DEFLATE
/// stream (when active) and the buffer, and must be the final action on the
/// success path. Dropping without `finish` releases the stream but leaves
/// the output unspecified.
pub struct BinaryWriter<W: Write> {
    sink: Sink<W>,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(dest: W, compression: Compression) -> Self {
        let buffered = BufWriter::new(dest);
        let sink = match compression {
            Compression::None => Sink::Plain(buffered),
            Compression::Deflate => Sink::Deflate(DeflateEncoder::new(
                buffered,
                flate2::Compression::default(),
            )),
        };
        Self { sink }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        match &mut self.sink {
            Sink::Plain(w) => w.write_all(bytes)?,
            Sink::Deflate(w) => w.write_all(bytes)?,
        }
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), FormatError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), FormatError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), FormatError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), FormatError> {
        self.write_all(&[u8::from(value)])
    }

    /// Write an `i32` byte length followed by the string's UTF-8 bytes.
    /// Zero-length strings are legal.
    pub fn write_string(&mut self, value: &str) -> Result<(), FormatError> {
        let bytes = value.as_bytes();
        let len = i32::try_from(bytes.len())
            .map_err(|_| FormatError::format(format!("string of {} bytes", bytes.len())))?;
        self.write_i32(len)?;
        self.write_all(bytes)
    }

    /// Flush the compression filter and the buffer, returning the
    /// underlying stream.
    pub fn finish(self) -> Result<W, FormatError> {
        let mut buffered = match self.sink {
            Sink::Plain(w) => w,
            Sink::Deflate(encoder) => encoder.finish()?,
        };
        buffered.flush()?;
        buffered
            .into_inner()
            .map_err(|e| FormatError::Io(e.into_error()))
    }
}

enum Source<R: Read> {
    Plain(BufReader<R>),
    Deflate(DeflateDecoder<BufReader<R>>),
}

/// Buffered primitive reader over a byte stream.
///
/// Truncated input surfaces as [`FormatError::Io`] (unexpected EOF), never
/// as a silently wrong value.
pub struct BinaryReader<R: Read> {
    source: Source<R>,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(src: R, compression: Compression) -> Self {
        let buffered = BufReader::new(src);
        let source = match compression {
            Compression::None => Source::Plain(buffered),
            Compression::Deflate => Source::Deflate(DeflateDecoder::new(buffered)),
        };
        Self { source }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FormatError> {
        match &mut self.source {
            Source::Plain(r) => r.read_exact(buf)?,
            Source::Deflate(r) => r.read_exact(buf)?,
        }
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    pub fn read_i64(&mut self) -> Result<i64, FormatError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(f32::from_be_bytes(buf))
    }

    pub fn read_bool(&mut self) -> Result<bool, FormatError> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        match buf[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(FormatError::format(format!("bool byte {other:#04x}"))),
        }
    }

    /// Read a length-prefixed UTF-8 string. A negative or absurdly large
    /// length, or invalid UTF-8, is a format violation.
    pub fn read_string(&mut self) -> Result<String, FormatError> {
        let len = self.read_i32()?;
        if !(0..=MAX_STRING_LEN).contains(&len) {
            return Err(FormatError::format(format!("string length {len}")));
        }
        let mut bytes = vec![0u8; len as usize];
        self.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| FormatError::format(format!("string bytes: {e}")))
    }
}
