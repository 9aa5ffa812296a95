//! Minimal file-or-stream opening helpers.
//!
//! A much smaller cousin of the reference codebase's `OpenOptions` builder
//! family: this crate only ever has one input and one output, each either a
//! path or a standard stream, so a builder with capacity/zip/pairing support
//! would be pure ceremony here.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Stdin, Stdout, Write, stdin, stdout};
use std::path::Path;

/// The input side: either a file opened for reading, or standard input.
pub enum InputSource {
    File(BufReader<File>),
    Stdin(Stdin),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::File(f) => f.read(buf),
            InputSource::Stdin(s) => s.read(buf),
        }
    }
}

/// Opens `path` for reading if given, falling back to standard input.
///
/// ## Errors
///
/// Propagates any I/O error from opening the file.
pub fn open_input(path: Option<&Path>) -> io::Result<InputSource> {
    match path {
        Some(path) => Ok(InputSource::File(BufReader::new(File::open(path)?))),
        None => Ok(InputSource::Stdin(stdin())),
    }
}

/// The output side: either a file created for writing, or standard output.
///
/// Only [`OutputSink::File`] supports seeking, which is what
/// [`ScoreWriter::finish_padded`](crate::io::writer::ScoreWriter::finish_padded)
/// requires to round a real file up to a sector boundary; writing to
/// standard output always goes through
/// [`ScoreWriter::finish`](crate::io::writer::ScoreWriter::finish) instead.
pub enum OutputSink {
    File(File),
    Stdout(Stdout),
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::File(f) => f.write(buf),
            OutputSink::Stdout(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::File(f) => f.flush(),
            OutputSink::Stdout(s) => s.flush(),
        }
    }
}

impl Seek for OutputSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            OutputSink::File(f) => f.seek(pos),
            OutputSink::Stdout(_) => Err(io::Error::new(io::ErrorKind::Unsupported, "standard output is not seekable")),
        }
    }
}

impl OutputSink {
    /// Whether this sink is a real, seekable file (and thus eligible for
    /// sector padding).
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, OutputSink::File(_))
    }
}

/// Opens `path` for writing (truncating/creating) if given, falling back to
/// standard output.
///
/// ## Errors
///
/// Propagates any I/O error from creating the file.
pub fn open_output(path: Option<&Path>) -> io::Result<OutputSink> {
    match path {
        Some(path) => Ok(OutputSink::File(File::create(path)?)),
        None => Ok(OutputSink::Stdout(stdout())),
    }
}
