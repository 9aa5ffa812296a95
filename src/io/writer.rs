//! Writing the binary output container (§6.2).

use std::io::{Seek, SeekFrom, Write};

/// Reference sector size used for padding a real output file (§6.2).
const SECTOR_SIZE: u64 = 512;

/// Streams score groups to the §6.2 binary container.
///
/// Writes the `u32 N` header once at construction, then accepts one group of
/// `N - 1 - i` scores at a time (the caller is responsible for supplying
/// groups in increasing `i` order; see the driver in [`crate::align::driver`]
/// for how that ordering is maintained under parallel execution).
pub struct ScoreWriter<W: Write> {
    sink: W,
    payload_bytes: u64,
}

impl<W: Write> ScoreWriter<W> {
    /// Creates a new writer and immediately writes the `u32 N` header.
    ///
    /// ## Errors
    ///
    /// Propagates any I/O error from writing the header.
    pub fn new(mut sink: W, n: u32) -> std::io::Result<Self> {
        sink.write_all(&n.to_le_bytes())?;
        Ok(Self { sink, payload_bytes: 4 })
    }

    /// Writes one row's worth of scores as contiguous little-endian `i32`s.
    ///
    /// ## Errors
    ///
    /// Propagates any I/O error from the underlying sink.
    pub fn write_row(&mut self, scores: &[i32]) -> std::io::Result<()> {
        for &score in scores {
            self.sink.write_all(&score.to_le_bytes())?;
        }
        self.payload_bytes += scores.len() as u64 * 4;
        Ok(())
    }

    /// Consumes the writer, flushing the sink.
    ///
    /// This does not pad; use [`ScoreWriter::finish_padded`] when the sink is
    /// a real file that should be rounded up to a sector boundary.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write + Seek> ScoreWriter<W> {
    /// Consumes the writer, padding the file with zero bytes up to the next
    /// [`SECTOR_SIZE`]-byte boundary before flushing.
    ///
    /// Padding only makes sense for a sink with a fixed block size; this
    /// requires `Seek` so it cannot accidentally be called on a stream like
    /// stdout (see [`ScoreWriter::finish`] for that case).
    ///
    /// ## Errors
    ///
    /// Propagates any I/O error from writing the padding or flushing.
    pub fn finish_padded(mut self) -> std::io::Result<W> {
        let remainder = self.payload_bytes % SECTOR_SIZE;
        if remainder != 0 {
            let pad_len = SECTOR_SIZE - remainder;
            let zeros = vec![0u8; pad_len as usize];
            self.sink.write_all(&zeros)?;
        }
        self.sink.flush()?;
        self.sink.seek(SeekFrom::Start(0))?;
        Ok(self.sink)
    }
}
