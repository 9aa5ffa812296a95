//! Reading the binary input container (§6.1).

use crate::dihedral::Dihedral;
use crate::sequence::{SequenceSet, SequenceSetError};
use std::fmt;
use std::io::Read;

/// Errors produced while decoding a malformed input container.
///
/// Unlike [`SequenceSetError`], which only covers inconsistencies between an
/// already-parsed lengths/buffer pair, this additionally covers the file
/// being too short to hold its own declared header or body.
#[derive(Debug)]
pub enum ContainerError {
    /// The file ended before a complete `u32` header could be read.
    TruncatedHeader,
    /// The file ended before all `N` declared lengths could be read.
    TruncatedLengths { expected: usize, read: usize },
    /// The file ended before all declared dihedral data could be read.
    TruncatedData { expected_bytes: usize, read_bytes: usize },
    /// The parsed lengths and buffer were internally inconsistent.
    Sequence(SequenceSetError),
    /// A genuine I/O error (not a short read) occurred while reading the stream.
    Io(std::io::Error),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::TruncatedHeader => {
                write!(f, "input container is too short to hold the sequence count header")
            }
            ContainerError::TruncatedLengths { expected, read } => {
                write!(
                    f,
                    "input container declares {expected} sequence lengths, but only {read} could be read"
                )
            }
            ContainerError::TruncatedData { expected_bytes, read_bytes } => {
                write!(
                    f,
                    "input container declares {expected_bytes} bytes of dihedral data, but only {read_bytes} could be read"
                )
            }
            ContainerError::Sequence(e) => write!(f, "{e}"),
            ContainerError::Io(e) => write!(f, "i/o error while reading input container: {e}"),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::Sequence(e) => Some(e),
            ContainerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SequenceSetError> for ContainerError {
    fn from(value: SequenceSetError) -> Self {
        ContainerError::Sequence(value)
    }
}

impl From<ContainerError> for std::io::Error {
    fn from(value: ContainerError) -> Self {
        std::io::Error::other(value)
    }
}

/// Reads a [`SequenceSet`] from the §6.1 binary container, validating as it
/// goes rather than trusting the declared counts.
///
/// Works over any [`Read`], buffered or not, so it is equally suited to a
/// file or standard input.
///
/// ## Errors
///
/// Returns [`ContainerError`] if the stream ends before the declared header,
/// lengths, or data are fully present, or if the declared lengths are
/// themselves invalid (negative, too long, or inconsistent with the data
/// actually present).
pub fn read_sequence_set<R: Read>(mut reader: R) -> Result<SequenceSet, ContainerError> {
    let mut header_buf = [0u8; 4];
    read_exact_or(&mut reader, &mut header_buf, ContainerError::TruncatedHeader)?;
    let n = u32::from_le_bytes(header_buf) as usize;

    let mut lengths = Vec::with_capacity(n);
    for index in 0..n {
        let mut len_buf = [0u8; 2];
        match reader.read_exact(&mut len_buf) {
            Ok(()) => lengths.push(i16::from_le_bytes(len_buf)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(ContainerError::TruncatedLengths { expected: n, read: index });
            }
            Err(e) => return Err(ContainerError::Io(e)),
        }
    }

    let total_dihedrals: usize = lengths
        .iter()
        .map(|&len| (len.max(0)) as usize)
        .sum();
    let expected_bytes = total_dihedrals.saturating_mul(4);

    let mut data_buf = vec![0u8; expected_bytes];
    let mut read_so_far = 0usize;
    loop {
        match reader.read(&mut data_buf[read_so_far..]) {
            Ok(0) => break,
            Ok(bytes) => read_so_far += bytes,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ContainerError::Io(e)),
        }
        if read_so_far == expected_bytes {
            break;
        }
    }
    if read_so_far != expected_bytes {
        return Err(ContainerError::TruncatedData { expected_bytes, read_bytes: read_so_far });
    }

    let buffer = data_buf
        .chunks_exact(4)
        .map(|chunk| {
            let phi = i16::from_le_bytes([chunk[0], chunk[1]]);
            let psi = i16::from_le_bytes([chunk[2], chunk[3]]);
            Dihedral::new(phi, psi)
        })
        .collect();

    SequenceSet::new(lengths, buffer).map_err(ContainerError::from)
}

fn read_exact_or<R: Read>(reader: &mut R, buf: &mut [u8], err: ContainerError) -> Result<(), ContainerError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            err
        } else {
            ContainerError::Io(e)
        }
    })
}
