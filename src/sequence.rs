//! The sequence data model: a flat buffer of [`Dihedral`]s sliced by
//! per-sequence lengths.

use crate::dihedral::{Dihedral, MAX_SEQ_LEN};
use std::fmt;

/// A collection of dihedral sequences backed by one flat buffer.
///
/// `lengths[k]` gives the length of the `k`-th sequence, and the sequences are
/// concatenated in order inside `buffer`. This mirrors the on-disk container
/// layout (§6.1) directly, so reading one into memory is a matter of
/// validating and copying three flat regions.
#[derive(Debug, Clone)]
pub struct SequenceSet {
    lengths: Vec<i16>,
    buffer: Vec<Dihedral>,
    // Precomputed start offset of each sequence within `buffer`, with one
    // trailing sentinel equal to `buffer.len()`, so that `offsets[k]..offsets[k+1]`
    // is always a valid range.
    offsets: Vec<usize>,
}

/// An error produced when the parts passed to [`SequenceSet::new`] are
/// internally inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSetError {
    /// A declared length was negative.
    NegativeLength { index: usize, length: i16 },
    /// A declared length exceeded [`MAX_SEQ_LEN`].
    LengthTooLong { index: usize, length: i16 },
    /// The sum of the declared lengths did not match the buffer size.
    LengthSumMismatch { expected: usize, actual: usize },
}

impl fmt::Display for SequenceSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceSetError::NegativeLength { index, length } => {
                write!(f, "sequence {index} has a negative length ({length})")
            }
            SequenceSetError::LengthTooLong { index, length } => {
                write!(f, "sequence {index} has length {length}, exceeding the maximum of {MAX_SEQ_LEN}")
            }
            SequenceSetError::LengthSumMismatch { expected, actual } => {
                write!(
                    f,
                    "the sum of the declared sequence lengths ({expected}) does not match the buffer length ({actual})"
                )
            }
        }
    }
}

impl std::error::Error for SequenceSetError {}

impl SequenceSet {
    /// Builds a [`SequenceSet`] from a buffer of dihedrals and their
    /// per-sequence lengths, validating the invariants from §3.
    ///
    /// ## Errors
    ///
    /// Returns [`SequenceSetError`] if any length is negative, exceeds
    /// [`MAX_SEQ_LEN`], or if the lengths do not sum to `buffer.len()`.
    pub fn new(lengths: Vec<i16>, buffer: Vec<Dihedral>) -> Result<Self, SequenceSetError> {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut running = 0usize;
        offsets.push(0);

        for (index, &length) in lengths.iter().enumerate() {
            if length < 0 {
                return Err(SequenceSetError::NegativeLength { index, length });
            }
            if (length as usize) > MAX_SEQ_LEN {
                return Err(SequenceSetError::LengthTooLong { index, length });
            }
            running += length as usize;
            offsets.push(running);
        }

        if running != buffer.len() {
            return Err(SequenceSetError::LengthSumMismatch {
                expected: running,
                actual: buffer.len(),
            });
        }

        Ok(Self { lengths, buffer, offsets })
    }

    /// The number of sequences in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// A read-only slice into the `k`-th sequence.
    ///
    /// Per invariant 4 (§3), slices returned for distinct indices never
    /// overlap.
    #[inline]
    #[must_use]
    pub fn seq(&self, k: usize) -> &[Dihedral] {
        &self.buffer[self.offsets[k]..self.offsets[k + 1]]
    }
}
