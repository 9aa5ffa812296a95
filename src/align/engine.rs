//! The single-pair aligner: a windowed, antidiagonal traversal of the local
//! alignment recurrence.
//!
//! This is deliberately structured after a systolic/pipelined hardware
//! design: the full `m x n` matrix is never materialized. Instead, the
//! horizontal sequence is swept in fixed-width tiles, and within each tile
//! cells are visited in antidiagonal order so that every cell's three
//! dependencies live in the two most recently completed diagonals (or in the
//! propagation column carried over from the tile to its left).

use crate::align::params::ScoringParams;
use crate::dihedral::{similarity, Dihedral, MAX_SEQ_LEN};

/// Width of one horizontal tile.
pub const WIN_COLS: usize = 16;

/// Height of the vertical window. Fixed to [`MAX_SEQ_LEN`], matching the
/// reference design where the window height is a power of two equal to the
/// longest supported sequence.
pub const WIN_ROWS: usize = MAX_SEQ_LEN;

const _: () = assert!(WIN_ROWS > WIN_COLS, "window must be taller than it is wide");
const _: () = assert!(WIN_ROWS.is_power_of_two(), "window height must be a power of two");

/// Owns the resident vertical-sequence buffer for one row of pairwise
/// alignments (one fixed `V`, many `H`s), per the reuse strategy in §4.2/§4.3:
/// load `V` into the window once, then call [`align_one`](Self::align_one)
/// once per horizontal sequence without reloading it.
pub struct PairAligner {
    seq_ver: Box<[Dihedral; WIN_ROWS]>,
    max_valid_row: usize,
}

impl PairAligner {
    /// Loads the vertical sequence `v` into a fresh window.
    ///
    /// `v` must not exceed [`MAX_SEQ_LEN`]; this is a precondition enforced by
    /// [`SequenceSet`](crate::sequence::SequenceSet) at construction time, so
    /// it is only `debug_assert!`ed here.
    #[must_use]
    pub fn new(v: &[Dihedral]) -> Self {
        debug_assert!(v.len() <= WIN_ROWS, "vertical sequence exceeds MAX_SEQ_LEN");

        let mut seq_ver = Box::new([Dihedral::default(); WIN_ROWS]);
        seq_ver[..v.len()].copy_from_slice(v);

        Self { seq_ver, max_valid_row: v.len() }
    }

    /// Aligns the resident vertical sequence against `h`, returning the
    /// maximum local-alignment score (always non-negative).
    #[must_use]
    pub fn align_one(&self, h: &[Dihedral], params: ScoringParams) -> i32 {
        debug_assert!(h.len() <= MAX_SEQ_LEN, "horizontal sequence exceeds MAX_SEQ_LEN");

        if self.max_valid_row == 0 || h.is_empty() {
            return 0;
        }

        // The rightmost column of the previous horizontal tile, seeding the
        // leftmost column of the next one. Starts at zero for the first tile.
        let mut hor_prop = vec![0i32; WIN_ROWS];
        // The two most recently completed antidiagonals within the current tile.
        let mut diag_im1 = [0i32; WIN_COLS];
        let mut diag_im2 = [0i32; WIN_COLS];
        let mut max_score = 0i32;

        // Diagonals needed to fully sweep a `max_valid_row x WIN_COLS` tile;
        // further diagonals cannot introduce a new valid cell (§4.2, "Early
        // termination").
        let diag_count = self.max_valid_row + WIN_COLS - 1;

        let mut c_base = 0usize;
        while c_base < h.len() {
            let tile_cols = (h.len() - c_base).min(WIN_COLS);

            let mut seq_hor = [Dihedral::default(); WIN_COLS];
            seq_hor[..tile_cols].copy_from_slice(&h[c_base..c_base + tile_cols]);

            diag_im1 = [0; WIN_COLS];
            diag_im2 = [0; WIN_COLS];

            for i in 0..diag_count {
                let mut diag_cur = [0i32; WIN_COLS];

                for (j, cur_slot) in diag_cur.iter_mut().enumerate() {
                    let r_signed = i as isize - j as isize;
                    let c = j;
                    let in_bounds = r_signed >= 0 && (r_signed as usize) < WIN_ROWS;
                    let r = if in_bounds { r_signed as usize } else { usize::MAX };

                    // The three recurrence dependencies, each defaulting to
                    // the boundary value 0 when the corresponding cell lies
                    // outside the matrix (r < 0 or c < 0).
                    let diag_neighbor = if c >= 1 && r_signed >= 1 { diag_im2[c - 1] } else { 0 };
                    let left_neighbor = if c == 0 {
                        if in_bounds { hor_prop[r] } else { 0 }
                    } else if r_signed >= 0 {
                        diag_im1[c - 1]
                    } else {
                        0
                    };
                    let top_neighbor = if r_signed >= 1 { diag_im1[c] } else { 0 };

                    let sim = if in_bounds {
                        similarity(self.seq_ver[r], seq_hor[c], params.scoring_offset)
                    } else {
                        0
                    };

                    let cur = 0
                        .max(diag_neighbor.saturating_add(sim))
                        .max(left_neighbor.saturating_add(params.gap_penalty))
                        .max(top_neighbor.saturating_add(params.gap_penalty));

                    if in_bounds && r < self.max_valid_row && c < tile_cols && cur > max_score {
                        max_score = cur;
                    }

                    // Propagate the rightmost column of the tile for use by
                    // the next horizontal tile's leftmost column.
                    if c == WIN_COLS - 1 && in_bounds {
                        hor_prop[r] = cur;
                    }

                    *cur_slot = cur;
                }

                diag_im2 = diag_im1;
                diag_im1 = diag_cur;
            }

            c_base += WIN_COLS;
        }

        max_score
    }
}

/// Convenience wrapper for aligning a single pair without manually
/// constructing a [`PairAligner`]. Equivalent to `PairAligner::new(v).align_one(h, params)`.
#[inline]
#[must_use]
pub fn align_one(v: &[Dihedral], h: &[Dihedral], params: ScoringParams) -> i32 {
    PairAligner::new(v).align_one(h, params)
}
