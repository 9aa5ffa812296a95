//! The all-pairs driver (C3): sweeps the triangular `i < j` index space and
//! writes one score group per row.

use crate::align::engine::PairAligner;
use crate::align::params::ScoringParams;
use crate::io::ScoreWriter;
use crate::sequence::SequenceSet;
use std::io::Write;
use std::num::NonZeroUsize;

#[cfg(not(feature = "dev_no_rayon"))]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Computes one row of the triangular score matrix: the scores of `(i, i+1),
/// (i, i+2), ..., (i, N-1)`.
fn align_row(sequences: &SequenceSet, i: usize, params: ScoringParams) -> Vec<i32> {
    let aligner = PairAligner::new(sequences.seq(i));
    (i + 1..sequences.len())
        .map(|j| aligner.align_one(sequences.seq(j), params))
        .collect()
}

/// Aligns every pair `(i, j)` with `i < j` and streams the results to
/// `writer`, one row at a time, in increasing `i` order (§5).
///
/// Rows are independent, so the outer loop may be parallelized; this crate
/// partitions by vertical index `i`; (§5, "Permissible parallelism"), which
/// keeps each worker's resident vertical buffer (the [`PairAligner`]) intact
/// without cross-worker synchronization. `threads` mirrors
/// [`AlignerConfig::threads`](crate::args::AlignerConfig): `Some(1)` (or the
/// `dev_no_rayon` feature) forces strictly sequential execution; `None` uses
/// Rayon's default global pool sizing.
///
/// Regardless of thread count, the bytes written are identical: rows are
/// computed independently and written to `writer` strictly in increasing `i`
/// order.
///
/// ## Errors
///
/// Propagates any I/O error from the underlying writer.
pub fn align_all<W: Write>(
    sequences: &SequenceSet, params: ScoringParams, threads: Option<NonZeroUsize>, writer: &mut ScoreWriter<W>,
) -> std::io::Result<()> {
    let n = sequences.len();
    if n < 2 {
        return Ok(());
    }

    let rows = compute_rows(sequences, params, threads);
    for row in &rows {
        writer.write_row(row)?;
    }
    Ok(())
}

#[cfg(feature = "dev_no_rayon")]
fn compute_rows(sequences: &SequenceSet, params: ScoringParams, _threads: Option<NonZeroUsize>) -> Vec<Vec<i32>> {
    (0..sequences.len() - 1).map(|i| align_row(sequences, i, params)).collect()
}

#[cfg(not(feature = "dev_no_rayon"))]
fn compute_rows(sequences: &SequenceSet, params: ScoringParams, threads: Option<NonZeroUsize>) -> Vec<Vec<i32>> {
    let run = || (0..sequences.len() - 1).into_par_iter().map(|i| align_row(sequences, i, params)).collect();

    match threads {
        Some(n) if n.get() == 1 => (0..sequences.len() - 1).map(|i| align_row(sequences, i, params)).collect(),
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n.get())
            .build()
            .expect("failed to build a bounded Rayon thread pool")
            .install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dihedral::Dihedral;
    use crate::io::ScoreWriter;

    fn make_sequences() -> SequenceSet {
        // Four singleton sequences at distinct angles, so every pairwise
        // score is deterministic and easy to hand-check.
        let buffer = vec![Dihedral::new(0, 0), Dihedral::new(0, 0), Dihedral::new(100, 0), Dihedral::new(0, 0)];
        SequenceSet::new(vec![1, 1, 1, 1], buffer).unwrap()
    }

    fn collect_rows(n: usize, params: ScoringParams, threads: Option<NonZeroUsize>) -> Vec<i32> {
        let sequences = make_sequences();
        let _ = n;
        let mut buf = Vec::new();
        {
            let mut writer = ScoreWriter::new(&mut buf, sequences.len() as u32).unwrap();
            align_all(&sequences, params, threads, &mut writer).unwrap();
            writer.finish().unwrap();
        }
        // Strip the 4-byte header and decode the rest as i32 LE.
        buf[4..].chunks_exact(4).map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect()
    }

    #[test]
    fn sequential_and_parallel_runs_produce_identical_bytes() {
        let params = ScoringParams::new(100, -10);
        let sequential = collect_rows(4, params, Some(NonZeroUsize::new(1).unwrap()));
        let parallel = collect_rows(4, params, None);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn row_order_matches_increasing_i_then_increasing_j() {
        let params = ScoringParams::new(100, -10);
        let scores = collect_rows(4, params, Some(NonZeroUsize::new(1).unwrap()));
        // Row 0: (0,1) (0,2) (0,3); row 1: (1,2) (1,3); row 2: (2,3).
        assert_eq!(scores.len(), 6);

        let sequences = make_sequences();
        let aligner0 = PairAligner::new(sequences.seq(0));
        assert_eq!(scores[0], aligner0.align_one(sequences.seq(1), params));
        assert_eq!(scores[1], aligner0.align_one(sequences.seq(2), params));
        assert_eq!(scores[2], aligner0.align_one(sequences.seq(3), params));
    }

    #[test]
    fn fewer_than_two_sequences_writes_nothing_past_the_header() {
        let buffer = vec![Dihedral::new(0, 0)];
        let sequences = SequenceSet::new(vec![1], buffer).unwrap();
        let mut buf = Vec::new();
        {
            let mut writer = ScoreWriter::new(&mut buf, 1).unwrap();
            align_all(&sequences, ScoringParams::new(1, -1), None, &mut writer).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(buf.len(), 4);
    }

    fn run_and_decode(sequences: &SequenceSet, params: ScoringParams) -> Vec<i32> {
        let mut buf = Vec::new();
        {
            let mut writer = ScoreWriter::new(&mut buf, sequences.len() as u32).unwrap();
            align_all(sequences, params, Some(NonZeroUsize::new(1).unwrap()), &mut writer).unwrap();
            writer.finish().unwrap();
        }
        buf[4..].chunks_exact(4).map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect()
    }

    #[test]
    fn t2_identical_short_sequences() {
        let buffer = vec![
            Dihedral::new(10, 20),
            Dihedral::new(30, 40),
            Dihedral::new(50, 60),
            Dihedral::new(10, 20),
            Dihedral::new(30, 40),
            Dihedral::new(50, 60),
        ];
        let sequences = SequenceSet::new(vec![3, 3], buffer).unwrap();
        let scores = run_and_decode(&sequences, ScoringParams::new(10000, -1000));
        assert_eq!(scores, vec![30000]);
    }

    #[test]
    fn t4_triangle() {
        let buffer = vec![
            Dihedral::new(0, 0),
            Dihedral::new(0, 0),
            Dihedral::new(0, 0),
            Dihedral::new(0, 0),
            Dihedral::new(32767, 32767),
            Dihedral::new(32767, 32767),
        ];
        let sequences = SequenceSet::new(vec![2, 2, 2], buffer).unwrap();
        let scores = run_and_decode(&sequences, ScoringParams::new(100, -50));
        assert_eq!(scores, vec![200, 0, 0]);
    }

    #[test]
    fn t5_empty_middle_sequence() {
        let buffer = vec![Dihedral::new(5, 5), Dihedral::new(5, 5), Dihedral::new(5, 5), Dihedral::new(5, 5)];
        let sequences = SequenceSet::new(vec![2, 0, 2], buffer).unwrap();
        let scores = run_and_decode(&sequences, ScoringParams::new(1000, -1));
        assert_eq!(scores, vec![0, 2000, 0]);
    }

    #[test]
    fn symmetry_score_is_independent_of_pair_order() {
        let params = ScoringParams::new(500, -75);
        let cases: Vec<(Vec<Dihedral>, Vec<Dihedral>)> = vec![
            (vec![Dihedral::new(0, 0), Dihedral::new(100, 0), Dihedral::new(200, 0)], vec![Dihedral::new(0, 0), Dihedral::new(50, 0)]),
            (
                vec![Dihedral::new(10, 20), Dihedral::new(30, 40), Dihedral::new(50, 60), Dihedral::new(70, 80)],
                vec![Dihedral::new(30, 40), Dihedral::new(50, 60)],
            ),
            (vec![Dihedral::new(16384, -16384)], vec![Dihedral::new(0, 0), Dihedral::new(1, 1)]),
            (vec![], vec![Dihedral::new(1, 1)]),
        ];

        for (v, h) in cases {
            let forward = PairAligner::new(&v).align_one(&h, params);
            let backward = PairAligner::new(&h).align_one(&v, params);
            assert_eq!(forward, backward, "score(v, h) != score(h, v) for v={v:?}, h={h:?}");
        }
    }
}
