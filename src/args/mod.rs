//! Command-line argument parsing and validation for the `dihedral-align`
//! binary (§4.4, §6.3).

use crate::align::params::ScoringParams;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// The raw, unvalidated command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct AlignerArgs {
    /// Positive constant subtracted from the squared dihedral distance to
    /// form a similarity score.
    pub scoring_offset: i32,

    /// Additive penalty applied when the recurrence proceeds through a gap,
    /// typically negative.
    pub gap_penalty: i32,

    #[arg(long)]
    /// Path to the binary input container. Reads from standard input if not
    /// provided.
    pub input: Option<PathBuf>,

    #[arg(long, alias = "out")]
    /// Path to the binary output container. Writes to standard output if not
    /// provided.
    pub output: Option<PathBuf>,

    #[arg(long)]
    /// Caps the number of worker threads used for the pair loop. A value of
    /// 1 forces strictly sequential execution. Defaults to all available
    /// cores.
    pub threads: Option<NonZeroUsize>,
}

/// The validated, immutable configuration derived from [`AlignerArgs`].
///
/// Constructed once per run from the raw CLI arguments; never mutated
/// afterward. There is no additional cross-argument validation needed beyond
/// what clap itself enforces, since this surface has no conflicting flags.
pub struct AlignerConfig {
    pub scoring: ScoringParams,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub threads: Option<NonZeroUsize>,
}

impl From<AlignerArgs> for AlignerConfig {
    fn from(args: AlignerArgs) -> Self {
        Self {
            scoring: ScoringParams::new(args.scoring_offset, args.gap_penalty),
            input: args.input,
            output: args.output,
            threads: args.threads,
        }
    }
}
