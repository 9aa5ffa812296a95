use clap::Parser;
use dihedral_align::align::align_all;
use dihedral_align::args::{AlignerArgs, AlignerConfig};
use dihedral_align::io::{ScoreWriter, open_input, open_output, read_sequence_set};

fn main() -> std::process::ExitCode {
    let args = AlignerArgs::parse();

    match run(args.into()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dihedral-align: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(config: AlignerConfig) -> std::io::Result<()> {
    let input = open_input(config.input.as_deref())?;
    let sequences = read_sequence_set(input)?;

    let effective_threads = config.threads.map_or_else(num_cpus::get, std::num::NonZeroUsize::get);
    eprintln!(
        "dihedral-align: aligning {} sequences across up to {effective_threads} worker thread(s)",
        sequences.len()
    );

    let output = open_output(config.output.as_deref())?;
    let is_file = output.is_file();
    let mut writer = ScoreWriter::new(output, sequences.len() as u32)?;

    align_all(&sequences, config.scoring, config.threads, &mut writer)?;

    if is_file {
        writer.finish_padded()?;
    } else {
        writer.finish()?;
    }

    eprintln!("dihedral-align: done");
    Ok(())
}
