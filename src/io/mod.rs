//! The I/O boundary (C4): decoding the input container, opening streams, and
//! writing the output container.

pub mod container;
pub mod open_options;
pub mod writer;

pub use container::{ContainerError, read_sequence_set};
pub use open_options::{InputSource, OutputSink, open_input, open_output};
pub use writer::ScoreWriter;
