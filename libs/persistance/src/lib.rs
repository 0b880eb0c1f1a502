pub mod fs;

pub use fs::{create_output, read_lines, try_read_lines, ReadError, WriteError};
