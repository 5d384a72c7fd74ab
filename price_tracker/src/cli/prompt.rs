//! Line-oriented interactive prompts.
//!
//! Generic over the reader and writer so the pipeline can be driven from
//! tests with in-memory buffers.

use std::io::{self, BufRead, Write};

/// Writes `message`, then reads one line and returns it trimmed.
///
/// End of input yields an empty string.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
