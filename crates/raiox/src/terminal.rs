//! Prompted line input.

use std::io::{ErrorKind, Write as _};

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::render;

/// Reads one line per prompt from `R`.
pub struct Terminal<R> {
    reader: R,
}

impl Terminal<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Terminal<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Prints `prompt` and reads the next line, line ending included.
    ///
    /// A line that is not valid UTF-8 is reported and skipped; the prompt
    /// is shown again. Returns `None` on end of input or when the input
    /// can no longer be read.
    pub async fn read_line(&mut self, prompt: &str) -> Option<String> {
        loop {
            print!("{prompt}");
            std::io::stdout().flush().ok();

            let mut line = String::new();
            match self.reader.read_line(&mut line).await {
                Ok(0) => return None,
                Ok(_) => return Some(line),
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    warn!("skipping undecodable input line: {err}");
                    println!("{}", render::invalid_input());
                }
                Err(err) => {
                    error!("error reading input: {err}");
                    return None;
                }
            }
        }
    }
}
