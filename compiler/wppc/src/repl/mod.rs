//! Interactive prompt.
//!
//! Each line is parsed and evaluated as its own `repl` source, against the
//! same environment as every line before it. Errors are reported and the
//! loop carries on; end of input ends the session.

use std::io::{self, BufRead, Write};

use tracing::debug;
use wpp_ir::SourceMode;

use crate::session::Session;

pub const BANNER: &str = "wpp repl";
pub const PROMPT: &str = ">>> ";

/// Read lines from `input` until end of input, writing results to `output`.
///
/// Output that does not already end in a newline gets one, so the next
/// prompt starts on its own line.
pub fn repl<W, R, O>(session: &mut Session<W>, mut input: R, mut output: O) -> io::Result<()>
where
    W: Write,
    R: BufRead,
    O: Write,
{
    writeln!(output, "{BANNER}")?;
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match session.run_source("<repl>", line.as_bytes().to_vec(), SourceMode::Repl) {
            Ok(out) => {
                output.write_all(&out)?;
                if out.last().is_some_and(|&b| b != b'\n') {
                    output.write_all(b"\n")?;
                }
            }
            Err(err) => debug!(%err, "line failed"),
        }
    }
}
