//! Subprocesses for `run` and `pipe`.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// What a finished command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Captured stdout with one trailing newline removed.
    pub stdout: Vec<u8>,
}

/// Run `cmd` through `sh -c`, optionally feeding `input` on stdin.
///
/// Blocks until the child exits. Stderr is inherited.
pub fn run_shell(cmd: &[u8], input: Option<&[u8]>) -> io::Result<CommandOutput> {
    let cmd = String::from_utf8_lossy(cmd);
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd.as_ref())
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()?;

    // Stdin is fed from a second thread so a child that streams its output
    // can never fill the stdout pipe while we are still writing.
    let stdin = child.stdin.take();
    let (output, written) = thread::scope(|scope| {
        let writer = scope.spawn(move || match (input, stdin) {
            (Some(data), Some(mut stdin)) => stdin.write_all(data),
            _ => Ok(()),
        });
        let output = child.wait_with_output();
        (output, writer.join())
    });

    let output = output?;
    match written {
        // A child that exits without reading its input closes the pipe early.
        Ok(Err(err)) if err.kind() != io::ErrorKind::BrokenPipe => return Err(err),
        Ok(_) => {}
        Err(_) => return Err(io::Error::other("stdin writer panicked")),
    }

    let mut stdout = output.stdout;
    if stdout.last() == Some(&b'\n') {
        stdout.pop();
    }
    Ok(CommandOutput {
        success: output.status.success(),
        stdout,
    })
}
