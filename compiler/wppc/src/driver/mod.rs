//! File runs: inputs in, one combined output out.

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wpp_diagnostic::TerminalEmitter;
use wpp_eval::Interpreter;
use wpp_ir::SourceMode;

use crate::options::Options;
use crate::repl::repl;
use crate::session::{Failure, Session};

/// Run the invocation described by `options`.
pub fn execute(options: &Options) -> Result<(), Failure> {
    let root = std::env::current_dir()?;
    let emitter = TerminalEmitter::stderr(options.color, io::stderr().is_terminal())
        .inline(options.inline)
        .with_root(root);
    let interp = Interpreter::builder().config(options.eval_config()).build();
    let mut session = Session::new(interp, emitter);

    if options.wants_repl(io::stdin().is_terminal()) {
        // Inputs are loaded first so their definitions are available.
        let out = run_files(&mut session, &options.inputs)?;
        write_output(None, &out)?;
        return repl(&mut session, io::stdin().lock(), io::stdout().lock()).map_err(Failure::Io);
    }

    if let Some(path) = &options.output {
        check_output(path, options.force)?;
    }

    let out = if options.inputs.is_empty() {
        let mut text = Vec::new();
        io::stdin().lock().read_to_end(&mut text)?;
        session.run_source("<stdin>", text, SourceMode::File)?
    } else {
        run_files(&mut session, &options.inputs)?
    };

    write_output(options.output.as_deref(), &out)
}

/// Evaluate each file in order against the session's environment and
/// concatenate the outputs. Stops at the first failure.
pub fn run_files<W: Write>(session: &mut Session<W>, paths: &[PathBuf]) -> Result<Vec<u8>, Failure> {
    let mut out = Vec::new();
    for path in paths {
        out.extend(run_file(session, path)?);
    }
    Ok(out)
}

/// Evaluate one file with the working directory set to the file's directory.
pub fn run_file<W: Write>(session: &mut Session<W>, path: &Path) -> Result<Vec<u8>, Failure> {
    let text = std::fs::read(path).map_err(|source| Failure::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let _cwd = match path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => Some(WorkingDir::enter(dir)?),
        None => None,
    };
    session.run_source(path, text, SourceMode::File)
}

/// Refuse to overwrite an existing output file unless forced.
pub fn check_output(path: &Path, force: bool) -> Result<(), Failure> {
    if path.exists() && !force {
        return Err(Failure::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Write to `path`, or to stdout when there is none.
pub fn write_output(path: Option<&Path>, out: &[u8]) -> Result<(), Failure> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), bytes = out.len(), "writing output");
            std::fs::write(path, out)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(out)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Changes the working directory and restores the previous one on drop.
struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    fn enter(dir: &Path) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(WorkingDir { previous })
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(err) = std::env::set_current_dir(&self.previous) {
            warn!(%err, dir = %self.previous.display(), "could not restore working directory");
        }
    }
}
