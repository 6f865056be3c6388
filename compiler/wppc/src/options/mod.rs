//! Command-line options.
//!
//! Parsed by hand: flags may appear anywhere, value flags take the next
//! argument (`-o out.txt`) or an attached value (`--output=out.txt`,
//! `-Wall`), and everything else is an input file.

use std::path::PathBuf;

use wpp_diagnostic::{ColorMode, UnknownWarning, WarningFlags, MAX_REC_DEPTH};
use wpp_eval::EvalConfig;

pub const USAGE: &str = "\
Usage: wpp [options] [file...]

Evaluates each file in order and prints the combined output. With no
files, starts the REPL when stdin is a terminal and reads a program from
stdin otherwise.

Options:
  -o, --output <file>        Write output to <file> instead of stdout
  -f, --force                Overwrite the output file if it exists
  -W, --warnings <name>      Enable warning <name>, or disable it with no-<name>
                             (param-shadow-var, param-shadow-param,
                             func-redefined, var-redefined, deep-recursion,
                             extra-args, all)
  -r, --repl                 Start the REPL even when files are given
  -R, --disable-run          Make `run` and `pipe` fail
  -s, --search-path <dir>    Directory searched by `use` (repeatable)
      --color <when>         auto, always or never
      --inline               Print each diagnostic on a single line
  -h, --help                 Show this help message
  -V, --version              Show version information

Set WPP_LOG (e.g. WPP_LOG=wpp_eval=debug) to trace the interpreter.
";

/// Everything the driver needs to know about one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub repl: bool,
    pub warnings: WarningFlags,
    pub disable_run: bool,
    pub search_paths: Vec<PathBuf>,
    pub color: ColorMode,
    pub inline: bool,
    pub help: bool,
    pub version: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            inputs: Vec::new(),
            output: None,
            force: false,
            repl: false,
            warnings: WarningFlags::default(),
            disable_run: false,
            search_paths: Vec::new(),
            color: ColorMode::Auto,
            inline: false,
            help: false,
            version: false,
        }
    }
}

/// Why the command line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' requires a value")]
    MissingValue(String),
    #[error("option '{0}' does not take a value")]
    UnexpectedValue(String),
    #[error(transparent)]
    UnknownWarning(#[from] UnknownWarning),
    #[error("invalid color mode '{0}' (expected auto, always or never)")]
    InvalidColor(String),
}

impl Options {
    /// Parse arguments, not including the program name.
    pub fn parse<I>(args: I) -> Result<Options, OptionsError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter().map(Into::into);
        let mut only_inputs = false;

        while let Some(arg) = args.next() {
            if only_inputs || !arg.starts_with('-') {
                options.inputs.push(PathBuf::from(arg));
                continue;
            }
            if arg == "--" {
                only_inputs = true;
                continue;
            }

            // `-Wname` and `--flag=value` carry their value inline.
            let (flag, attached) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
                _ => match arg.strip_prefix("-W") {
                    Some(value) if !value.is_empty() => ("-W".to_owned(), Some(value.to_owned())),
                    _ => (arg, None),
                },
            };

            match flag.as_str() {
                "-o" | "--output" => {
                    options.output = Some(PathBuf::from(value(&flag, attached, &mut args)?));
                }
                "-W" | "--warnings" => {
                    options.warnings.apply(&value(&flag, attached, &mut args)?)?;
                }
                "-s" | "--search-path" => {
                    options
                        .search_paths
                        .push(PathBuf::from(value(&flag, attached, &mut args)?));
                }
                "--color" => {
                    let mode = value(&flag, attached, &mut args)?;
                    options.color =
                        ColorMode::from_arg(&mode).ok_or(OptionsError::InvalidColor(mode))?;
                }
                switch => {
                    if attached.is_some() {
                        return Err(OptionsError::UnexpectedValue(flag));
                    }
                    match switch {
                        "-f" | "--force" => options.force = true,
                        "-r" | "--repl" => options.repl = true,
                        "-R" | "--disable-run" => options.disable_run = true,
                        "--inline" => options.inline = true,
                        "-h" | "--help" => options.help = true,
                        "-V" | "--version" => options.version = true,
                        _ => return Err(OptionsError::UnknownOption(flag)),
                    }
                }
            }
        }

        Ok(options)
    }

    /// Interpreter settings selected by these options.
    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            warnings: self.warnings,
            disable_run: self.disable_run,
            search_paths: self.search_paths.clone(),
            max_depth_warning: MAX_REC_DEPTH,
        }
    }

    /// Whether to start the REPL. Without inputs it depends on whether stdin
    /// is a terminal.
    pub fn wants_repl(&self, stdin_is_tty: bool) -> bool {
        self.repl || (self.inputs.is_empty() && stdin_is_tty)
    }
}

fn value(
    flag: &str,
    attached: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, OptionsError> {
    attached
        .or_else(|| rest.next())
        .ok_or_else(|| OptionsError::MissingValue(flag.to_owned()))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
