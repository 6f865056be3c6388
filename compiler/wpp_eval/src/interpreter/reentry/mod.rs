//! `eval`/`!` and `use`: parse more text into the running arena and
//! evaluate it against the same environment.
//!
//! Re-parsed text never recovers from syntax errors; the first one aborts
//! the re-entry.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wpp_ir::{NodeId, SourceId, SourceMode};
use wpp_parse::Recovery;

use super::intrinsic::to_path;
use super::Interpreter;
use crate::errors::{empty_path, file_not_found, file_unreadable, syntax_error, EvalError, EvalResult};

impl Interpreter {
    /// Evaluate `expr`, then run its output as code. Every failure inside is
    /// reported at this node.
    #[tracing::instrument(level = "debug", skip(self, expr))]
    pub(super) fn codeify(&mut self, node: NodeId, expr: NodeId) -> EvalResult {
        let code = self.eval(expr)?;
        let parent = self.arena.position(node).source;
        let path = self.sources.get(parent).path.clone();
        let source = self.sources.add(path, code, SourceMode::Eval);

        let root = self
            .parse_nested(node, source)
            .map_err(|err| err.relocate(node))?;
        self.arena.set_parent(root, node);
        self.eval(root).map_err(|err| err.relocate(node))
    }

    /// Evaluate the file named by `path`. Failures keep their location in
    /// that file.
    #[tracing::instrument(level = "debug", skip(self, path))]
    pub(super) fn use_file(&mut self, node: NodeId, path: NodeId) -> EvalResult {
        let requested = self.eval(path)?;
        if requested.is_empty() {
            return Err(empty_path(node, "use"));
        }

        let Some(found) = self.search(&to_path(&requested)) else {
            return Err(file_not_found(node, &requested));
        };
        let canonical = found
            .canonicalize()
            .map_err(|err| file_unreadable(node, &found, err))?;
        if !self.env.mark_seen(canonical.clone()) {
            debug!(path = %canonical.display(), "already sourced");
            return Ok(Vec::new());
        }

        let text = std::fs::read(&canonical).map_err(|err| file_unreadable(node, &canonical, err))?;
        let source = self.sources.add(&canonical, text, SourceMode::Source);

        let previous = std::env::current_dir().map_err(|err| file_unreadable(node, &canonical, err))?;
        if let Some(dir) = canonical.parent() {
            std::env::set_current_dir(dir).map_err(|err| file_unreadable(node, &canonical, err))?;
        }

        let result = self
            .parse_nested(node, source)
            .and_then(|root| self.eval(root));

        if let Err(err) = std::env::set_current_dir(&previous) {
            warn!(%err, dir = %previous.display(), "could not restore working directory");
        }
        result
    }

    /// The working directory first, then each search path.
    fn search(&self, requested: &Path) -> Option<PathBuf> {
        if requested.is_absolute() {
            return requested.is_file().then(|| requested.to_path_buf());
        }
        std::iter::once(requested.to_path_buf())
            .chain(self.config.search_paths.iter().map(|dir| dir.join(requested)))
            .find(|candidate| candidate.is_file())
    }

    fn parse_nested(&mut self, node: NodeId, source: SourceId) -> Result<NodeId, EvalError> {
        let out = self.parse(source, Recovery::None);
        self.warnings.extend(out.warnings);
        match out.errors.first() {
            Some(err) => Err(syntax_error(node, source, err)),
            None => Ok(out.root),
        }
    }
}
