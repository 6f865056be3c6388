//! Intrinsics with effects: subprocesses, files, assertions and logging.
//!
//! Arguments are evaluated left to right. The pure string utilities live
//! in [`crate::strings`]; `eval` and `use` are in `reentry`.

use std::path::PathBuf;

use tracing::debug;
use wpp_ir::NodeId;

use super::Interpreter;
use crate::errors::{
    assertion_failed, empty_path, file_not_found, intrinsic_disabled, invalid_slice,
    subprocess_failed, subprocess_not_started, user_error, EvalResult,
};
use crate::process::run_shell;
use crate::strings;

/// Interpret an evaluated string as a filesystem path.
pub(super) fn to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

impl Interpreter {
    // === Processes ===

    pub(super) fn run(&mut self, node: NodeId, cmd: NodeId) -> EvalResult {
        if self.config.disable_run {
            return Err(intrinsic_disabled(node, "run"));
        }
        let cmd = self.eval(cmd)?;
        shell(node, &cmd, None)
    }

    pub(super) fn pipe(&mut self, node: NodeId, cmd: NodeId, data: NodeId) -> EvalResult {
        if self.config.disable_run {
            return Err(intrinsic_disabled(node, "pipe"));
        }
        let cmd = self.eval(cmd)?;
        let data = self.eval(data)?;
        shell(node, &cmd, Some(&data))
    }

    // === Files ===

    pub(super) fn file(&mut self, node: NodeId, path: NodeId) -> EvalResult {
        let path = self.eval(path)?;
        if path.is_empty() {
            return Err(empty_path(node, "file"));
        }
        std::fs::read(to_path(&path)).map_err(|err| {
            debug!(%err, "file read failed");
            file_not_found(node, &path)
        })
    }

    // === Checks and messages ===

    pub(super) fn assert(&mut self, node: NodeId, lhs: NodeId, rhs: NodeId) -> EvalResult {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        if lhs == rhs {
            Ok(Vec::new())
        } else {
            Err(assertion_failed(node, &lhs, &rhs))
        }
    }

    pub(super) fn user_error(&mut self, node: NodeId, msg: NodeId) -> EvalResult {
        let msg = self.eval(msg)?;
        Err(user_error(node, &msg))
    }

    pub(super) fn log(&mut self, msg: NodeId) -> EvalResult {
        let msg = self.eval(msg)?;
        self.log.log(&msg);
        Ok(Vec::new())
    }

    pub(super) fn slice_range(
        &mut self,
        node: NodeId,
        expr: NodeId,
        start: NodeId,
        end: NodeId,
    ) -> EvalResult {
        let value = self.eval(expr)?;
        let start = self.eval(start)?;
        let end = self.eval(end)?;
        strings::slice_range(&value, &start, &end).map_err(|err| invalid_slice(node, &err.to_string()))
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(cmd = %String::from_utf8_lossy(cmd)))]
fn shell(node: NodeId, cmd: &[u8], input: Option<&[u8]>) -> EvalResult {
    match run_shell(cmd, input) {
        Ok(out) if out.success => Ok(out.stdout),
        Ok(_) => Err(subprocess_failed(node, cmd)),
        Err(err) => Err(subprocess_not_started(node, cmd, err)),
    }
}
