//! Warning kinds and the flag set that enables them.

use std::fmt;

use bitflags::bitflags;

/// Every warning the parser or evaluator can raise.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WarningKind {
    ParamShadowVar,
    ParamShadowParam,
    FuncRedefined,
    VarRedefined,
    DeepRecursion,
    DeepExpression,
    ExtraArgs,
}

impl WarningKind {
    /// One-line overview used as the report headline.
    pub fn overview(self) -> &'static str {
        match self {
            WarningKind::ParamShadowVar => "parameter shadows variable",
            WarningKind::ParamShadowParam => "parameter shadows parameter",
            WarningKind::FuncRedefined => "function redefined",
            WarningKind::VarRedefined => "variable redefined",
            WarningKind::DeepRecursion => "deep recursion",
            WarningKind::DeepExpression => "deep expression",
            WarningKind::ExtraArgs => "extra arguments",
        }
    }

    /// The flag that gates this warning.
    ///
    /// Deep expressions share the `deep-recursion` switch.
    pub fn flag(self) -> WarningFlags {
        match self {
            WarningKind::ParamShadowVar => WarningFlags::PARAM_SHADOW_VAR,
            WarningKind::ParamShadowParam => WarningFlags::PARAM_SHADOW_PARAM,
            WarningKind::FuncRedefined => WarningFlags::FUNC_REDEFINED,
            WarningKind::VarRedefined => WarningFlags::VAR_REDEFINED,
            WarningKind::DeepRecursion | WarningKind::DeepExpression => {
                WarningFlags::DEEP_RECURSION
            }
            WarningKind::ExtraArgs => WarningFlags::EXTRA_ARGS,
        }
    }
}

bitflags! {
    /// Enabled warnings.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct WarningFlags: u8 {
        const PARAM_SHADOW_VAR = 1 << 0;
        const PARAM_SHADOW_PARAM = 1 << 1;
        const FUNC_REDEFINED = 1 << 2;
        const VAR_REDEFINED = 1 << 3;
        const DEEP_RECURSION = 1 << 4;
        const EXTRA_ARGS = 1 << 5;
    }
}

/// Switch names accepted by `-W`, paired with their flags.
const NAMES: &[(&str, WarningFlags)] = &[
    ("param-shadow-var", WarningFlags::PARAM_SHADOW_VAR),
    ("param-shadow-param", WarningFlags::PARAM_SHADOW_PARAM),
    ("func-redefined", WarningFlags::FUNC_REDEFINED),
    ("var-redefined", WarningFlags::VAR_REDEFINED),
    ("deep-recursion", WarningFlags::DEEP_RECURSION),
    ("extra-args", WarningFlags::EXTRA_ARGS),
    ("all", WarningFlags::all()),
];

/// A `-W` value that names no warning.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnknownWarning(pub String);

impl fmt::Display for UnknownWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown warning '{}'", self.0)
    }
}

impl std::error::Error for UnknownWarning {}

impl Default for WarningFlags {
    /// Everything except `extra-args`: passing extra arguments is how values
    /// reach the scope stack, so it is only reported on request.
    fn default() -> Self {
        WarningFlags::all() - WarningFlags::EXTRA_ARGS
    }
}

impl WarningFlags {
    /// Apply one `-W` switch: `name` enables, `no-name` disables.
    pub fn apply(&mut self, switch: &str) -> Result<(), UnknownWarning> {
        let (enable, name) = match switch.strip_prefix("no-") {
            Some(rest) => (false, rest),
            None => (true, switch),
        };

        let flags = NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, flags)| flags)
            .ok_or_else(|| UnknownWarning(switch.to_owned()))?;

        self.set(flags, enable);
        Ok(())
    }

    /// Whether warnings of `kind` should be reported.
    pub fn enabled(self, kind: WarningKind) -> bool {
        self.contains(kind.flag())
    }
}
