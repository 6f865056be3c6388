use super::*;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Result<Options, OptionsError> {
    Options::parse(args.iter().copied())
}

// === Inputs and switches ===

#[test]
fn no_arguments() {
    assert_eq!(parse(&[]).unwrap(), Options::default());
}

#[test]
fn flags_and_inputs_mix() {
    let options = parse(&["a.wpp", "-f", "-o", "out.txt", "b.wpp", "-R", "--inline"]).unwrap();
    assert_eq!(
        options.inputs,
        vec![PathBuf::from("a.wpp"), PathBuf::from("b.wpp")]
    );
    assert_eq!(options.output, Some(PathBuf::from("out.txt")));
    assert!(options.force);
    assert!(options.disable_run);
    assert!(options.inline);
    assert!(!options.repl);
}

#[test]
fn long_forms_and_attached_values() {
    let options = parse(&["--output=out.txt", "--force", "--repl", "--disable-run"]).unwrap();
    assert_eq!(options.output, Some(PathBuf::from("out.txt")));
    assert!(options.force && options.repl && options.disable_run);
}

#[test]
fn double_dash_ends_options() {
    let options = parse(&["--", "-odd.wpp"]).unwrap();
    assert_eq!(options.inputs, vec![PathBuf::from("-odd.wpp")]);
    assert_eq!(options.output, None);
}

#[test]
fn search_paths_accumulate_in_order() {
    let options = parse(&["-s", "lib", "--search-path", "vendor", "--search-path=extra"]).unwrap();
    assert_eq!(
        options.search_paths,
        vec![
            PathBuf::from("lib"),
            PathBuf::from("vendor"),
            PathBuf::from("extra")
        ]
    );
}

// === Warnings ===

#[test]
fn warnings_apply_in_order() {
    let options = parse(&["-W", "no-all", "-W", "extra-args"]).unwrap();
    assert_eq!(options.warnings, WarningFlags::EXTRA_ARGS);

    let options = parse(&["-Wall"]).unwrap();
    assert_eq!(options.warnings, WarningFlags::all());

    let options = parse(&["--warnings=no-func-redefined"]).unwrap();
    assert_eq!(
        options.warnings,
        WarningFlags::default() - WarningFlags::FUNC_REDEFINED
    );
}

#[test]
fn unknown_warning() {
    assert_eq!(
        parse(&["-Wbogus"]),
        Err(OptionsError::UnknownWarning(UnknownWarning("bogus".to_owned())))
    );
}

// === Colour ===

#[test]
fn color_modes() {
    assert_eq!(parse(&["--color", "never"]).unwrap().color, ColorMode::Never);
    assert_eq!(parse(&["--color=always"]).unwrap().color, ColorMode::Always);
    assert_eq!(
        parse(&["--color", "sometimes"]),
        Err(OptionsError::InvalidColor("sometimes".to_owned()))
    );
}

// === Errors ===

#[test]
fn rejected_command_lines() {
    assert_eq!(
        parse(&["a.wpp", "-o"]),
        Err(OptionsError::MissingValue("-o".to_owned()))
    );
    assert_eq!(
        parse(&["--bogus"]),
        Err(OptionsError::UnknownOption("--bogus".to_owned()))
    );
    assert_eq!(
        parse(&["--force=yes"]),
        Err(OptionsError::UnexpectedValue("--force".to_owned()))
    );
    assert_eq!(
        parse(&["-"]),
        Err(OptionsError::UnknownOption("-".to_owned()))
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        OptionsError::MissingValue("-s".to_owned()).to_string(),
        "option '-s' requires a value"
    );
    assert_eq!(
        OptionsError::from(UnknownWarning("x".to_owned())).to_string(),
        "unknown warning 'x'"
    );
}

// === Derived settings ===

#[test]
fn eval_config_carries_interpreter_settings() {
    let options = parse(&["-R", "-s", "lib", "-W", "no-all"]).unwrap();
    let config = options.eval_config();
    assert!(config.disable_run);
    assert_eq!(config.search_paths, vec![PathBuf::from("lib")]);
    assert_eq!(config.warnings, WarningFlags::empty());
    assert_eq!(config.max_depth_warning, MAX_REC_DEPTH);
}

#[test]
fn repl_selection() {
    let none = Options::default();
    assert!(none.wants_repl(true));
    assert!(!none.wants_repl(false));

    let with_input = parse(&["a.wpp"]).unwrap();
    assert!(!with_input.wants_repl(true));

    let forced = parse(&["a.wpp", "-r"]).unwrap();
    assert!(forced.wants_repl(false));
}
