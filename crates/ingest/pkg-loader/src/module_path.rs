use tracing::info;

use crate::LOG_TARGET_LOAD;
use crate::command::run_captured;
use crate::error::{LoadError, STEP_MODULE_PATH};

/// Asks the build tool for the import path of the enclosing module.
pub fn resolve_module_path(command: &[String]) -> Result<String, LoadError> {
    let stdout = run_captured(STEP_MODULE_PATH, command, &[])?;
    let module = parse_module_path(&stdout)?;
    info!(target: LOG_TARGET_LOAD, "module path: {module}");
    Ok(module)
}

/// Exactly one non-blank line is expected; in workspace mode the tool lists every
/// module and the root is ambiguous.
pub fn parse_module_path(stdout: &str) -> Result<String, LoadError> {
    let lines: Vec<&str> = stdout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    match lines.as_slice() {
        [] => Err(LoadError::NoModule),
        [module] => Ok((*module).to_string()),
        many => Err(LoadError::MultipleModules(
            many.iter().map(|m| m.to_string()).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_is_trimmed() {
        assert_eq!(parse_module_path("example.com/m\n").unwrap(), "example.com/m");
        assert_eq!(parse_module_path("  example.com/m  \r\n\n").unwrap(), "example.com/m");
    }

    #[test]
    fn empty_output_is_an_error() {
        assert!(matches!(parse_module_path(""), Err(LoadError::NoModule)));
        assert!(matches!(parse_module_path(" \n"), Err(LoadError::NoModule)));
    }

    #[test]
    fn several_modules_are_ambiguous() {
        let err = parse_module_path("example.com/a\nexample.com/b\n").unwrap_err();
        assert_eq!(err.to_string(), "expected one module, found 2: example.com/a, example.com/b");
        assert_eq!(err.step(), STEP_MODULE_PATH);
    }

    #[cfg(unix)]
    #[test]
    fn runs_the_configured_command() {
        let command = vec!["echo".to_string(), "example.com/m".to_string()];
        assert_eq!(resolve_module_path(&command).unwrap(), "example.com/m");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_reported() {
        let err = resolve_module_path(&["false".to_string()]).unwrap_err();
        assert!(matches!(err, LoadError::CommandFailed { .. }));

        let err = resolve_module_path(&["apicompat-no-such-program".to_string()]).unwrap_err();
        assert!(matches!(err, LoadError::Spawn { .. }));

        let err = resolve_module_path(&[]).unwrap_err();
        assert!(matches!(err, LoadError::EmptyCommand { step: STEP_MODULE_PATH }));
    }
}
