use std::error::Error as _;

use super::{Error, Severity};

/// A policy for classifying and emitting errors.
///
/// Libraries return [`crate::Result`] and never print; the binary installs a policy at
/// the top of the run to decide how a failure is presented.
pub trait ErrorPolicy: Send + Sync {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    /// Emit the error according to the policy
    fn emit(&self, error: &Error);
}

/// Writes a plain diagnostic, including the chain of sources, to stderr.
#[derive(Debug, Clone, Default)]
pub struct StderrPolicy;

impl ErrorPolicy for StderrPolicy {
    fn emit(&self, error: &Error) {
        eprintln!("{}", render_chain(error));
        if error.is_internal() {
            eprintln!("note: this is a defect in apicompat, not in the analysed code");
        }
    }
}

/// `error: outer: cause: root cause`
pub fn render_chain(error: &Error) -> String {
    let mut out = format!("error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        // transparent variants repeat their inner message as the first source
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FatalError;

    #[test]
    fn chain_includes_io_cause_once() {
        let err: Error = FatalError::FileOperation {
            operation: "create_dir_all",
            path: "out/p".into(),
            source: std::io::Error::other("permission denied"),
        }
        .into();
        let rendered = render_chain(&err);
        assert!(rendered.starts_with("error: I/O failure on \"out/p\": create_dir_all: permission denied"));
        assert_eq!(rendered.matches("permission denied").count(), 1);
    }
}
