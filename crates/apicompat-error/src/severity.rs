//// Coarse-grained classification for programmatic handling of errors.
//!
//! - Error: the analysed code cannot be snapshotted as written
//! - Fatal: the environment or apicompat itself failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Fatal,
}
