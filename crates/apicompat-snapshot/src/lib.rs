//! Snapshot engine for the exported API of Go packages.
//!
//! The pipeline per package is: [`select`] decides eligibility, [`extract`] turns each
//! exported free function into a [`SnapshotEntry`] by running [`convert`] over its
//! parameter and result types, [`assemble`] deduplicates and orders the entries, and
//! [`render`] emits the Go unit that aliases every function to a variable of its
//! reconstructed type. [`driver`] ties these together for a whole module.

pub mod assemble;
pub mod convert;
pub mod driver;
pub mod error;
pub mod extract;
mod logging;
pub mod render;
pub mod select;

pub use assemble::{DEFAULT_FILE_NAME, DEFAULT_OUTPUT_ROOT, OutputLayout, PackageSnapshot, assemble};
pub use convert::{convert, convert_signature};
pub use driver::{run, run_with_progress, snapshot_package};
pub use error::{ConvertError, ExtractError, SnapshotError, Slot};
pub use extract::{SnapshotEntry, extract};
pub use render::{ImportTable, render_file, render_type};
pub use select::select;
