//! Catalog conversion: flatten nested JSON to dual CSVs and back.
//!
//! Both directions are single-pass, stateless record transforms. Per-field
//! coercion failures degrade to empty cells or omitted fields; only file I/O
//! and document-level parse failures are fatal.

pub mod coerce;
pub mod error;
pub mod flatten;
pub mod refs;
pub mod sidecar;
pub mod unflatten;

pub use error::{ConvertError, Result};
pub use flatten::{FlattenOutcome, flatten_catalog_files, read_catalog};
pub use unflatten::{CoeffSource, UnflattenOutcome, unflatten_csv_files};
