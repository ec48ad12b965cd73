//! Data model for hospital-intervention carbon catalogs.
//!
//! The catalog is a JSON envelope with three top-level keys:
//! `equivalency_coeffs`, `groups`, and `interventions`. This crate defines
//! the serde types for that envelope plus the fixed column schema the flat
//! CSV representation uses.

pub mod catalog;
pub mod schema;

pub use catalog::{
    BaselineControl, Calculation, Catalog, Group, Intervention, ParamValue, RangeSpec, Reference,
    Ui, default_equivalency_coeffs,
};
pub use schema::{GROUP_COLUMNS, INTERVENTION_COLUMNS, PARAM_FIELDS, param_column};
