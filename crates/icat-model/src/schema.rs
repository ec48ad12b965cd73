//! Fixed column schema of the flat CSV representation.
//!
//! The column lists are part of the external contract: every intervention
//! maps to exactly one row of [`INTERVENTION_COLUMNS`], and absent optional
//! substructures serialize as empty cells.

/// Header of the groups CSV.
pub const GROUP_COLUMNS: [&str; 3] = ["id", "label", "icon"];

/// Calculation parameter names, in column order. Each maps to a
/// `param_`-prefixed column via [`param_column`].
pub const PARAM_FIELDS: [&str; 12] = [
    "kwh_per_hour_per_bed",
    "grid_factor_source",
    "annual_usage_kg",
    "gwp100",
    "annual_agent_minutes",
    "agent_consumption_ml_per_min",
    "density_g_per_ml",
    "percent_reduction",
    "category",
    "scale_with_value_pct",
    "kg_per_hour",
    "kg_co2e_per_puff",
];

/// Header of the interventions CSV, in fixed order.
pub const INTERVENTION_COLUMNS: [&str; 35] = [
    // identity & grouping
    "id",
    "group",
    "title",
    "type",
    "impact_category",
    // slider range (only used when type=slider)
    "range_min",
    "range_max",
    "range_step",
    "range_unit",
    // baseline control
    "baseline_label",
    "baseline_type",
    "baseline_default_enabled",
    "baseline_default_value",
    "baseline_min",
    "baseline_max",
    "baseline_step",
    "baseline_unit",
    // calculation
    "calc_method",
    "calc_formula_note",
    // params
    "param_kwh_per_hour_per_bed",
    "param_grid_factor_source",
    "param_annual_usage_kg",
    "param_gwp100",
    "param_annual_agent_minutes",
    "param_agent_consumption_ml_per_min",
    "param_density_g_per_ml",
    "param_percent_reduction",
    "param_category",
    "param_scale_with_value_pct",
    "param_kg_per_hour",
    "param_kg_co2e_per_puff",
    // UI
    "ui_icon",
    "ui_summary",
    "ui_details_markdown",
    "ui_references",
];

/// Maps a parameter field name to its CSV column name.
pub fn param_column(field: &str) -> String {
    format!("param_{field}")
}
