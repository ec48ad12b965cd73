//! Unflattener: dual-CSV rows back to the nested catalog JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use icat_model::{
    BaselineControl, Calculation, Catalog, Group, Intervention, PARAM_FIELDS, ParamValue,
    RangeSpec, Ui, default_equivalency_coeffs,
};

use crate::coerce::{coerce_num, parse_bool};
use crate::error::{ConvertError, Result};
use crate::refs::decode_references;
use crate::sidecar;

/// What an unflatten run produced.
#[derive(Debug)]
pub struct UnflattenOutcome {
    pub group_count: usize,
    pub intervention_count: usize,
    pub coeff_source: CoeffSource,
}

/// Where the output `equivalency_coeffs` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoeffSource {
    /// Explicitly passed coefficient file.
    Override,
    /// Sidecar discovered next to the interventions CSV.
    Sidecar,
    /// Hardcoded defaults.
    Default,
}

#[derive(Debug, Clone)]
struct CsvTable {
    columns: BTreeMap<String, usize>,
    rows: Vec<Vec<String>>,
}

/// Header-indexed access to one CSV row. Missing columns and short rows read
/// as empty cells.
struct RowView<'a> {
    columns: &'a BTreeMap<String, usize>,
    row: &'a [String],
}

impl RowView<'_> {
    fn cell(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|idx| self.row.get(*idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| ConvertError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ConvertError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        records.push(row);
    }
    let mut columns = BTreeMap::new();
    let mut rows = Vec::new();
    if let Some((header, data)) = records.split_first() {
        for (idx, name) in header.iter().enumerate() {
            columns.entry(normalize_header(name)).or_insert(idx);
        }
        rows = data.to_vec();
    }
    Ok(CsvTable { columns, rows })
}

/// Rebuilds a group from its CSV row, whitespace-trimmed.
fn group_from_row(view: &RowView<'_>) -> Group {
    Group {
        id: view.cell("id").to_string(),
        label: view.cell("label").to_string(),
        icon: view.cell("icon").to_string(),
    }
}

/// Classifies one parameter cell into its JSON form.
///
/// Order matters: the `source_value` marker wins, then a strict numeric
/// parse, then dotted-path detection, then boolean literals, then the raw
/// string. Numeric-parse-first keeps `"3.14"` a float while `"1.2.3"`
/// classifies as a source path.
pub fn classify_param(raw: &str) -> Option<ParamValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "source_value" {
        return Some(ParamValue::SourceValue);
    }
    if let Some(number) = coerce_num(trimmed) {
        return Some(ParamValue::Scalar(Value::Number(number)));
    }
    if trimmed.contains('.') {
        return Some(ParamValue::Source(trimmed.to_string()));
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Some(ParamValue::Scalar(Value::Bool(true)));
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(ParamValue::Scalar(Value::Bool(false)));
    }
    Some(ParamValue::Scalar(Value::String(trimmed.to_string())))
}

fn numeric_cell(view: &RowView<'_>, column: &str) -> Option<Value> {
    coerce_num(view.cell(column)).map(Value::Number)
}

fn string_cell(view: &RowView<'_>, column: &str) -> Option<Value> {
    let text = view.cell(column);
    if text.is_empty() {
        None
    } else {
        Some(Value::String(text.to_string()))
    }
}

/// Rebuilds an intervention from its CSV row.
fn intervention_from_row(view: &RowView<'_>) -> Intervention {
    let kind = view.cell("type").to_string();

    let range = if kind == "slider" {
        let spec = RangeSpec {
            min: numeric_cell(view, "range_min"),
            max: numeric_cell(view, "range_max"),
            step: numeric_cell(view, "range_step"),
            unit: string_cell(view, "range_unit"),
        };
        if spec.is_empty() { None } else { Some(spec) }
    } else {
        None
    };

    let mut baseline = BaselineControl {
        label: view.cell("baseline_label").to_string(),
        kind: view.cell("baseline_type").to_string(),
        default_enabled: Some(Value::Bool(
            parse_bool(view.cell("baseline_default_enabled")).unwrap_or(true),
        )),
        ..BaselineControl::default()
    };
    if !baseline.is_boolean() {
        baseline.default_value = numeric_cell(view, "baseline_default_value");
        baseline.min = numeric_cell(view, "baseline_min");
        baseline.max = numeric_cell(view, "baseline_max");
        baseline.step = numeric_cell(view, "baseline_step");
        baseline.unit = string_cell(view, "baseline_unit");
    }

    let mut params = Map::new();
    for field in PARAM_FIELDS {
        if let Some(param) = classify_param(view.cell(&icat_model::param_column(field))) {
            params.insert(field.to_string(), param.into_value());
        }
    }

    Intervention {
        id: view.cell("id").to_string(),
        group: view.cell("group").to_string(),
        title: view.cell("title").to_string(),
        kind,
        impact_category: view.cell("impact_category").to_string(),
        range,
        baseline_control: baseline,
        calculation: Calculation {
            method: view.cell("calc_method").to_string(),
            formula_note: view.cell("calc_formula_note").to_string(),
            params,
        },
        ui: Ui {
            icon: view.cell("ui_icon").to_string(),
            summary: view.cell("ui_summary").to_string(),
            details_markdown: view.cell("ui_details_markdown").to_string(),
            references: decode_references(view.cell("ui_references")),
        },
    }
}

/// Reads the groups CSV into group records.
pub fn read_groups_csv(path: &Path) -> Result<Vec<Group>> {
    let table = read_csv_table(path)?;
    Ok(table
        .rows
        .iter()
        .map(|row| {
            group_from_row(&RowView {
                columns: &table.columns,
                row,
            })
        })
        .collect())
}

/// Reads the interventions CSV into intervention records.
pub fn read_interventions_csv(path: &Path) -> Result<Vec<Intervention>> {
    let table = read_csv_table(path)?;
    Ok(table
        .rows
        .iter()
        .map(|row| {
            intervention_from_row(&RowView {
                columns: &table.columns,
                row,
            })
        })
        .collect())
}

fn resolve_equivalency_coeffs(
    interventions_csv: &Path,
    equiv_override: Option<&Path>,
) -> Result<(Map<String, Value>, CoeffSource)> {
    if let Some(path) = equiv_override {
        return Ok((sidecar::read_sidecar(path)?, CoeffSource::Override));
    }
    match sidecar::probe_sidecar(interventions_csv) {
        Some(coeffs) => Ok((coeffs, CoeffSource::Sidecar)),
        None => Ok((default_equivalency_coeffs(), CoeffSource::Default)),
    }
}

/// Reconstructs the catalog JSON from the two CSVs and writes it.
///
/// The output coefficients come from `equiv_override` when given (fatal if
/// unreadable), else from a sidecar discovered next to the interventions CSV,
/// else from the hardcoded defaults.
pub fn unflatten_csv_files(
    groups_csv: &Path,
    interventions_csv: &Path,
    json_out: &Path,
    equiv_override: Option<&Path>,
) -> Result<UnflattenOutcome> {
    let groups = read_groups_csv(groups_csv)?;
    let interventions = read_interventions_csv(interventions_csv)?;

    let known_ids: BTreeSet<&str> = groups.iter().map(|group| group.id.as_str()).collect();
    for intervention in &interventions {
        if !intervention.group.is_empty() && !known_ids.contains(intervention.group.as_str()) {
            warn!(
                intervention_id = %intervention.id,
                group_id = %intervention.group,
                "intervention references unknown group"
            );
        }
    }

    let (coeffs, coeff_source) = resolve_equivalency_coeffs(interventions_csv, equiv_override)?;
    let catalog = Catalog {
        equivalency_coeffs: Some(coeffs),
        groups,
        interventions,
    };
    write_catalog_json(json_out, &catalog)?;
    debug!(
        group_count = catalog.groups.len(),
        intervention_count = catalog.interventions.len(),
        ?coeff_source,
        "unflattened catalog"
    );
    Ok(UnflattenOutcome {
        group_count: catalog.groups.len(),
        intervention_count: catalog.interventions.len(),
        coeff_source,
    })
}

/// Writes the catalog as pretty-printed JSON with a trailing newline.
pub fn write_catalog_json(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut text =
        serde_json::to_string_pretty(catalog).map_err(|source| ConvertError::JsonWrite {
            path: path.to_path_buf(),
            source,
        })?;
    text.push('\n');
    fs::write(path, text).map_err(|source| ConvertError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
