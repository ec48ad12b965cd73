//! Flattener: nested catalog JSON to the dual-CSV representation.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use icat_model::{
    Catalog, GROUP_COLUMNS, Group, INTERVENTION_COLUMNS, Intervention, PARAM_FIELDS, ParamValue,
};

use crate::coerce::{cell_text, coerce_bool_value, opt_cell_text};
use crate::error::{ConvertError, Result};
use crate::refs::encode_references;
use crate::sidecar;

/// What a flatten run produced.
#[derive(Debug)]
pub struct FlattenOutcome {
    pub group_count: usize,
    pub intervention_count: usize,
    /// Path of the equivalency-coefficient sidecar, when one was written.
    pub sidecar: Option<PathBuf>,
}

/// Reads and parses a catalog JSON file.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConvertError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Maps a group to its CSV row, missing fields as empty strings.
pub fn group_row(group: &Group) -> Vec<String> {
    vec![group.id.clone(), group.label.clone(), group.icon.clone()]
}

/// Maps an intervention to its fixed-width CSV row.
///
/// Range cells are populated only for slider interventions; baseline numeric
/// cells only for non-boolean baselines. Absent optional substructures
/// degrade to empty cells.
pub fn intervention_row(intervention: &Intervention) -> Vec<String> {
    let mut row = Vec::with_capacity(INTERVENTION_COLUMNS.len());
    row.push(intervention.id.clone());
    row.push(intervention.group.clone());
    row.push(intervention.title.clone());
    row.push(intervention.kind.clone());
    row.push(intervention.impact_category.clone());

    let range = intervention
        .range
        .as_ref()
        .filter(|_| intervention.is_slider());
    row.push(opt_cell_text(range.and_then(|r| r.min.as_ref())));
    row.push(opt_cell_text(range.and_then(|r| r.max.as_ref())));
    row.push(opt_cell_text(range.and_then(|r| r.step.as_ref())));
    row.push(opt_cell_text(range.and_then(|r| r.unit.as_ref())));

    let baseline = &intervention.baseline_control;
    row.push(baseline.label.clone());
    row.push(baseline.kind.clone());
    row.push(coerce_bool_value(baseline.default_enabled.as_ref(), true).to_string());
    let numeric = |value: Option<&serde_json::Value>| {
        if baseline.is_boolean() {
            String::new()
        } else {
            opt_cell_text(value)
        }
    };
    row.push(numeric(baseline.default_value.as_ref()));
    row.push(numeric(baseline.min.as_ref()));
    row.push(numeric(baseline.max.as_ref()));
    row.push(numeric(baseline.step.as_ref()));
    row.push(numeric(baseline.unit.as_ref()));

    let calculation = &intervention.calculation;
    row.push(calculation.method.clone());
    row.push(calculation.formula_note.clone());
    for field in PARAM_FIELDS {
        row.push(param_cell(calculation.params.get(field)));
    }

    let ui = &intervention.ui;
    row.push(ui.icon.clone());
    row.push(ui.summary.clone());
    row.push(ui.details_markdown.clone());
    row.push(encode_references(&ui.references));

    debug_assert_eq!(row.len(), INTERVENTION_COLUMNS.len());
    row
}

/// Resolves a single calculation parameter to its cell text.
fn param_cell(value: Option<&serde_json::Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match ParamValue::from_json(value) {
        Some(ParamValue::Source(path)) => path,
        Some(ParamValue::SourceValue) => "source_value".to_string(),
        Some(ParamValue::Scalar(scalar)) => cell_text(&scalar),
        None => String::new(),
    }
}

/// Writes the groups CSV.
pub fn write_groups_csv(path: &Path, groups: &[Group]) -> Result<()> {
    let mut writer = csv_writer(path)?;
    write_record(&mut writer, path, &GROUP_COLUMNS)?;
    for group in groups {
        write_record(&mut writer, path, &group_row(group))?;
    }
    flush(writer, path)
}

/// Writes the interventions CSV.
pub fn write_interventions_csv(path: &Path, interventions: &[Intervention]) -> Result<()> {
    let mut writer = csv_writer(path)?;
    write_record(&mut writer, path, &INTERVENTION_COLUMNS)?;
    for intervention in interventions {
        write_record(&mut writer, path, &intervention_row(intervention))?;
    }
    flush(writer, path)
}

/// Flattens a catalog JSON file into the two CSVs, writing the
/// equivalency-coefficient sidecar when the catalog carries coefficients.
pub fn flatten_catalog_files(
    json_path: &Path,
    groups_out: &Path,
    interventions_out: &Path,
) -> Result<FlattenOutcome> {
    let catalog = read_catalog(json_path)?;
    write_groups_csv(groups_out, &catalog.groups)?;
    write_interventions_csv(interventions_out, &catalog.interventions)?;
    let sidecar = match catalog.nonempty_equivalency_coeffs() {
        Some(coeffs) => Some(sidecar::write_sidecar(interventions_out, coeffs)?),
        None => None,
    };
    debug!(
        group_count = catalog.groups.len(),
        intervention_count = catalog.interventions.len(),
        sidecar = sidecar.is_some(),
        "flattened catalog"
    );
    Ok(FlattenOutcome {
        group_count: catalog.groups.len(),
        intervention_count: catalog.interventions.len(),
        sidecar,
    })
}

fn csv_writer(path: &Path) -> Result<Writer<fs::File>> {
    Writer::from_path(path).map_err(|source| ConvertError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record<S: AsRef<[u8]>>(
    writer: &mut Writer<fs::File>,
    path: &Path,
    record: &[S],
) -> Result<()> {
    writer
        .write_record(record)
        .map_err(|source| ConvertError::CsvWrite {
            path: path.to_path_buf(),
            source,
        })
}

fn flush(mut writer: Writer<fs::File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| ConvertError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
