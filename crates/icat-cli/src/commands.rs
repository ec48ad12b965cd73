use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use icat_convert::{flatten_catalog_files, unflatten_csv_files};

use crate::cli::{CsvToJsonArgs, JsonToCsvArgs};
use crate::types::{Artifact, ConvertReport};

/// Flattens a catalog JSON file into the groups/interventions CSV pair.
pub fn run_json_to_csv(args: &JsonToCsvArgs) -> Result<ConvertReport> {
    let start = Instant::now();
    let outcome = flatten_catalog_files(&args.json, &args.groups_out, &args.interventions_out)
        .with_context(|| format!("flatten {}", args.json.display()))?;
    info!(
        group_count = outcome.group_count,
        intervention_count = outcome.intervention_count,
        sidecar = outcome.sidecar.is_some(),
        duration_ms = start.elapsed().as_millis(),
        "json-to-csv complete"
    );
    let mut artifacts = vec![
        Artifact {
            kind: "groups CSV",
            path: args.groups_out.clone(),
            records: Some(outcome.group_count),
        },
        Artifact {
            kind: "interventions CSV",
            path: args.interventions_out.clone(),
            records: Some(outcome.intervention_count),
        },
    ];
    if let Some(sidecar) = outcome.sidecar {
        artifacts.push(Artifact {
            kind: "equivalency sidecar",
            path: sidecar,
            records: None,
        });
    }
    Ok(ConvertReport {
        sources: vec![args.json.clone()],
        artifacts,
    })
}

/// Rebuilds the catalog JSON from the groups/interventions CSV pair.
pub fn run_csv_to_json(args: &CsvToJsonArgs) -> Result<ConvertReport> {
    let start = Instant::now();
    let outcome = unflatten_csv_files(
        &args.groups,
        &args.interventions,
        &args.json_out,
        args.equiv.as_deref(),
    )
    .with_context(|| {
        format!(
            "unflatten {} + {}",
            args.groups.display(),
            args.interventions.display()
        )
    })?;
    info!(
        group_count = outcome.group_count,
        intervention_count = outcome.intervention_count,
        coeff_source = ?outcome.coeff_source,
        duration_ms = start.elapsed().as_millis(),
        "csv-to-json complete"
    );
    let mut sources = vec![args.groups.clone(), args.interventions.clone()];
    if let Some(equiv) = &args.equiv {
        sources.push(equiv.clone());
    }
    Ok(ConvertReport {
        sources,
        artifacts: vec![Artifact {
            kind: "catalog JSON",
            path: args.json_out.clone(),
            records: Some(outcome.intervention_count),
        }],
    })
}
