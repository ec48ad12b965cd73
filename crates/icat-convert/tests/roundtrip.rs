//! Whole-file round-trip tests for the flatten/unflatten pair.

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use icat_convert::{CoeffSource, flatten_catalog_files, unflatten_csv_files};

fn catalog_json(with_coeffs: bool) -> Value {
    let mut catalog = json!({
        "groups": [
            {"id": "energy", "label": "Energy", "icon": "bolt"},
            {"id": "gases", "label": "Medical gases", "icon": "wind"}
        ],
        "interventions": [
            {
                "id": "led-retrofit",
                "group": "energy",
                "title": "LED retrofit",
                "type": "slider",
                "impact_category": "energy",
                "range": {"min": 0, "max": 100, "step": 5, "unit": "%"},
                "baseline_control": {
                    "label": "Current LED share",
                    "type": "percent",
                    "default_enabled": true,
                    "default_value": 20,
                    "min": 0,
                    "max": 100,
                    "step": 1,
                    "unit": "%"
                },
                "calculation": {
                    "method": "kwh_reduction",
                    "formula_note": "kWh saved x grid factor",
                    "params": {
                        "kwh_per_hour_per_bed": 0.3,
                        "grid_factor_source": {"source": "assumptions.grid.factor_kg_per_kwh"},
                        "percent_reduction": {"source_value": true}
                    }
                },
                "ui": {
                    "icon": "lightbulb",
                    "summary": "Swap halogen for LED",
                    "details_markdown": "Reduces lighting load, ward-wide",
                    "references": [{"label": "A", "url": "http://a"}]
                }
            },
            {
                "id": "switch-off",
                "group": "energy",
                "title": "Switch-off policy",
                "type": "binary",
                "impact_category": "energy",
                "baseline_control": {
                    "label": "Policy active",
                    "type": "boolean",
                    "default_enabled": false
                },
                "calculation": {
                    "method": "direct_savings",
                    "formula_note": "fixed annual saving",
                    "params": {
                        "annual_usage_kg": 12,
                        "category": "electricity"
                    }
                },
                "ui": {
                    "icon": "power",
                    "summary": "Overnight switch-off",
                    "details_markdown": "Turn off idle equipment",
                    "references": []
                }
            }
        ]
    });
    if with_coeffs {
        catalog["equivalency_coeffs"] = json!({
            "cars_per_tCO2e": 0.5,
            "acres_forest_per_tCO2e": 0.07,
            "tree_seedlings_10yr_per_tCO2e": 8.0
        });
    }
    catalog
}

struct Workspace {
    _dir: TempDir,
    json_in: PathBuf,
    groups_csv: PathBuf,
    interventions_csv: PathBuf,
    json_out: PathBuf,
}

fn workspace(catalog: &Value) -> Workspace {
    let dir = TempDir::new().unwrap();
    let json_in = dir.path().join("catalog.json");
    fs::write(&json_in, serde_json::to_string_pretty(catalog).unwrap()).unwrap();
    Workspace {
        json_in,
        groups_csv: dir.path().join("groups.csv"),
        interventions_csv: dir.path().join("interventions.csv"),
        json_out: dir.path().join("rebuilt.json"),
        _dir: dir,
    }
}

#[test]
fn test_round_trip_with_sidecar_is_lossless() {
    let catalog = catalog_json(true);
    let ws = workspace(&catalog);

    let flatten = flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();
    assert_eq!(flatten.group_count, 2);
    assert_eq!(flatten.intervention_count, 2);
    let sidecar = flatten.sidecar.expect("sidecar written");
    assert_eq!(sidecar, ws.interventions_csv.with_extension("equiv.json"));
    assert!(sidecar.exists());

    let unflatten =
        unflatten_csv_files(&ws.groups_csv, &ws.interventions_csv, &ws.json_out, None).unwrap();
    assert_eq!(unflatten.group_count, 2);
    assert_eq!(unflatten.intervention_count, 2);
    assert_eq!(unflatten.coeff_source, CoeffSource::Sidecar);

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&ws.json_out).unwrap()).unwrap();
    assert_eq!(rebuilt, catalog);
}

#[test]
fn test_no_coeffs_means_no_sidecar_and_defaults() {
    let ws = workspace(&catalog_json(false));

    let flatten = flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();
    assert!(flatten.sidecar.is_none());
    assert!(!ws.interventions_csv.with_extension("equiv.json").exists());

    let unflatten =
        unflatten_csv_files(&ws.groups_csv, &ws.interventions_csv, &ws.json_out, None).unwrap();
    assert_eq!(unflatten.coeff_source, CoeffSource::Default);

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&ws.json_out).unwrap()).unwrap();
    assert_eq!(
        rebuilt["equivalency_coeffs"],
        json!({
            "cars_per_tCO2e": 0.45,
            "acres_forest_per_tCO2e": 0.06,
            "tree_seedlings_10yr_per_tCO2e": 7.0
        })
    );
}

#[test]
fn test_empty_coeffs_object_writes_no_sidecar() {
    let mut catalog = catalog_json(false);
    catalog["equivalency_coeffs"] = json!({});
    let ws = workspace(&catalog);

    let flatten = flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();
    assert!(flatten.sidecar.is_none());
}

#[test]
fn test_explicit_equiv_override_wins_over_sidecar() {
    let ws = workspace(&catalog_json(true));
    flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();

    let override_path = ws.json_in.parent().unwrap().join("override.equiv.json");
    fs::write(&override_path, r#"{"cars_per_tCO2e": 9.9}"#).unwrap();

    let unflatten = unflatten_csv_files(
        &ws.groups_csv,
        &ws.interventions_csv,
        &ws.json_out,
        Some(&override_path),
    )
    .unwrap();
    assert_eq!(unflatten.coeff_source, CoeffSource::Override);

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&ws.json_out).unwrap()).unwrap();
    assert_eq!(
        rebuilt["equivalency_coeffs"],
        json!({"cars_per_tCO2e": 9.9})
    );
}

#[test]
fn test_missing_equiv_override_is_fatal() {
    let ws = workspace(&catalog_json(false));
    flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();

    let missing = ws.json_in.parent().unwrap().join("missing.equiv.json");
    let result = unflatten_csv_files(
        &ws.groups_csv,
        &ws.interventions_csv,
        &ws.json_out,
        Some(&missing),
    );
    assert!(result.is_err());
}

#[test]
fn test_slider_dropped_range_stays_dropped() {
    // A non-slider with a source range loses it on flatten; the rebuilt
    // catalog must not resurrect it.
    let mut catalog = catalog_json(false);
    catalog["interventions"][1]["range"] = json!({"min": 1, "max": 2});
    let ws = workspace(&catalog);

    flatten_catalog_files(&ws.json_in, &ws.groups_csv, &ws.interventions_csv).unwrap();
    unflatten_csv_files(&ws.groups_csv, &ws.interventions_csv, &ws.json_out, None).unwrap();

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&ws.json_out).unwrap()).unwrap();
    assert!(rebuilt["interventions"][1].get("range").is_none());
}

#[test]
fn test_malformed_json_is_fatal() {
    let dir = TempDir::new().unwrap();
    let json_in = dir.path().join("broken.json");
    fs::write(&json_in, "{not json").unwrap();
    let result = flatten_catalog_files(
        &json_in,
        &dir.path().join("groups.csv"),
        &dir.path().join("interventions.csv"),
    );
    assert!(result.is_err());
}
