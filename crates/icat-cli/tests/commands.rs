//! Integration tests for the command runners.

use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use icat_cli::cli::{CsvToJsonArgs, JsonToCsvArgs};
use icat_cli::commands::{run_csv_to_json, run_json_to_csv};

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let catalog = json!({
        "equivalency_coeffs": {"cars_per_tCO2e": 0.5},
        "groups": [{"id": "energy", "label": "Energy", "icon": "bolt"}],
        "interventions": [{
            "id": "switch-off",
            "group": "energy",
            "title": "Switch-off policy",
            "type": "binary",
            "impact_category": "energy",
            "baseline_control": {
                "label": "Policy active",
                "type": "boolean",
                "default_enabled": true
            },
            "calculation": {
                "method": "direct_savings",
                "formula_note": "fixed annual saving",
                "params": {"annual_usage_kg": 12}
            },
            "ui": {
                "icon": "power",
                "summary": "Overnight switch-off",
                "details_markdown": "Turn off idle equipment",
                "references": []
            }
        }]
    });
    let path = dir.path().join("catalog.json");
    fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();
    path
}

#[test]
fn test_json_to_csv_then_csv_to_json() {
    let dir = TempDir::new().unwrap();
    let json_in = write_catalog(&dir);
    let groups_out = dir.path().join("groups.csv");
    let interventions_out = dir.path().join("interventions.csv");

    let report = run_json_to_csv(&JsonToCsvArgs {
        json: json_in.clone(),
        groups_out: groups_out.clone(),
        interventions_out: interventions_out.clone(),
    })
    .unwrap();
    assert_eq!(report.sources, vec![json_in]);
    // Groups CSV, interventions CSV, and the coefficient sidecar.
    assert_eq!(report.artifacts.len(), 3);
    assert_eq!(report.artifacts[0].records, Some(1));
    assert_eq!(report.artifacts[1].records, Some(1));
    assert_eq!(report.artifacts[2].records, None);
    assert!(groups_out.exists());
    assert!(interventions_out.exists());

    let json_out = dir.path().join("rebuilt.json");
    let report = run_csv_to_json(&CsvToJsonArgs {
        groups: groups_out,
        interventions: interventions_out,
        json_out: json_out.clone(),
        equiv: None,
    })
    .unwrap();
    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].records, Some(1));

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    // Custom coefficients survive through the sidecar.
    assert_eq!(
        rebuilt["equivalency_coeffs"],
        json!({"cars_per_tCO2e": 0.5})
    );
    assert_eq!(rebuilt["interventions"][0]["id"], json!("switch-off"));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = run_json_to_csv(&JsonToCsvArgs {
        json: dir.path().join("missing.json"),
        groups_out: dir.path().join("groups.csv"),
        interventions_out: dir.path().join("interventions.csv"),
    });
    let error = result.unwrap_err();
    assert!(format!("{error:#}").contains("missing.json"));
}

#[test]
fn test_equiv_override_flag() {
    let dir = TempDir::new().unwrap();
    let json_in = write_catalog(&dir);
    let groups_out = dir.path().join("groups.csv");
    let interventions_out = dir.path().join("interventions.csv");
    run_json_to_csv(&JsonToCsvArgs {
        json: json_in,
        groups_out: groups_out.clone(),
        interventions_out: interventions_out.clone(),
    })
    .unwrap();

    let equiv = dir.path().join("custom.equiv.json");
    fs::write(&equiv, r#"{"cars_per_tCO2e": 1.0}"#).unwrap();

    let json_out = dir.path().join("rebuilt.json");
    run_csv_to_json(&CsvToJsonArgs {
        groups: groups_out,
        interventions: interventions_out,
        json_out: json_out.clone(),
        equiv: Some(equiv),
    })
    .unwrap();

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(
        rebuilt["equivalency_coeffs"],
        json!({"cars_per_tCO2e": 1.0})
    );
}
