//! Equivalency-coefficient sidecar handling.
//!
//! Flattening writes the catalog's coefficients to `<interventions>.equiv.json`
//! next to the interventions CSV; unflattening reads them back from the same
//! derived path so a flatten/unflatten round trip keeps custom coefficients.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};

/// Derives the sidecar path from the interventions CSV path by swapping the
/// extension for `.equiv.json`.
pub fn sidecar_path(interventions_csv: &Path) -> PathBuf {
    interventions_csv.with_extension("equiv.json")
}

/// Writes the coefficients as a pretty-printed sidecar and returns its path.
pub fn write_sidecar(interventions_csv: &Path, coeffs: &Map<String, Value>) -> Result<PathBuf> {
    let path = sidecar_path(interventions_csv);
    let text = serde_json::to_string_pretty(coeffs).map_err(|source| ConvertError::JsonWrite {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, text).map_err(|source| ConvertError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Reads a coefficient file. Strict: any problem is fatal.
pub fn read_sidecar(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConvertError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Probes for a sidecar next to the interventions CSV. Lenient: a missing or
/// unreadable file logs and falls through to `None`.
pub fn probe_sidecar(interventions_csv: &Path) -> Option<Map<String, Value>> {
    let path = sidecar_path(interventions_csv);
    if !path.exists() {
        debug!(path = %path.display(), "no equivalency sidecar found");
        return None;
    }
    match read_sidecar(&path) {
        Ok(coeffs) => {
            debug!(path = %path.display(), "loaded equivalency sidecar");
            Some(coeffs)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable equivalency sidecar");
            None
        }
    }
}
