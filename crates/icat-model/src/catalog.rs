//! Serde types for the intervention catalog JSON envelope.
//!
//! Deserialization is deliberately permissive: every field carries
//! `#[serde(default)]` so a partial catalog still loads, and leaf fields that
//! appear as number-or-string in source data are kept as raw
//! [`serde_json::Value`]. Serialization follows struct field order, which is
//! the canonical key order of the envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Top-level catalog envelope: `equivalency_coeffs`, `groups`, `interventions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalency_coeffs: Option<Map<String, Value>>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
}

impl Catalog {
    /// Returns the coefficients only when present and non-empty.
    pub fn nonempty_equivalency_coeffs(&self) -> Option<&Map<String, Value>> {
        self.equivalency_coeffs
            .as_ref()
            .filter(|coeffs| !coeffs.is_empty())
    }
}

/// A labeled category used to organize interventions for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

/// A single configurable carbon-reduction action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub impact_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeSpec>,
    #[serde(default)]
    pub baseline_control: BaselineControl,
    #[serde(default)]
    pub calculation: Calculation,
    #[serde(default)]
    pub ui: Ui,
}

impl Intervention {
    /// Slider interventions are the only ones that carry a range block.
    pub fn is_slider(&self) -> bool {
        self.kind == "slider"
    }
}

/// Slider range: `{min, max, step, unit}`, each number-or-string in source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
}

impl RangeSpec {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.step.is_none() && self.unit.is_none()
    }
}

/// Default UI/calculation state of an intervention before user adjustment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineControl {
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_enabled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
}

impl BaselineControl {
    /// Boolean-typed baselines carry no numeric sub-fields.
    pub fn is_boolean(&self) -> bool {
        self.kind == "boolean"
    }
}

/// Emissions-calculation metadata: a method name, a human formula note, and
/// named parameters. Parameter values are kept raw; [`ParamValue`] is the
/// typed view over the scalar-or-reference union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub formula_note: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// UI copy for an intervention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ui {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details_markdown: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// A literature/source reference shown in the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

/// Typed view over a calculation parameter value.
///
/// In JSON a parameter is either a scalar, a reference object
/// `{"source": "<dotted path>"}`, or the marker object
/// `{"source_value": true}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Dotted reference path into external assumptions data.
    Source(String),
    /// Marker: resolve from the caller-supplied input value.
    SourceValue,
    /// Literal scalar (number, bool, or string).
    Scalar(Value),
}

impl ParamValue {
    /// Classifies a raw JSON parameter value.
    ///
    /// Returns `None` when the value carries nothing worth serializing: JSON
    /// null, an object without `source` or a truthy `source_value`, or a
    /// container where a scalar is expected.
    pub fn from_json(value: &Value) -> Option<ParamValue> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(path)) = map.get("source") {
                    return Some(ParamValue::Source(path.clone()));
                }
                match map.get("source_value") {
                    Some(marker) if value_truthy(marker) => Some(ParamValue::SourceValue),
                    _ => None,
                }
            }
            Value::Null | Value::Array(_) => None,
            scalar => Some(ParamValue::Scalar(scalar.clone())),
        }
    }

    /// Converts back into the raw JSON representation.
    pub fn into_value(self) -> Value {
        match self {
            ParamValue::Source(path) => json!({ "source": path }),
            ParamValue::SourceValue => json!({ "source_value": true }),
            ParamValue::Scalar(value) => value,
        }
    }
}

/// Truthiness of a JSON value: false, zero, empty string, empty container,
/// and null are falsy.
fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
    }
}

/// Hardcoded equivalency coefficients used when no sidecar or override is
/// available: CO2e-to-relatable-unit conversion constants.
pub fn default_equivalency_coeffs() -> Map<String, Value> {
    let mut coeffs = Map::new();
    coeffs.insert("cars_per_tCO2e".to_string(), json!(0.45));
    coeffs.insert("acres_forest_per_tCO2e".to_string(), json!(0.06));
    coeffs.insert("tree_seedlings_10yr_per_tCO2e".to_string(), json!(7.0));
    coeffs
}
