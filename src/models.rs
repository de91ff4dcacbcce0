use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::LookupError;
use crate::registry::RiskCategory;

/// Response type for the health endpoint
///
/// Only `status` is named; whatever else the backend reports lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient_id: String,
    pub patient_full_name: String,
    pub sex: String,
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.patient_full_name, self.patient_id)
    }
}

/// Request body for creating a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub patient_id: String,
    pub patient_full_name: String,
    pub sex: String,
    /// `DD/MM/YYYY`
    pub date_of_birth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesion {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub lesion_id: String,
    pub patient_id: String,
    pub lesion_location: String,
    pub initial_size_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl fmt::Display for Lesion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}mm)",
            self.lesion_id, self.lesion_location, self.initial_size_mm
        )
    }
}

/// Request body for creating a lesion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLesion {
    pub lesion_id: String,
    pub patient_id: String,
    /// Canonical location, e.g. `"left leg"`
    pub lesion_location: String,
    pub initial_size_mm: f64,
}

/// Clinical inputs sent alongside an image for prediction
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub age: u32,
    pub sex: String,
    /// Canonical location, any case
    pub location: String,
    /// Lesion diameter in millimeters
    pub diameter: f64,
}

/// Response type for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub final_probability: f64,
    pub model_a_probability: f64,
    pub model_c_probability: f64,
    pub extracted_features: Vec<JsonValue>,
    pub risk_category: String,
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl PredictionResponse {
    pub fn risk(&self) -> Result<RiskCategory, LookupError> {
        self.risk_category.parse()
    }
}

impl fmt::Display for PredictionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Risk: {} | Probability: {:.2}%",
            self.risk_category.to_uppercase(),
            self.final_probability * 100.0
        )
    }
}

// Analysis records arrive nested; every section may be missing.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClinicalData {
    age_at_capture: u32,
    lesion_size_mm: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelOutput {
    malignant_probability: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelOutputs {
    image_only_model: ModelOutput,
    clinical_ml_model: ModelOutput,
    extracted_features: Vec<JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemporalData {
    capture_date: Option<String>,
    days_since_first_observation: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageData {
    filename: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShapAnalysis {
    features: Vec<JsonValue>,
    prediction: Option<f64>,
    base_value: Option<f64>,
}

/// Raw analysis document as stored by the backend
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    #[serde(rename = "_id")]
    id: Option<String>,
    analysis_id: String,
    patient_id: String,
    lesion_id: String,
    created_at: Option<String>,
    clinical_data: ClinicalData,
    model_outputs: ModelOutputs,
    temporal_data: TemporalData,
    image: ImageData,
    shap_analysis: ShapAnalysis,
}

/// One analysis of a lesion, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCase {
    pub id: Option<String>,
    pub analysis_id: String,
    pub patient_id: String,
    pub lesion_id: String,
    pub created_at: Option<String>,
    /// Falls back to `created_at` when the record has no capture date
    pub capture_date: Option<String>,
    pub days_since_first_observation: i64,
    pub age_at_capture: u32,
    pub lesion_size_mm: f64,
    /// Image-only model
    pub model_a_probability: f64,
    /// Clinical model
    pub model_c_probability: f64,
    pub image_filename: Option<String>,
    pub image_path: Option<String>,
    pub shap_top_features: Vec<JsonValue>,
    pub shap_prediction: Option<f64>,
    pub shap_base_value: Option<f64>,
    pub extracted_features: Vec<JsonValue>,
}

impl From<AnalysisRecord> for AnalysisCase {
    fn from(record: AnalysisRecord) -> Self {
        let capture_date = record
            .temporal_data
            .capture_date
            .or_else(|| record.created_at.clone());

        AnalysisCase {
            id: record.id,
            analysis_id: record.analysis_id,
            patient_id: record.patient_id,
            lesion_id: record.lesion_id,
            created_at: record.created_at,
            capture_date,
            days_since_first_observation: record.temporal_data.days_since_first_observation,
            age_at_capture: record.clinical_data.age_at_capture,
            lesion_size_mm: record.clinical_data.lesion_size_mm,
            model_a_probability: record.model_outputs.image_only_model.malignant_probability,
            model_c_probability: record.model_outputs.clinical_ml_model.malignant_probability,
            image_filename: record.image.filename,
            image_path: record.image.path,
            shap_top_features: record.shap_analysis.features,
            shap_prediction: record.shap_analysis.prediction,
            shap_base_value: record.shap_analysis.base_value,
            extracted_features: record.model_outputs.extracted_features,
        }
    }
}

impl AnalysisCase {
    /// Capture date parsed as UTC, if it is a recognisable ISO-8601 timestamp
    pub fn capture_datetime(&self) -> Option<DateTime<Utc>> {
        self.capture_date.as_deref().and_then(parse_timestamp)
    }

    pub fn model_a_risk(&self) -> RiskCategory {
        RiskCategory::from_probability(self.model_a_probability)
    }

    pub fn model_c_risk(&self) -> RiskCategory {
        RiskCategory::from_probability(self.model_c_probability)
    }
}

impl fmt::Display for AnalysisCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - Size: {}mm",
            self.analysis_id,
            self.capture_date.as_deref().unwrap_or("unknown date"),
            self.lesion_size_mm
        )
    }
}

/// Timestamps without an offset are taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Oldest first. Analyses without a usable capture date go last, in their original order.
pub fn sort_by_capture_date(analyses: &mut [AnalysisCase]) {
    analyses.sort_by_key(|case| {
        let captured = case.capture_datetime();
        (captured.is_none(), captured)
    });
}
