use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::{
    AnalysisCase, AnalysisRecord, HealthResponse, Lesion, NewLesion, NewPatient, Patient,
    PredictionRequest, PredictionResponse, sort_by_capture_date,
};
use crate::registry::{AnatomicalLocation, Endpoint, image_content_type};
use crate::validators::validate_prediction_inputs;

/// Name sent for uploads that arrive without one
const DEFAULT_IMAGE_NAME: &str = "lesion_image.jpg";

/// Minimum search term length; shorter terms return no results without a request
const MIN_SEARCH_LEN: usize = 2;

/// Image bytes plus the file name they are uploaded under
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let file_name = if file_name.is_empty() {
            DEFAULT_IMAGE_NAME.to_string()
        } else {
            file_name
        };
        ImageUpload { file_name, bytes }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    pub fn content_type(&self) -> &'static str {
        image_content_type(&self.file_name)
    }
}

/// Shareable client for the triage backend
#[derive(Clone)]
pub struct TriageClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl TriageClient {
    /// Create a new client from configuration
    ///
    /// The configured timeout applies to every request, connect included.
    pub fn from_config(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        tracing::debug!("Triage client targeting {}", config.api_base_url);

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> ApiResult<String> {
        Ok(format!("{}{}", self.config.api_base_url, endpoint.render(params)?))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(ApiError::Connection)
    }

    async fn get(&self, url: &str) -> ApiResult<Response> {
        tracing::debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self.get(url).await?;
        decode(check_status(response).await?).await
    }

    /// Check if the backend API is healthy
    pub async fn check_health(&self) -> ApiResult<HealthResponse> {
        let url = self.url(Endpoint::Health, &[])?;
        let health: HealthResponse = self.get_json(&url).await?;
        tracing::debug!(
            "Backend health: {}",
            health.status.as_deref().unwrap_or("unknown")
        );
        Ok(health)
    }

    /// Backend service information from the root endpoint
    pub async fn get_api_info(&self) -> ApiResult<JsonValue> {
        let url = self.url(Endpoint::Info, &[])?;
        self.get_json(&url).await
    }

    /// Submit an image with clinical inputs for risk prediction
    ///
    /// Inputs are validated locally first; nothing is sent when they fail.
    pub async fn submit_prediction(
        &self,
        image: ImageUpload,
        request: &PredictionRequest,
    ) -> ApiResult<PredictionResponse> {
        validate_prediction_inputs(request.age, &request.sex, &request.location, request.diameter)?;
        let location = AnatomicalLocation::from_api_value(&request.location.to_lowercase())?;

        let content_type = image.content_type();
        let image_part = Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(content_type)
            .map_err(ApiError::Request)?;

        let form = Form::new()
            .part("image", image_part)
            .text("age", request.age.to_string())
            .text("sex", request.sex.to_lowercase())
            .text("location", location.api_value())
            .text("diameter", request.diameter.to_string());

        let url = self.url(Endpoint::Predict, &[])?;
        tracing::info!(
            "Submitting prediction for {} ({}, {})",
            image.file_name,
            content_type,
            location.api_value()
        );

        let response = self.send(self.http.post(&url).multipart(form)).await?;
        let prediction: PredictionResponse = decode(check_status(response).await?).await?;

        tracing::info!("Prediction received: {}", prediction);
        Ok(prediction)
    }

    pub async fn create_patient(&self, patient: &NewPatient) -> ApiResult<Patient> {
        let payload = NewPatient {
            sex: patient.sex.to_lowercase(),
            ..patient.clone()
        };
        let url = self.url(Endpoint::Patients, &[])?;

        let response = self.send(self.http.post(&url).json(&payload)).await?;
        let created: Patient = decode(check_status(response).await?).await?;

        tracing::info!("Created patient {}", created.patient_id);
        Ok(created)
    }

    pub async fn get_all_patients(&self) -> ApiResult<Vec<Patient>> {
        let url = self.url(Endpoint::Patients, &[])?;
        self.get_json(&url).await
    }

    /// Search patients by name
    ///
    /// Terms shorter than two characters yield an empty list without hitting the backend.
    pub async fn search_patients_by_name(&self, search_term: &str) -> ApiResult<Vec<Patient>> {
        if search_term.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        let url = self.url(Endpoint::PatientsSearch, &[])?;
        tracing::debug!("GET {} name={}", url, search_term);
        let response = self
            .send(self.http.get(&url).query(&[("name", search_term)]))
            .await?;
        decode(check_status(response).await?).await
    }

    /// `Ok(None)` when the backend has no such patient
    pub async fn get_patient_by_id(&self, patient_id: &str) -> ApiResult<Option<Patient>> {
        let url = self.url(Endpoint::PatientById, &[("patient_id", patient_id)])?;
        self.get_optional(&url).await
    }

    pub async fn create_lesion(&self, lesion: &NewLesion) -> ApiResult<Lesion> {
        let url = self.url(Endpoint::Lesions, &[])?;

        let response = self.send(self.http.post(&url).json(lesion)).await?;
        let created: Lesion = decode(check_status(response).await?).await?;

        tracing::info!(
            "Created lesion {} for patient {}",
            created.lesion_id,
            created.patient_id
        );
        Ok(created)
    }

    pub async fn get_lesions_by_patient(&self, patient_id: &str) -> ApiResult<Vec<Lesion>> {
        let url = self.url(Endpoint::PatientLesions, &[("patient_id", patient_id)])?;
        self.get_json(&url).await
    }

    /// `Ok(None)` when the backend has no such lesion
    pub async fn get_lesion_by_id(&self, lesion_id: &str) -> ApiResult<Option<Lesion>> {
        let url = self.url(Endpoint::LesionById, &[("lesion_id", lesion_id)])?;
        self.get_optional(&url).await
    }

    /// All analyses of a lesion, oldest capture first
    ///
    /// A lesion the backend does not know has no analyses.
    pub async fn get_lesion_analyses(&self, lesion_id: &str) -> ApiResult<Vec<AnalysisCase>> {
        let url = self.url(Endpoint::LesionAnalyses, &[("lesion_id", lesion_id)])?;
        let response = self.get(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No analyses for lesion {}", lesion_id);
            return Ok(Vec::new());
        }

        let records: Vec<AnalysisRecord> = decode(check_status(response).await?).await?;
        let mut analyses: Vec<AnalysisCase> = records.into_iter().map(AnalysisCase::from).collect();
        sort_by_capture_date(&mut analyses);
        Ok(analyses)
    }

    /// URL of the stored image for an analysis; `None` for an empty id
    pub fn analysis_image_url(&self, analysis_id: &str) -> Option<String> {
        if analysis_id.is_empty() {
            return None;
        }
        self.url(Endpoint::AnalysisImage, &[("analysis_id", analysis_id)])
            .ok()
    }

    /// Technical feature name to display name.
    ///
    /// Degrades to an empty map when the endpoint is missing or the backend is unreachable.
    pub async fn get_feature_display_names(&self) -> ApiResult<HashMap<String, String>> {
        let url = self.url(Endpoint::FeatureNames, &[])?;

        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Feature names unavailable: {}", e);
                return Ok(HashMap::new());
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(HashMap::new());
        }

        decode(check_status(response).await?).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> ApiResult<Option<T>> {
        let response = self.get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Not found: {}", url);
            return Ok(None);
        }
        decode(check_status(response).await?).await.map(Some)
    }
}

/// Pass through success responses; turn anything else into `ApiError::Status`
/// carrying the backend's `detail` when it sent one
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message(),
        Err(_) => status.to_string(),
    };

    tracing::warn!("Backend returned {}: {}", status, detail);
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response.json::<T>().await.map_err(ApiError::Decode)
}
