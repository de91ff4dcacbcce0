use std::fmt;
use std::str::FromStr;

use super::API_BASE_URL;
use crate::error::LookupError;
use crate::routes;

/// Named backend route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Info,
    Predict,
    Explain,
    Patients,
    PatientsSearch,
    PatientById,
    Lesions,
    LesionById,
    PatientLesions,
    LesionAnalyses,
    AnalysisById,
    AnalysisImage,
    FeatureNames,
}

impl Endpoint {
    pub const ALL: [Endpoint; 14] = [
        Endpoint::Health,
        Endpoint::Info,
        Endpoint::Predict,
        Endpoint::Explain,
        Endpoint::Patients,
        Endpoint::PatientsSearch,
        Endpoint::PatientById,
        Endpoint::Lesions,
        Endpoint::LesionById,
        Endpoint::PatientLesions,
        Endpoint::LesionAnalyses,
        Endpoint::AnalysisById,
        Endpoint::AnalysisImage,
        Endpoint::FeatureNames,
    ];

    /// Registry key, e.g. `"patient_by_id"`
    pub fn key(self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::Info => "info",
            Endpoint::Predict => "predict",
            Endpoint::Explain => "explain",
            Endpoint::Patients => "patients",
            Endpoint::PatientsSearch => "patients_search",
            Endpoint::PatientById => "patient_by_id",
            Endpoint::Lesions => "lesions",
            Endpoint::LesionById => "lesion_by_id",
            Endpoint::PatientLesions => "patient_lesions",
            Endpoint::LesionAnalyses => "lesion_analyses",
            Endpoint::AnalysisById => "analysis_by_id",
            Endpoint::AnalysisImage => "analysis_image",
            Endpoint::FeatureNames => "feature_names",
        }
    }

    /// Path relative to the base URL, possibly with `{param}` placeholders
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => routes::HEALTH,
            Endpoint::Info => routes::INFO,
            Endpoint::Predict => routes::PREDICT,
            Endpoint::Explain => routes::EXPLAIN,
            Endpoint::Patients => routes::PATIENTS,
            Endpoint::PatientsSearch => routes::PATIENTS_SEARCH,
            Endpoint::PatientById => routes::PATIENT_ITEM,
            Endpoint::Lesions => routes::LESIONS,
            Endpoint::LesionById => routes::LESION_ITEM,
            Endpoint::PatientLesions => routes::PATIENT_LESIONS,
            Endpoint::LesionAnalyses => routes::LESION_ANALYSES,
            Endpoint::AnalysisById => routes::ANALYSIS_ITEM,
            Endpoint::AnalysisImage => routes::ANALYSIS_IMAGE,
            Endpoint::FeatureNames => routes::FEATURE_NAMES,
        }
    }

    pub fn from_key(key: &str) -> Result<Self, LookupError> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.key() == key)
            .ok_or_else(|| LookupError::UnknownEndpoint(key.to_string()))
    }

    /// Path with every `{name}` placeholder replaced from `params`.
    ///
    /// Values are percent-encoded, so `/`, `?` and `#` stay inside their segment.
    /// Extra params are ignored; a placeholder with no matching param is an error.
    pub fn render(self, params: &[(&str, &str)]) -> Result<String, LookupError> {
        let path = self.path();
        let mut rendered = String::with_capacity(path.len());
        let mut rest = path;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            let name = &rest[open + 1..close];
            let value = params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| LookupError::MissingPathParam {
                    endpoint: self.key().to_string(),
                    param: name.to_string(),
                })?;
            rendered.push_str(&rest[..open]);
            rendered.push_str(&urlencoding::encode(value));
            rest = &rest[close + 1..];
        }

        rendered.push_str(rest);
        Ok(rendered)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Endpoint {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// Full URL for `endpoint_key` against `base_url`; the base URL alone when no key is given
pub fn api_url_for(base_url: &str, endpoint_key: Option<&str>) -> Result<String, LookupError> {
    match endpoint_key {
        None => Ok(base_url.to_string()),
        Some(key) => {
            let endpoint = Endpoint::from_key(key)?;
            Ok(format!("{}{}", base_url, endpoint.path()))
        }
    }
}

/// Full URL for `endpoint_key` against [`API_BASE_URL`]
pub fn get_api_url(endpoint_key: Option<&str>) -> Result<String, LookupError> {
    api_url_for(API_BASE_URL, endpoint_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_get_api_url_without_key_is_base() {
        assert_eq!(get_api_url(None).unwrap(), API_BASE_URL);
    }

    #[test]
    fn test_get_api_url_for_every_key() {
        for endpoint in Endpoint::ALL {
            let url = get_api_url(Some(endpoint.key())).unwrap();
            assert_eq!(url, format!("{}{}", API_BASE_URL, endpoint.path()));
        }
    }

    #[test]
    fn test_get_api_url_known_values() {
        assert_eq!(get_api_url(Some("health")).unwrap(), "http://localhost:8000/health");
        assert_eq!(get_api_url(Some("info")).unwrap(), "http://localhost:8000/");
        assert_eq!(
            get_api_url(Some("predict")).unwrap(),
            "http://localhost:8000/api/predict"
        );
    }

    #[test]
    fn test_get_api_url_unknown_key() {
        let err = get_api_url(Some("nonexistent")).unwrap_err();
        assert_eq!(err, LookupError::UnknownEndpoint("nonexistent".to_string()));
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = Endpoint::ALL.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), Endpoint::ALL.len());
    }

    #[test]
    fn test_key_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.key().parse::<Endpoint>().unwrap(), endpoint);
        }
    }

    #[test]
    fn test_render_fills_placeholders() {
        assert_eq!(
            Endpoint::PatientLesions
                .render(&[("patient_id", "PAT-20250126143025")])
                .unwrap(),
            "/api/patients/PAT-20250126143025/lesions"
        );
        assert_eq!(
            Endpoint::AnalysisImage.render(&[("analysis_id", "A1")]).unwrap(),
            "/api/analyses/A1/image"
        );
    }

    #[test]
    fn test_render_encodes_reserved_characters() {
        assert_eq!(
            Endpoint::PatientById.render(&[("patient_id", "PAT-1?evil=1")]).unwrap(),
            "/api/patients/PAT-1%3Fevil%3D1"
        );
        assert_eq!(
            Endpoint::LesionAnalyses.render(&[("lesion_id", "L#1/../x")]).unwrap(),
            "/api/lesions/L%231%2F..%2Fx/analyses"
        );
        assert_eq!(
            Endpoint::LesionById.render(&[("lesion_id", "LESION_LL_001")]).unwrap(),
            "/api/lesions/LESION_LL_001"
        );
    }

    #[test]
    fn test_render_static_path_ignores_params() {
        assert_eq!(
            Endpoint::Patients.render(&[("patient_id", "x")]).unwrap(),
            "/api/patients"
        );
    }

    #[test]
    fn test_render_missing_param() {
        let err = Endpoint::LesionById.render(&[("patient_id", "x")]).unwrap_err();
        assert_eq!(
            err,
            LookupError::MissingPathParam {
                endpoint: "lesion_by_id".to_string(),
                param: "lesion_id".to_string(),
            }
        );
    }

    #[test]
    fn test_api_url_for_custom_base() {
        assert_eq!(
            api_url_for("https://triage.example.org", Some("feature_names")).unwrap(),
            "https://triage.example.org/api/feature-names"
        );
    }
}
