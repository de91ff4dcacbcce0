// Backend route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const INFO: &str = "/";
pub const PREDICT: &str = "/api/predict";
pub const EXPLAIN: &str = "/api/explain";
pub const PATIENTS: &str = "/api/patients";
pub const PATIENTS_SEARCH: &str = "/api/patients/search/by-name";
pub const PATIENT_ITEM: &str = "/api/patients/{patient_id}";
pub const LESIONS: &str = "/api/lesions";
pub const LESION_ITEM: &str = "/api/lesions/{lesion_id}";
pub const PATIENT_LESIONS: &str = "/api/patients/{patient_id}/lesions";
pub const LESION_ANALYSES: &str = "/api/lesions/{lesion_id}/analyses";
pub const ANALYSIS_ITEM: &str = "/api/analyses/{analysis_id}";
pub const ANALYSIS_IMAGE: &str = "/api/analyses/{analysis_id}/image";
pub const FEATURE_NAMES: &str = "/api/feature-names";
