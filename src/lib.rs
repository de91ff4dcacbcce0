//! Client-side core of the skin lesion triage front-end: the static
//! configuration registry, runtime configuration, input validation, ID
//! generation and a typed client for the prediction backend.

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod registry;
pub mod routes;
pub mod validators;

pub use client::{ImageUpload, TriageClient};
pub use config::Config;
pub use error::{ApiError, IdError, LookupError, ValidationError};
pub use registry::{get_api_url, get_risk_color, map_location_to_api};
