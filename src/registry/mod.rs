//! Static configuration registry for the triage front-end.
//!
//! Everything here is fixed at compile time and read-only. The three lookups
//! a front-end leans on are re-exported at this level: [`get_api_url`],
//! [`get_risk_color`] and [`map_location_to_api`].

pub mod display;
pub mod endpoints;
pub mod locations;
pub mod risk;
pub mod text;

pub use endpoints::{Endpoint, api_url_for, get_api_url};
pub use locations::{AnatomicalLocation, get_location_code, map_location_to_api};
pub use risk::{RiskCategory, RiskColor, get_risk_color};

// =============================================================================
// API
// =============================================================================

/// Backend API base URL, used when no override is configured
pub const API_BASE_URL: &str = "http://localhost:8000";

/// Request timeout in seconds
pub const API_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Patient and lesion inputs
// =============================================================================

pub const AGE_MIN: u32 = 0;
pub const AGE_MAX: u32 = 120;
pub const AGE_DEFAULT: u32 = 30;

/// Lesion diameter bounds, in millimeters
pub const DIAMETER_MIN: f64 = 0.0;
pub const DIAMETER_MAX: f64 = 200.0;
pub const DIAMETER_DEFAULT: f64 = 5.0;
pub const DIAMETER_STEP: f64 = 0.5;

pub const SEX_OPTIONS: [&str; 2] = ["Male", "Female"];

/// Date of birth format as shown to users
pub const DATE_FORMAT: &str = "DD/MM/YYYY";
/// Same format as a chrono pattern
pub const DATE_FORMAT_PATTERN: &str = "%d/%m/%Y";

// =============================================================================
// Images
// =============================================================================

pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

pub const MAX_FILE_SIZE_MB: u64 = 10;

/// Lowercased extension of `file_name`, if it has one
fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Whether `file_name` carries one of the supported image extensions
pub fn is_supported_image(file_name: &str) -> bool {
    extension(file_name).is_some_and(|ext| SUPPORTED_IMAGE_TYPES.contains(&ext.as_str()))
}

/// MIME type sent with an uploaded image. Unrecognised names are sent as JPEG.
pub fn image_content_type(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("png") => "image/png",
        Some("bmp") => "image/bmp",
        Some("tiff") | Some("tif") => "image/tiff",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_bounds_are_ordered() {
        assert!(AGE_MIN <= AGE_DEFAULT && AGE_DEFAULT <= AGE_MAX);
        assert!(DIAMETER_MIN <= DIAMETER_DEFAULT && DIAMETER_DEFAULT <= DIAMETER_MAX);
        assert!(DIAMETER_STEP > 0.0);
    }

    #[test]
    fn test_supported_image() {
        assert!(is_supported_image("lesion.PNG"));
        assert!(is_supported_image("scan.tiff"));
        assert!(!is_supported_image("notes.pdf"));
        assert!(!is_supported_image("no_extension"));
    }

    #[test]
    fn test_image_content_type() {
        assert_eq!(image_content_type("a.png"), "image/png");
        assert_eq!(image_content_type("a.BMP"), "image/bmp");
        assert_eq!(image_content_type("a.tif"), "image/tiff");
        assert_eq!(image_content_type("a.tiff"), "image/tiff");
        assert_eq!(image_content_type("a.jpg"), "image/jpeg");
        assert_eq!(image_content_type("lesion_image"), "image/jpeg");
    }

    #[test]
    fn test_registry_lookups_reexported() {
        assert_eq!(get_api_url(None).unwrap(), API_BASE_URL);
        assert!(get_risk_color("low").is_ok());
        assert_eq!(map_location_to_api("Left Arm"), "left arm");
    }
}
