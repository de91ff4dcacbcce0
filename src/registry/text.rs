//! User-facing text. Templates take their arguments through the helper
//! functions so a placeholder can never be left unfilled.

pub const APP_TITLE: &str = "Skin Lesion Triage Tool";
pub const APP_SUBTITLE: &str = "Prototype for Dermatological Image Assessment";
pub const APP_VERSION: &str = "1.0.0";

pub const DISCLAIMER: &str = "For research purposes only, always consult a medical professional";

pub const NO_IMAGE_MESSAGE: &str = "⚠️ Please upload an image before continuing with the analysis.";

pub const INVALID_FILE_TYPE_MESSAGE: &str =
    "Invalid file type. Please upload an image file (PNG, JPG, JPEG, BMP, TIFF).";

pub const ANALYSIS_COMPLETE_MESSAGE: &str = "✅ Analysis completed successfully";

const API_CONNECTION_TEMPLATE: &str = "💡 Make sure the backend API is running at {api_url}";
const PREDICTION_FAILED_TEMPLATE: &str = "❌ Error during analysis: {error}";

pub fn api_connection_message(api_url: &str) -> String {
    API_CONNECTION_TEMPLATE.replace("{api_url}", api_url)
}

pub fn prediction_failed_message(error: impl std::fmt::Display) -> String {
    PREDICTION_FAILED_TEMPLATE.replace("{error}", &error.to_string())
}

/// One-line footer, e.g. for CLI output
pub fn footer() -> String {
    format!("{APP_TITLE} | Version {APP_VERSION} | {DISCLAIMER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_connection_message() {
        assert_eq!(
            api_connection_message("http://localhost:8000"),
            "💡 Make sure the backend API is running at http://localhost:8000"
        );
    }

    #[test]
    fn test_prediction_failed_message() {
        assert_eq!(
            prediction_failed_message("timeout"),
            "❌ Error during analysis: timeout"
        );
    }

    #[test]
    fn test_messages_keep_their_markers() {
        assert!(NO_IMAGE_MESSAGE.starts_with("⚠️ "));
        assert_eq!(ANALYSIS_COMPLETE_MESSAGE, "✅ Analysis completed successfully");
        assert!(INVALID_FILE_TYPE_MESSAGE.starts_with("Invalid file type."));
    }

    #[test]
    fn test_footer_mentions_version() {
        assert!(footer().contains("Version 1.0.0"));
    }
}
