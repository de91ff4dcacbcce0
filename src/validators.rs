//! Validation for patient, lesion and prediction inputs.
//!
//! Each check returns a [`ValidationError`] whose message is ready to show
//! to the user.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;
use crate::registry::locations::valid_api_locations;
use crate::registry::text::INVALID_FILE_TYPE_MESSAGE;
use crate::registry::{
    AGE_MAX, AGE_MIN, AnatomicalLocation, DATE_FORMAT_PATTERN, DIAMETER_MAX, DIAMETER_MIN,
    MAX_FILE_SIZE_MB, SEX_OPTIONS, is_supported_image,
};

const DAYS_PER_YEAR: f64 = 365.25;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_dob(date_string: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date_string.trim(), DATE_FORMAT_PATTERN).map_err(|_| {
        ValidationError::new("Invalid date format. Please use DD/MM/YYYY (e.g., 23/07/1980)")
    })
}

fn age_in_years(birth: NaiveDate, today: NaiveDate) -> f64 {
    (today - birth).num_days() as f64 / DAYS_PER_YEAR
}

pub fn validate_date_of_birth(date_string: &str) -> Result<(), ValidationError> {
    validate_date_of_birth_on(date_string, today())
}

/// Date of birth check relative to a fixed `today`
pub fn validate_date_of_birth_on(date_string: &str, today: NaiveDate) -> Result<(), ValidationError> {
    if date_string.trim().is_empty() {
        return Err(ValidationError::new("Date of birth is required"));
    }

    let birth = parse_dob(date_string)?;

    if birth > today {
        return Err(ValidationError::new("Date of birth cannot be in the future"));
    }

    if age_in_years(birth, today) > AGE_MAX as f64 {
        return Err(ValidationError::new(format!("Age cannot exceed {AGE_MAX} years")));
    }

    Ok(())
}

pub fn validate_patient_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("Patient name is required"));
    }
    if name.chars().count() < 3 {
        return Err(ValidationError::new("Name must be at least 3 characters long"));
    }
    Ok(())
}

pub fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if sex.trim().is_empty() {
        return Err(ValidationError::new("Sex is required"));
    }
    if !SEX_OPTIONS.contains(&sex) {
        return Err(ValidationError::new(format!(
            "Sex must be one of: {}",
            SEX_OPTIONS.join(", ")
        )));
    }
    Ok(())
}

/// Accepts a canonical location in any case and returns it resolved
pub fn validate_lesion_location(location: &str) -> Result<AnatomicalLocation, ValidationError> {
    if location.trim().is_empty() {
        return Err(ValidationError::new("Lesion location is required"));
    }
    AnatomicalLocation::from_api_value(&location.to_lowercase()).map_err(|_| {
        ValidationError::new(format!(
            "Invalid location. Must be one of: {}",
            valid_api_locations().collect::<Vec<_>>().join(", ")
        ))
    })
}

/// Size recorded when a lesion is first registered; any positive size is fine
pub fn validate_initial_lesion_size(size_mm: f64) -> Result<(), ValidationError> {
    if size_mm.is_nan() || size_mm <= 0.0 {
        return Err(ValidationError::new("Lesion size must be greater than 0 mm"));
    }
    Ok(())
}

/// Size submitted for analysis, bounded by what the model was trained on
pub fn validate_current_lesion_size(size_mm: f64) -> Result<(), ValidationError> {
    if size_mm.is_nan() || size_mm < DIAMETER_MIN {
        return Err(ValidationError::new(format!(
            "Lesion size for analysis must be at least {DIAMETER_MIN:.1} mm"
        )));
    }
    if size_mm > DIAMETER_MAX {
        return Err(ValidationError::new(format!(
            "Lesion size for analysis cannot exceed {DIAMETER_MAX:.1} mm"
        )));
    }
    Ok(())
}

pub fn validate_image_file(file_name: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !is_supported_image(file_name) {
        return Err(ValidationError::new(INVALID_FILE_TYPE_MESSAGE));
    }
    if size_bytes > MAX_FILE_SIZE_MB * 1024 * 1024 {
        return Err(ValidationError::new(format!(
            "Image exceeds the {MAX_FILE_SIZE_MB} MB limit"
        )));
    }
    Ok(())
}

/// Checks run before a prediction request is sent
pub fn validate_prediction_inputs(
    age: u32,
    sex: &str,
    location: &str,
    diameter: f64,
) -> Result<(), ValidationError> {
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(ValidationError::new(format!(
            "Age must be between {AGE_MIN} and {AGE_MAX}, got {age}"
        )));
    }

    let sex_lower = sex.to_lowercase();
    if sex_lower != "male" && sex_lower != "female" {
        return Err(ValidationError::new(format!(
            "Sex must be 'male' or 'female', got {sex}"
        )));
    }

    if AnatomicalLocation::from_api_value(&location.to_lowercase()).is_err() {
        return Err(ValidationError::new(format!(
            "Location must be one of [{}], got {location}",
            valid_api_locations().collect::<Vec<_>>().join(", ")
        )));
    }

    if diameter.is_nan() || diameter <= 0.0 {
        return Err(ValidationError::new(format!(
            "Diameter must be positive, got {diameter}"
        )));
    }

    Ok(())
}

pub fn calculate_age_from_dob(date_of_birth: &str) -> Result<u32, ValidationError> {
    calculate_age_from_dob_on(date_of_birth, today())
}

/// Whole years between `date_of_birth` and `today`; zero for future dates
pub fn calculate_age_from_dob_on(date_of_birth: &str, today: NaiveDate) -> Result<u32, ValidationError> {
    let birth = parse_dob(date_of_birth)?;
    Ok(age_in_years(birth, today).max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_of_birth_valid() {
        assert!(validate_date_of_birth_on("23/07/1980", day(2025, 1, 26)).is_ok());
    }

    #[test]
    fn test_date_of_birth_required() {
        let err = validate_date_of_birth_on("   ", day(2025, 1, 26)).unwrap_err();
        assert_eq!(err.message(), "Date of birth is required");
    }

    #[test]
    fn test_date_of_birth_bad_format() {
        let err = validate_date_of_birth_on("1980-07-23", day(2025, 1, 26)).unwrap_err();
        assert!(err.message().starts_with("Invalid date format"));
        assert!(validate_date_of_birth_on("31/02/1980", day(2025, 1, 26)).is_err());
    }

    #[test]
    fn test_date_of_birth_in_future() {
        let err = validate_date_of_birth_on("27/01/2025", day(2025, 1, 26)).unwrap_err();
        assert_eq!(err.message(), "Date of birth cannot be in the future");
    }

    #[test]
    fn test_date_of_birth_too_old() {
        let err = validate_date_of_birth_on("01/01/1900", day(2025, 1, 26)).unwrap_err();
        assert_eq!(err.message(), "Age cannot exceed 120 years");
    }

    #[test]
    fn test_patient_name() {
        assert!(validate_patient_name("Ada Lovelace").is_ok());
        assert_eq!(
            validate_patient_name("").unwrap_err().message(),
            "Patient name is required"
        );
        assert_eq!(
            validate_patient_name("  Al ").unwrap_err().message(),
            "Name must be at least 3 characters long"
        );
    }

    #[test]
    fn test_sex() {
        assert!(validate_sex("Female").is_ok());
        assert_eq!(validate_sex("").unwrap_err().message(), "Sex is required");
        assert_eq!(
            validate_sex("female").unwrap_err().message(),
            "Sex must be one of: Male, Female"
        );
    }

    #[test]
    fn test_lesion_location() {
        assert_eq!(
            validate_lesion_location("Left Leg").unwrap(),
            AnatomicalLocation::LeftLeg
        );
        assert_eq!(
            validate_lesion_location("head & neck").unwrap(),
            AnatomicalLocation::HeadAndNeck
        );
        assert_eq!(
            validate_lesion_location("").unwrap_err().message(),
            "Lesion location is required"
        );
        assert!(
            validate_lesion_location("elbow")
                .unwrap_err()
                .message()
                .starts_with("Invalid location. Must be one of: head & neck, torso front")
        );
    }

    #[test]
    fn test_initial_lesion_size() {
        assert!(validate_initial_lesion_size(0.1).is_ok());
        assert!(validate_initial_lesion_size(500.0).is_ok());
        assert!(validate_initial_lesion_size(0.0).is_err());
        assert!(validate_initial_lesion_size(f64::NAN).is_err());
    }

    #[test]
    fn test_current_lesion_size() {
        assert!(validate_current_lesion_size(0.0).is_ok());
        assert!(validate_current_lesion_size(200.0).is_ok());
        assert_eq!(
            validate_current_lesion_size(-1.0).unwrap_err().message(),
            "Lesion size for analysis must be at least 0.0 mm"
        );
        assert_eq!(
            validate_current_lesion_size(200.5).unwrap_err().message(),
            "Lesion size for analysis cannot exceed 200.0 mm"
        );
    }

    #[test]
    fn test_image_file() {
        assert!(validate_image_file("lesion.jpg", 1024).is_ok());
        assert_eq!(
            validate_image_file("lesion.gif", 1024).unwrap_err().message(),
            INVALID_FILE_TYPE_MESSAGE
        );
        assert!(validate_image_file("lesion.png", 11 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_prediction_inputs() {
        assert!(validate_prediction_inputs(45, "Male", "Left Leg", 6.5).is_ok());
        assert_eq!(
            validate_prediction_inputs(121, "male", "left leg", 6.5)
                .unwrap_err()
                .message(),
            "Age must be between 0 and 120, got 121"
        );
        assert_eq!(
            validate_prediction_inputs(45, "other", "left leg", 6.5)
                .unwrap_err()
                .message(),
            "Sex must be 'male' or 'female', got other"
        );
        assert!(validate_prediction_inputs(45, "male", "knee", 6.5).is_err());
        assert_eq!(
            validate_prediction_inputs(45, "male", "left leg", 0.0)
                .unwrap_err()
                .message(),
            "Diameter must be positive, got 0"
        );
    }

    #[test]
    fn test_calculate_age() {
        assert_eq!(calculate_age_from_dob_on("23/07/1980", day(2025, 7, 24)).unwrap(), 45);
        assert_eq!(calculate_age_from_dob_on("23/07/1980", day(2025, 7, 1)).unwrap(), 44);
        assert!(calculate_age_from_dob_on("not a date", day(2025, 1, 1)).is_err());
    }
}
