//! Timestamp-based identifiers for patients and lesions

use chrono::{Local, NaiveDateTime};

use crate::error::IdError;
use crate::registry::get_location_code;

pub const PATIENT_ID_PREFIX: &str = "PAT";
pub const LESION_ID_PREFIX: &str = "LESION";

/// `PAT-YYYYMMDDHHMMSS` for the current local time
pub fn generate_patient_id() -> String {
    generate_patient_id_at(Local::now().naive_local())
}

pub fn generate_patient_id_at(now: NaiveDateTime) -> String {
    format!("{}-{}", PATIENT_ID_PREFIX, now.format("%Y%m%d%H%M%S"))
}

/// `LESION_<code>_<NNN>` for a canonical location.
///
/// With a counter, `NNN` is the zero-padded counter (1..=999). Without one,
/// it is the last three digits of the current `HHMMSS`.
pub fn generate_lesion_id(api_location: &str, counter: Option<u32>) -> Result<String, IdError> {
    generate_lesion_id_at(api_location, counter, Local::now().naive_local())
}

pub fn generate_lesion_id_at(
    api_location: &str,
    counter: Option<u32>,
    now: NaiveDateTime,
) -> Result<String, IdError> {
    let code = get_location_code(api_location)?;

    let suffix = match counter {
        Some(n) if (1..=999).contains(&n) => format!("{n:03}"),
        Some(n) => return Err(IdError::CounterOutOfRange(n)),
        None => {
            let clock = now.format("%H%M%S").to_string();
            clock[clock.len() - 3..].to_string()
        }
    };

    let id = format!("{LESION_ID_PREFIX}_{code}_{suffix}");
    tracing::debug!("Generated lesion id {} for {}", id, api_location);
    Ok(id)
}
