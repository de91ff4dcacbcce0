use std::borrow::Cow;
use std::fmt;

use crate::error::LookupError;

/// Anatomical site of a lesion, as offered by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnatomicalLocation {
    HeadAndNeck,
    TorsoFront,
    TorsoBack,
    LeftLeg,
    RightLeg,
    LeftArm,
    RightArm,
}

impl AnatomicalLocation {
    pub const ALL: [AnatomicalLocation; 7] = [
        AnatomicalLocation::HeadAndNeck,
        AnatomicalLocation::TorsoFront,
        AnatomicalLocation::TorsoBack,
        AnatomicalLocation::LeftLeg,
        AnatomicalLocation::RightLeg,
        AnatomicalLocation::LeftArm,
        AnatomicalLocation::RightArm,
    ];

    /// UI-facing label
    pub fn display_name(self) -> &'static str {
        match self {
            AnatomicalLocation::HeadAndNeck => "Head and Neck",
            AnatomicalLocation::TorsoFront => "Torso Front",
            AnatomicalLocation::TorsoBack => "Torso Back",
            AnatomicalLocation::LeftLeg => "Left Leg",
            AnatomicalLocation::RightLeg => "Right Leg",
            AnatomicalLocation::LeftArm => "Left Arm",
            AnatomicalLocation::RightArm => "Right Arm",
        }
    }

    /// Canonical backend-facing label
    pub fn api_value(self) -> &'static str {
        match self {
            AnatomicalLocation::HeadAndNeck => "head & neck",
            AnatomicalLocation::TorsoFront => "torso front",
            AnatomicalLocation::TorsoBack => "torso back",
            AnatomicalLocation::LeftLeg => "left leg",
            AnatomicalLocation::RightLeg => "right leg",
            AnatomicalLocation::LeftArm => "left arm",
            AnatomicalLocation::RightArm => "right arm",
        }
    }

    /// Two-letter code used in lesion IDs
    pub fn code(self) -> &'static str {
        match self {
            AnatomicalLocation::HeadAndNeck => "HN",
            AnatomicalLocation::TorsoFront => "FT",
            AnatomicalLocation::TorsoBack => "BT",
            AnatomicalLocation::LeftLeg => "LL",
            AnatomicalLocation::RightLeg => "RL",
            AnatomicalLocation::LeftArm => "LA",
            AnatomicalLocation::RightArm => "RA",
        }
    }

    pub fn from_display_name(display_name: &str) -> Result<Self, LookupError> {
        Self::ALL
            .into_iter()
            .find(|location| location.display_name() == display_name)
            .ok_or_else(|| LookupError::UnknownDisplayLocation(display_name.to_string()))
    }

    /// Exact match on the canonical label
    pub fn from_api_value(api_value: &str) -> Result<Self, LookupError> {
        Self::ALL
            .into_iter()
            .find(|location| location.api_value() == api_value)
            .ok_or_else(|| LookupError::UnknownLocation(api_value.to_string()))
    }
}

impl fmt::Display for AnatomicalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Canonical labels the backend accepts
pub fn valid_api_locations() -> impl Iterator<Item = &'static str> {
    AnatomicalLocation::ALL.into_iter().map(AnatomicalLocation::api_value)
}

/// Canonical backend label for a UI display label.
///
/// Labels outside the table are passed through lowercased, so a label that is
/// already in backend form maps to itself.
pub fn map_location_to_api(display_name: &str) -> Cow<'static, str> {
    match AnatomicalLocation::from_display_name(display_name) {
        Ok(location) => Cow::Borrowed(location.api_value()),
        Err(_) => Cow::Owned(display_name.to_lowercase()),
    }
}

/// Two-letter code for a canonical backend label
pub fn get_location_code(api_location: &str) -> Result<&'static str, LookupError> {
    AnatomicalLocation::from_api_value(api_location).map(AnatomicalLocation::code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_map_location_to_api_every_entry() {
        let expected = [
            ("Head and Neck", "head & neck"),
            ("Torso Front", "torso front"),
            ("Torso Back", "torso back"),
            ("Left Leg", "left leg"),
            ("Right Leg", "right leg"),
            ("Left Arm", "left arm"),
            ("Right Arm", "right arm"),
        ];
        for (display, api) in expected {
            assert_eq!(map_location_to_api(display), api);
        }
        assert_eq!(expected.len(), AnatomicalLocation::ALL.len());
    }

    #[test]
    fn test_map_location_to_api_unmapped() {
        assert_eq!(map_location_to_api("Left Foot"), "left foot");
        assert_eq!(map_location_to_api("left leg"), "left leg");
        assert_eq!(map_location_to_api("HEAD & NECK"), "head & neck");
        assert!(matches!(map_location_to_api("Left Leg"), Cow::Borrowed("left leg")));
    }

    #[test]
    fn test_table_is_one_to_one() {
        let displays: HashSet<_> = AnatomicalLocation::ALL.iter().map(|l| l.display_name()).collect();
        let apis: HashSet<_> = valid_api_locations().collect();
        let codes: HashSet<_> = AnatomicalLocation::ALL.iter().map(|l| l.code()).collect();
        let n = AnatomicalLocation::ALL.len();
        assert_eq!(displays.len(), n);
        assert_eq!(apis.len(), n);
        assert_eq!(codes.len(), n);
    }

    #[test]
    fn test_get_location_code() {
        assert_eq!(get_location_code("head & neck").unwrap(), "HN");
        assert_eq!(get_location_code("left leg").unwrap(), "LL");
        assert_eq!(
            get_location_code("Left Leg").unwrap_err(),
            LookupError::UnknownLocation("Left Leg".to_string())
        );
    }

    #[test]
    fn test_codes_are_two_uppercase_letters() {
        for location in AnatomicalLocation::ALL {
            let code = location.code();
            assert_eq!(code.len(), 2);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
