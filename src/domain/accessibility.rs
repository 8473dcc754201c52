use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DomainError;

/// Accessibility features a branch can be filtered on.
///
/// This is the only route from caller input to a column identifier: filter
/// queries are assembled from [`AccessibilityFeature::column`], never from the
/// raw option text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityFeature {
    InternalRamp,
    ExternalRamp,
    AutomaticDoors,
    HearingLoop,
    LowLevelCounter,
    AccessibleToilet,
    AccessibleParking,
    WheelchairAccess,
}

impl AccessibilityFeature {
    pub const ALL: [AccessibilityFeature; 8] = [
        AccessibilityFeature::InternalRamp,
        AccessibilityFeature::ExternalRamp,
        AccessibilityFeature::AutomaticDoors,
        AccessibilityFeature::HearingLoop,
        AccessibilityFeature::LowLevelCounter,
        AccessibilityFeature::AccessibleToilet,
        AccessibilityFeature::AccessibleParking,
        AccessibilityFeature::WheelchairAccess,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AccessibilityFeature::InternalRamp => "InternalRamp",
            AccessibilityFeature::ExternalRamp => "ExternalRamp",
            AccessibilityFeature::AutomaticDoors => "AutomaticDoors",
            AccessibilityFeature::HearingLoop => "HearingLoop",
            AccessibilityFeature::LowLevelCounter => "LowLevelCounter",
            AccessibilityFeature::AccessibleToilet => "AccessibleToilet",
            AccessibilityFeature::AccessibleParking => "AccessibleParking",
            AccessibilityFeature::WheelchairAccess => "WheelchairAccess",
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            AccessibilityFeature::InternalRamp => "internal_ramp",
            AccessibilityFeature::ExternalRamp => "external_ramp",
            AccessibilityFeature::AutomaticDoors => "automatic_doors",
            AccessibilityFeature::HearingLoop => "hearing_loop",
            AccessibilityFeature::LowLevelCounter => "low_level_counter",
            AccessibilityFeature::AccessibleToilet => "accessible_toilet",
            AccessibilityFeature::AccessibleParking => "accessible_parking",
            AccessibilityFeature::WheelchairAccess => "wheelchair_access",
        }
    }

    /// Parses a comma separated `options` value, dropping blanks and duplicates.
    pub fn parse_list(raw: &str) -> Result<Vec<AccessibilityFeature>, DomainError> {
        let mut features = Vec::new();
        for option in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let feature = option.parse::<AccessibilityFeature>()?;
            if !features.contains(&feature) {
                features.push(feature);
            }
        }

        if features.is_empty() {
            return Err(DomainError::NoAccessibilityOptions);
        }
        Ok(features)
    }

    fn accepted_names() -> String {
        Self::ALL
            .iter()
            .map(|feature| feature.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AccessibilityFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccessibilityFeature {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|feature| feature.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| DomainError::UnknownAccessibilityOption {
                option: raw.trim().to_string(),
                accepted: Self::accepted_names(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BranchAccessibility {
    pub branch_id: i32,
    pub internal_ramp: bool,
    pub external_ramp: bool,
    pub automatic_doors: bool,
    pub hearing_loop: bool,
    pub low_level_counter: bool,
    pub accessible_toilet: bool,
    pub accessible_parking: bool,
    pub wheelchair_access: bool,
}

impl BranchAccessibility {
    pub fn has(&self, feature: AccessibilityFeature) -> bool {
        match feature {
            AccessibilityFeature::InternalRamp => self.internal_ramp,
            AccessibilityFeature::ExternalRamp => self.external_ramp,
            AccessibilityFeature::AutomaticDoors => self.automatic_doors,
            AccessibilityFeature::HearingLoop => self.hearing_loop,
            AccessibilityFeature::LowLevelCounter => self.low_level_counter,
            AccessibilityFeature::AccessibleToilet => self.accessible_toilet,
            AccessibilityFeature::AccessibleParking => self.accessible_parking,
            AccessibilityFeature::WheelchairAccess => self.wheelchair_access,
        }
    }

    pub fn has_all(&self, features: &[AccessibilityFeature]) -> bool {
        features.iter().all(|feature| self.has(*feature))
    }
}
