//! Structured diagnostic report types.
//!
//! An [`AnalysisReport`] is produced once per classified or image-analyzed
//! turn and owned by the assistant message it is attached to. It is never
//! mutated after creation.

use serde::{Deserialize, Serialize};

/// Overall crop health verdict.
///
/// `NotApplicable` is reserved for informational responses (crop
/// recommendations, pest lookups) that carry no health assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Fair,
    Poor,
    NotApplicable,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NotApplicable => "N/A",
        };
        write!(f, "{}", s)
    }
}

/// Soil condition verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilHealth {
    Good,
    Moderate,
    Poor,
}

impl std::fmt::Display for SoilHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        };
        write!(f, "{}", s)
    }
}

/// Pest pressure verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PestRisk {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for PestRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Watering verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterNeed {
    Adequate,
    High,
    OverWatered,
}

impl std::fmt::Display for WaterNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Adequate => "Adequate",
            Self::High => "High",
            Self::OverWatered => "Over-watered",
        };
        write!(f, "{}", s)
    }
}

/// NPK nutrient readings, each in percent of the healthy reference level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NutrientLevels {
    pub nitrogen: u8,
    pub phosphorus: u8,
    pub potassium: u8,
}

impl NutrientLevels {
    /// Invariant check: every reading must sit in [0, 100].
    pub fn in_bounds(&self) -> bool {
        self.nitrogen <= 100 && self.phosphorus <= 100 && self.potassium <= 100
    }
}

/// Pest-control solutions split by approach.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PestControlPlan {
    pub organic: Vec<String>,
    pub chemical: Vec<String>,
}

/// Structured diagnostic/recommendation payload attached to an assistant
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub health_status: HealthStatus,
    pub soil_health: SoilHealth,
    pub pest_risk: PestRisk,
    pub water_need: WaterNeed,
    pub nutrients: NutrientLevels,
    /// Ordered list of suggested remedies.
    pub remedies: Vec<String>,
    pub pest_control: PestControlPlan,
    /// Ordered list of actionable recommendations.
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Builds an informational report for non-health intents. Carries the
    /// given recommendations under `health_status = NotApplicable` with
    /// neutral defaults for the other fields.
    pub fn informational(recommendations: Vec<String>) -> Self {
        Self {
            health_status: HealthStatus::NotApplicable,
            soil_health: SoilHealth::Good,
            pest_risk: PestRisk::Low,
            water_need: WaterNeed::Adequate,
            nutrients: NutrientLevels::default(),
            remedies: Vec::new(),
            pest_control: PestControlPlan::default(),
            recommendations,
        }
    }

    /// Invariant check: nutrient readings in bounds, and remedies plus
    /// recommendations non-empty unless the report is informational.
    pub fn is_valid(&self) -> bool {
        if !self.nutrients.in_bounds() {
            return false;
        }
        if self.health_status == HealthStatus::NotApplicable {
            return true;
        }
        !self.remedies.is_empty() && !self.recommendations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informational_reports_allow_empty_remedies() {
        let report = AnalysisReport::informational(vec!["Plant rice".to_string()]);
        assert_eq!(report.health_status, HealthStatus::NotApplicable);
        assert!(report.remedies.is_empty());
        assert!(report.is_valid());
    }

    #[test]
    fn health_reports_require_remedies() {
        let mut report = AnalysisReport::informational(vec!["x".to_string()]);
        report.health_status = HealthStatus::Fair;
        assert!(!report.is_valid());

        report.remedies.push("Apply neem cake".to_string());
        assert!(report.is_valid());
    }

    #[test]
    fn nutrient_bounds_are_enforced() {
        let mut report = AnalysisReport::informational(Vec::new());
        report.nutrients = NutrientLevels {
            nitrogen: 101,
            phosphorus: 50,
            potassium: 50,
        };
        assert!(!report.is_valid());
    }

    #[test]
    fn display_labels_match_ui_wording() {
        assert_eq!(HealthStatus::NotApplicable.to_string(), "N/A");
        assert_eq!(WaterNeed::OverWatered.to_string(), "Over-watered");
        assert_eq!(SoilHealth::Moderate.to_string(), "Moderate");
    }
}
