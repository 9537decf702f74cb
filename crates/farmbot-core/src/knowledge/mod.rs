//! Static agricultural knowledge base.
//!
//! Pure reference data consulted by the synthesizer and the diagnostic
//! generator: crop catalog, pest catalog, market-price model, remedy pool,
//! fertilizer guidance and the seasonal planting calendar. Loaded once at
//! process start ([`KnowledgeBase::builtin`]) and shared read-only across
//! sessions.

mod preset;

use crate::context::Season;
use serde::{Deserialize, Serialize};

/// Market demand for a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        };
        write!(f, "{}", s)
    }
}

/// Profit outlook for a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitPotential {
    Moderate,
    Steady,
    Good,
    High,
    VeryHigh,
}

impl ProfitPotential {
    /// Whether the crop qualifies for the maximum-profit callout.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

impl std::fmt::Display for ProfitPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Moderate => "Moderate",
            Self::Steady => "Steady",
            Self::Good => "Good",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        };
        write!(f, "{}", s)
    }
}

/// One crop in the recommendation catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropEntry {
    pub name: String,
    pub demand: DemandLevel,
    pub rationale: String,
    /// Human-readable growing-window label ("Year-round", "Post-monsoon").
    pub season_label: String,
    /// Seasons the crop can be planted in.
    pub seasons: Vec<Season>,
    pub profit: ProfitPotential,
}

impl CropEntry {
    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }
}

/// One pest in the pest catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestEntry {
    pub pest: String,
    /// Crop(s) the pest affects, as a display string ("Mango, Guava").
    pub affected_crop: String,
    pub solution: String,
}

impl PestEntry {
    /// Whether the utterance mentions one of the affected crops.
    pub fn matches_query(&self, query: &str) -> bool {
        self.affected_crop
            .to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|word| !word.is_empty())
            .any(|word| query.contains(word))
    }
}

/// Price trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

/// Bounded price model for one crop; actual quotes are sampled per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCropModel {
    pub crop: String,
    /// Pricing unit ("kg", "piece").
    pub unit: String,
    /// Lower price bound, in paise.
    pub base_paise: u32,
    /// Width of the price band, in paise.
    pub spread_paise: u32,
}

/// One sampled market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPriceEntry {
    pub crop: String,
    pub price_rupees: f64,
    pub unit: String,
    pub trend: Trend,
}

/// The assembled knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub crops: Vec<CropEntry>,
    pub pests: Vec<PestEntry>,
    pub market: Vec<MarketCropModel>,
    /// Candidate remedies for diagnostic reports.
    pub remedies: Vec<String>,
    /// Fixed organic pest-control solutions.
    pub organic_controls: Vec<String>,
    /// Fixed chemical pest-control solutions.
    pub chemical_controls: Vec<String>,
    /// Generic pest-prevention tips appended to pest answers.
    pub prevention_tips: Vec<String>,
    /// The fixed fertilizer advisory block.
    pub fertilizer_advisory: String,
    /// Example queries offered by the fallback help message.
    pub starter_queries: Vec<String>,
    /// Four recommended crop names per season.
    calendar: Vec<(Season, Vec<String>)>,
}

impl KnowledgeBase {
    /// The built-in Kerala reference tables.
    pub fn builtin() -> Self {
        preset::builtin()
    }

    /// Crop names recommended for planting in the given season.
    pub fn seasonal_guide(&self, season: Season) -> &[String] {
        self.calendar
            .iter()
            .find(|(s, _)| *s == season)
            .map(|(_, crops)| crops.as_slice())
            .unwrap_or(&[])
    }

    /// Catalog entries plantable in the given season.
    pub fn crops_for_season(&self, season: Season) -> Vec<&CropEntry> {
        self.crops.iter().filter(|c| c.grows_in(season)).collect()
    }

    /// Pest entries whose affected crop is mentioned in the utterance.
    pub fn pests_matching(&self, query: &str) -> Vec<&PestEntry> {
        self.pests
            .iter()
            .filter(|p| p.matches_query(query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.crops.len(), 8);
        assert_eq!(kb.pests.len(), 6);
        assert_eq!(kb.market.len(), 5);
        assert_eq!(kb.remedies.len(), 10);
        assert_eq!(kb.starter_queries.len(), 5);
        assert!(!kb.fertilizer_advisory.is_empty());
        assert_eq!(kb.organic_controls.len(), 3);
        assert_eq!(kb.chemical_controls.len(), 2);
    }

    #[test]
    fn every_season_has_a_guide_and_growable_crops() {
        let kb = KnowledgeBase::builtin();
        for season in Season::ALL {
            assert_eq!(kb.seasonal_guide(season).len(), 4, "{season}");
            // The synthesizer needs at least 3 candidates per season.
            assert!(kb.crops_for_season(season).len() >= 3, "{season}");
        }
    }

    #[test]
    fn pest_matching_is_per_crop_word() {
        let kb = KnowledgeBase::builtin();
        let coconut = kb.pests_matching("pest in coconut");
        assert!(!coconut.is_empty());
        assert!(coconut
            .iter()
            .all(|p| p.affected_crop.to_lowercase().contains("coconut")));

        // Multi-crop entries match on either crop word.
        let guava = kb.pests_matching("guava flies everywhere");
        assert!(guava.iter().any(|p| p.affected_crop.contains("Guava")));

        assert!(kb.pests_matching("nothing relevant").is_empty());
    }

    #[test]
    fn year_round_crops_cover_all_seasons() {
        let kb = KnowledgeBase::builtin();
        let coconut = kb.crops.iter().find(|c| c.name.contains("Coconut")).unwrap();
        for season in Season::ALL {
            assert!(coconut.grows_in(season));
        }
    }
}
