//! Deterministic intent classification for user utterances.
//!
//! Classification is a pure function of the input text: no randomness, no
//! clock, no knowledge-base state. Rules are evaluated in a fixed priority
//! order and the first match wins; unmatched input falls through to
//! [`Intent::Fallback`], so classification never fails.

use serde::{Deserialize, Serialize};

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// What to plant: (what|which|recommend) plus (plant|crop|grow)
    CropRecommendation,
    /// Pest and disease management: pest/disease/insect
    PestControl,
    /// Current conditions: weather/climate/rain
    Weather,
    /// Market rates: price/market/rate
    MarketPrice,
    /// Soil and fertilizer guidance: fertilizer/nutrient/soil
    FertilizerAdvice,
    /// Anything unmatched: answered with a help message
    Fallback,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CropRecommendation => "crop_recommendation",
            Self::PestControl => "pest_control",
            Self::Weather => "weather",
            Self::MarketPrice => "market_price",
            Self::FertilizerAdvice => "fertilizer_advice",
            Self::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classifies an utterance into one of the fixed intents.
///
/// Matching is case-insensitive substring containment, checked in priority
/// order. Input is expected to be non-empty trimmed text (sessions reject
/// empty input before classification), but any string is accepted.
pub fn classify(text: &str) -> Intent {
    let q = text.to_lowercase();

    // Crop recommendations need both a question word and a planting word.
    if contains_any(&q, &["what", "which", "recommend"])
        && contains_any(&q, &["plant", "crop", "grow"])
    {
        return Intent::CropRecommendation;
    }

    if contains_any(&q, &["pest", "disease", "insect"]) {
        return Intent::PestControl;
    }

    if contains_any(&q, &["weather", "climate", "rain"]) {
        return Intent::Weather;
    }

    if contains_any(&q, &["price", "market", "rate"]) {
        return Intent::MarketPrice;
    }

    if contains_any(&q, &["fertilizer", "nutrient", "soil"]) {
        return Intent::FertilizerAdvice;
    }

    Intent::Fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_query_classes() {
        assert_eq!(
            classify("what crops should I plant now?"),
            Intent::CropRecommendation
        );
        assert_eq!(classify("Which vegetables grow best here"), Intent::CropRecommendation);
        assert_eq!(classify("pest in coconut"), Intent::PestControl);
        assert_eq!(classify("is there a DISEASE on my banana"), Intent::PestControl);
        assert_eq!(classify("will it rain tomorrow"), Intent::Weather);
        assert_eq!(classify("current rice prices"), Intent::MarketPrice);
        assert_eq!(classify("best fertilizer for banana"), Intent::FertilizerAdvice);
        assert_eq!(classify("hello there"), Intent::Fallback);
    }

    #[test]
    fn priority_order_is_fixed() {
        // Pest beats market price when both trigger.
        assert_eq!(classify("pest control market rates"), Intent::PestControl);
        // Crop recommendation beats everything when its two groups match.
        assert_eq!(
            classify("what crops sell at the best market price"),
            Intent::CropRecommendation
        );
        // A lone question word is not enough for a crop recommendation.
        assert_eq!(classify("what is the market rate"), Intent::MarketPrice);
        // Weather beats fertilizer.
        assert_eq!(classify("rain impact on soil"), Intent::Weather);
    }

    #[test]
    fn classification_is_deterministic() {
        let corpus = [
            "what should I grow",
            "pests everywhere",
            "weather report",
            "mandi rates please",
            "soil is acidic",
            "tell me a story",
            "",
        ];
        for text in corpus {
            assert_eq!(classify(text), classify(text), "input: {:?}", text);
        }
    }

    #[test]
    fn unmatched_input_falls_back() {
        assert_eq!(classify("lorem ipsum dolor"), Intent::Fallback);
        assert_eq!(classify("🥥"), Intent::Fallback);
        assert_eq!(classify(""), Intent::Fallback);
    }
}
