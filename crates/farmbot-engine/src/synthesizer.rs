//! Response synthesis for classified text turns.
//!
//! Given an intent, the knowledge base, the temporal context and a random
//! source, produces the chat text plus an optional structured report.
//! Synthesis never fails; the only side effect is consuming the random
//! source.

use chrono::Utc;
use farmbot_core::context::{TemporalContext, WeatherSnapshot};
use farmbot_core::intent::Intent;
use farmbot_core::knowledge::{CropEntry, KnowledgeBase, MarketPriceEntry, PestEntry, Trend};
use farmbot_core::random::{sample, RandomSource};
use farmbot_core::report::{AnalysisReport, PestControlPlan, PestRisk};
use std::sync::Arc;

/// A synthesized assistant reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub report: Option<AnalysisReport>,
}

impl Reply {
    fn text_only(text: String) -> Self {
        Self { text, report: None }
    }
}

/// Stateless reply synthesizer over a shared knowledge base.
pub struct Synthesizer {
    kb: Arc<KnowledgeBase>,
}

impl Synthesizer {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Produces the reply for one classified turn.
    pub fn synthesize(
        &self,
        intent: Intent,
        utterance: &str,
        ctx: &TemporalContext,
        rng: &mut dyn RandomSource,
    ) -> Reply {
        let q = utterance.to_lowercase();
        match intent {
            Intent::CropRecommendation => self.crop_recommendation(&q, ctx, rng),
            Intent::PestControl => self.pest_control(&q, ctx, rng),
            Intent::Weather => self.weather(ctx),
            Intent::MarketPrice => self.market_price(rng),
            Intent::FertilizerAdvice => Reply::text_only(self.kb.fertilizer_advisory.clone()),
            Intent::Fallback => self.fallback(rng),
        }
    }

    fn crop_recommendation(
        &self,
        q: &str,
        ctx: &TemporalContext,
        rng: &mut dyn RandomSource,
    ) -> Reply {
        let count = 3 + rng.pick_index(3);

        let seasonal = contains_any(q, &["season", "now", "current"]);
        let pool: Vec<&CropEntry> = if seasonal {
            self.kb.crops_for_season(ctx.season)
        } else {
            self.kb.crops.iter().collect()
        };

        let mut picks: Vec<&CropEntry> = sample(rng, &pool, count).into_iter().copied().collect();
        if picks.is_empty() {
            // Seasonal filter came up dry; fall back to a random sample.
            picks = sample(rng, &self.kb.crops, count);
        }

        let mut text = format!(
            "Based on Kerala's current {} season and your location, here are recommended crops:\n\n",
            ctx.season
        );
        text += &picks
            .iter()
            .map(|c| {
                format!(
                    "• {}: {} demand - {} (Best season: {}, Profit potential: {})",
                    c.name, c.demand, c.rationale, c.season_label, c.profit
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        if contains_any(q, &["profit", "market", "sell"]) {
            let best: Vec<&str> = picks
                .iter()
                .filter(|c| c.profit.is_high())
                .map(|c| c.name.as_str())
                .collect();
            if !best.is_empty() {
                text += &format!(
                    "\n\nFor maximum profit, I recommend focusing on {} as these have the best market rates in Kerala currently.",
                    best.join(" or ")
                );
            }
        }

        let report = AnalysisReport::informational(
            picks
                .iter()
                .map(|c| {
                    format!(
                        "{}: {} demand - {} (Season: {})",
                        c.name, c.demand, c.rationale, c.season_label
                    )
                })
                .collect(),
        );

        Reply {
            text,
            report: Some(report),
        }
    }

    fn pest_control(&self, q: &str, ctx: &TemporalContext, rng: &mut dyn RandomSource) -> Reply {
        let matched = self.kb.pests_matching(q);
        let picks: Vec<&PestEntry> = if matched.is_empty() {
            sample(rng, &self.kb.pests, 3)
        } else {
            matched
        };

        let mut text = format!(
            "Common pests affecting crops in Kerala during {}:\n\n",
            ctx.season
        );
        text += &picks
            .iter()
            .map(|p| {
                format!(
                    "• {} (affects {}):\n  Solution: {}",
                    p.pest, p.affected_crop, p.solution
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        text += "\n\nGeneral Prevention Tips:\n";
        text += &self
            .kb
            .prevention_tips
            .iter()
            .map(|t| format!("• {}", t))
            .collect::<Vec<_>>()
            .join("\n");

        let mut report = AnalysisReport::informational(
            [
                "Start with organic solutions first",
                "Monitor pest populations regularly",
                "Consider companion planting for natural pest control",
                "Use chemical solutions only as a last resort",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
        report.pest_risk = PestRisk::Medium;
        report.remedies = vec![
            "Use neem oil spray for aphids and mites".to_string(),
            "Apply garlic and chili spray for soft-bodied insects".to_string(),
            "Consider diatomaceous earth for crawling insects".to_string(),
        ];
        report.pest_control = PestControlPlan {
            organic: picks
                .iter()
                .filter(|p| !p.solution.contains("carbaryl"))
                .map(|p| p.solution.clone())
                .collect(),
            chemical: picks
                .iter()
                .filter(|p| p.solution.contains("carbaryl"))
                .map(|p| p.solution.clone())
                .collect(),
        };

        Reply {
            text,
            report: Some(report),
        }
    }

    fn weather(&self, ctx: &TemporalContext) -> Reply {
        let w = ctx.weather;
        let text = format!(
            "Kerala Weather Report for {}:\n\n\
             • Temperature: {:.1}°C\n\
             • Humidity: {:.0}%\n\
             • Rainfall: {:.1}mm\n\
             • Wind Speed: {:.1} km/h\n\
             • Current Season: {}\n\n\
             Farming Impact: {}",
            Utc::now().format("%A, %B %e"),
            w.temperature_c,
            w.humidity_pct,
            w.rainfall_mm,
            w.wind_kmh,
            ctx.season,
            farming_impact(&w),
        );
        Reply::text_only(text)
    }

    fn market_price(&self, rng: &mut dyn RandomSource) -> Reply {
        let quotes: Vec<MarketPriceEntry> = self
            .kb
            .market
            .iter()
            .map(|m| MarketPriceEntry {
                crop: m.crop.clone(),
                price_rupees: (m.base_paise as f64 + rng.next_float() * m.spread_paise as f64)
                    .round()
                    / 100.0,
                unit: m.unit.clone(),
                trend: if rng.chance(0.5) { Trend::Up } else { Trend::Down },
            })
            .collect();

        let mut text = "Current Market Prices in Kerala:\n\n".to_string();
        text += &quotes
            .iter()
            .map(|q| {
                let arrow = match q.trend {
                    Trend::Up => "↑",
                    Trend::Down => "↓",
                };
                format!("• {}: ₹{:.2}/{} (Trending {})", q.crop, q.price_rupees, q.unit, arrow)
            })
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(highest) = quotes
            .iter()
            .max_by(|a, b| a.price_rupees.total_cmp(&b.price_rupees))
        {
            let rising: Vec<&str> = quotes
                .iter()
                .filter(|q| q.trend == Trend::Up)
                .map(|q| q.crop.as_str())
                .collect();
            let insight = if rising.is_empty() {
                "Most prices are currently stable or declining slightly.".to_string()
            } else {
                format!("Prices are rising for {}.", rising.join(", "))
            };
            text += &format!(
                "\n\nMarket Insights: {} has the highest value currently. {}",
                highest.crop, insight
            );
        }

        Reply::text_only(text)
    }

    fn fallback(&self, rng: &mut dyn RandomSource) -> Reply {
        let suggestions = sample(rng, &self.kb.starter_queries, 3);
        let quoted = suggestions
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(" or ");
        let text = format!(
            "I'm not sure about that. Here are some things you can ask me about:\n\n\
             • Kerala crop recommendations\n\
             • Pest control methods\n\
             • Current weather conditions\n\
             • Market prices and trends\n\
             • Fertilizer advice\n\n\
             Try asking: {}",
            quoted
        );
        Reply::text_only(text)
    }
}

/// Derives the one-line farming-impact sentence from a weather snapshot.
///
/// Thresholds are checked in priority order; the first match wins.
pub fn farming_impact(w: &WeatherSnapshot) -> &'static str {
    if w.rainfall_mm > 15.0 {
        "Heavy rainfall may cause waterlogging. Ensure proper drainage in fields. Delay pesticide application. Harvest mature crops immediately."
    } else if w.humidity_pct > 80.0 {
        "High humidity increases disease risk. Monitor for fungal infections. Increase spacing between plants for better air circulation."
    } else if w.temperature_c > 32.0 {
        "High temperatures may cause heat stress. Provide shade for sensitive crops. Increase irrigation frequency but with less water per session."
    } else if w.wind_kmh > 12.0 {
        "Strong winds may damage tall crops. Consider temporary supports for banana and papaya plants. Delay spraying operations."
    } else {
        "Current conditions are favorable for most farming activities. Good time for planting and field operations."
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
