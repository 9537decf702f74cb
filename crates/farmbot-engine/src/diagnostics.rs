//! Simulated crop-image diagnostics.
//!
//! No actual computer vision happens here: the verdicts are drawn from the
//! injected random source using fixed weights, after validating that the
//! image reference is readable and waiting out the configured analysis
//! delay. Deterministic under a scripted source.

use chrono::{Datelike, Utc};
use farmbot_core::config::LatencyConfig;
use farmbot_core::context::TemporalContext;
use farmbot_core::error::{FarmbotError, Result};
use farmbot_core::knowledge::KnowledgeBase;
use farmbot_core::message::ImageRef;
use farmbot_core::random::{sample, RandomSource};
use farmbot_core::report::{
    AnalysisReport, HealthStatus, NutrientLevels, PestControlPlan, PestRisk, SoilHealth, WaterNeed,
};
use std::time::Duration;

/// Runs one simulated analysis over an uploaded image reference.
///
/// Fails with [`FarmbotError::ImageUnreadable`] before any delay is taken
/// when the reference is blank. Otherwise sleeps for the configured
/// analysis window and draws the verdicts in a fixed order, so a scripted
/// source reproduces the exact report.
pub async fn analyze_image(
    image: &ImageRef,
    kb: &KnowledgeBase,
    ctx: &TemporalContext,
    rng: &mut dyn RandomSource,
    latency: &LatencyConfig,
) -> Result<AnalysisReport> {
    if !image.is_readable() {
        return Err(FarmbotError::image_unreadable(
            "image reference is blank or empty",
        ));
    }

    let delay_ms = rng.in_range(latency.analysis_min_ms as f64, latency.analysis_max_ms as f64);
    tokio::time::sleep(Duration::from_millis(delay_ms as u64)).await;

    let health = match rng.next_float() {
        u if u < 0.4 => HealthStatus::Good,
        u if u < 0.7 => HealthStatus::Fair,
        _ => HealthStatus::Poor,
    };
    let soil = if rng.chance(0.5) {
        SoilHealth::Good
    } else {
        SoilHealth::Moderate
    };
    let pest = match rng.next_float() {
        u if u < 0.3 => PestRisk::Low,
        u if u < 0.7 => PestRisk::Medium,
        _ => PestRisk::High,
    };
    let water = match rng.next_float() {
        u if u < 0.5 => WaterNeed::Adequate,
        u if u < 0.9 => WaterNeed::High,
        _ => WaterNeed::OverWatered,
    };
    let nutrients = NutrientLevels {
        nitrogen: rng.int_in(30, 80) as u8,
        phosphorus: rng.int_in(30, 80) as u8,
        potassium: rng.int_in(30, 80) as u8,
    };

    let remedy_count = 2 + rng.pick_index(3);
    let remedies = sample(rng, &kb.remedies, remedy_count)
        .into_iter()
        .cloned()
        .collect();

    let report = AnalysisReport {
        health_status: health,
        soil_health: soil,
        pest_risk: pest,
        water_need: water,
        nutrients,
        remedies,
        pest_control: PestControlPlan {
            organic: kb.organic_controls.clone(),
            chemical: kb.chemical_controls.clone(),
        },
        recommendations: seasonal_recommendations(ctx),
    };

    tracing::debug!(
        health = %report.health_status,
        pest_risk = %report.pest_risk,
        "image analysis complete"
    );
    Ok(report)
}

fn seasonal_recommendations(ctx: &TemporalContext) -> Vec<String> {
    let upcoming_monsoon = if Utc::now().month() >= 9 {
        "Northeast"
    } else {
        "Southwest"
    };
    vec![
        format!(
            "Consider adjusting irrigation schedule for upcoming {}",
            ctx.season
        ),
        "Monitor nutrient levels weekly during growth period".to_string(),
        format!(
            "Implement pest prevention measures before {} monsoon arrives",
            upcoming_monsoon
        ),
        "Add organic matter to improve soil structure - local coconut coir is excellent"
            .to_string(),
    ]
}

/// Renders the short chat summary attached alongside a full report.
pub fn chat_summary(report: &AnalysisReport) -> String {
    let key = report
        .recommendations
        .first()
        .map(String::as_str)
        .unwrap_or("Monitor your crop regularly");
    format!(
        "Analysis complete!\n\n\
         Your plant appears to be in {} health with {} pest risk.\n\n\
         Key recommendation: {}",
        report.health_status.to_string().to_lowercase(),
        report.pest_risk.to_string().to_lowercase(),
        key
    )
}
