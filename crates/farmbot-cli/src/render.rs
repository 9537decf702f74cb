//! Terminal rendering of messages and reports.

use farmbot_core::message::{Message, Sender};
use farmbot_core::report::{AnalysisReport, HealthStatus};

/// Prints one message, prefixed by its speaker.
pub fn print_message(message: &Message) {
    let speaker = match message.sender {
        Sender::User => "you",
        Sender::Assistant => "farmbot",
    };
    println!("[{}] {}", speaker, message.text);
    if let Some(report) = &message.report {
        if report.health_status != HealthStatus::NotApplicable {
            println!();
            println!("{}", render_report(report));
        }
    }
    println!();
}

/// Renders a full diagnostic report as an indented block.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out += "  Diagnostic Report\n";
    out += &format!("    Health:    {}\n", report.health_status);
    out += &format!("    Soil:      {}\n", report.soil_health);
    out += &format!("    Pest risk: {}\n", report.pest_risk);
    out += &format!("    Water:     {}\n", report.water_need);
    out += &format!(
        "    Nutrients: N {}% / P {}% / K {}%\n",
        report.nutrients.nitrogen, report.nutrients.phosphorus, report.nutrients.potassium
    );
    if !report.remedies.is_empty() {
        out += "    Remedies:\n";
        for remedy in &report.remedies {
            out += &format!("      - {}\n", remedy);
        }
    }
    if !report.pest_control.organic.is_empty() {
        out += "    Organic pest control:\n";
        for item in &report.pest_control.organic {
            out += &format!("      - {}\n", item);
        }
    }
    if !report.pest_control.chemical.is_empty() {
        out += "    Chemical pest control:\n";
        for item in &report.pest_control.chemical {
            out += &format!("      - {}\n", item);
        }
    }
    if !report.recommendations.is_empty() {
        out += "    Recommendations:\n";
        for rec in &report.recommendations {
            out += &format!("      - {}\n", rec);
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmbot_core::report::{NutrientLevels, PestRisk, SoilHealth, WaterNeed};

    #[test]
    fn report_block_lists_every_section() {
        let mut report = AnalysisReport::informational(vec!["Mulch the bed".to_string()]);
        report.health_status = HealthStatus::Fair;
        report.soil_health = SoilHealth::Moderate;
        report.pest_risk = PestRisk::High;
        report.water_need = WaterNeed::OverWatered;
        report.nutrients = NutrientLevels {
            nitrogen: 45,
            phosphorus: 60,
            potassium: 72,
        };
        report.remedies = vec!["Apply neem cake".to_string()];

        let block = render_report(&report);
        assert!(block.contains("Health:    Fair"));
        assert!(block.contains("Water:     Over-watered"));
        assert!(block.contains("N 45% / P 60% / K 72%"));
        assert!(block.contains("- Apply neem cake"));
        assert!(block.contains("- Mulch the bed"));
    }
}
