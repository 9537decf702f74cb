//! Built-in Kerala reference data.
//!
//! System-defined tables available to every session. Season windows map
//! the traditional growing-window labels onto the four-season calendar.

use super::{
    CropEntry, DemandLevel, KnowledgeBase, MarketCropModel, PestEntry, ProfitPotential,
};
use crate::context::Season;

use Season::{NortheastMonsoon, SouthwestMonsoon, Summer, Winter};

const YEAR_ROUND: [Season; 4] = [SouthwestMonsoon, NortheastMonsoon, Winter, Summer];

fn crop(
    name: &str,
    demand: DemandLevel,
    rationale: &str,
    season_label: &str,
    seasons: &[Season],
    profit: ProfitPotential,
) -> CropEntry {
    CropEntry {
        name: name.to_string(),
        demand,
        rationale: rationale.to_string(),
        season_label: season_label.to_string(),
        seasons: seasons.to_vec(),
        profit,
    }
}

fn pest(pest: &str, affected_crop: &str, solution: &str) -> PestEntry {
    PestEntry {
        pest: pest.to_string(),
        affected_crop: affected_crop.to_string(),
        solution: solution.to_string(),
    }
}

fn market(crop: &str, unit: &str, base_paise: u32, spread_paise: u32) -> MarketCropModel {
    MarketCropModel {
        crop: crop.to_string(),
        unit: unit.to_string(),
        base_paise,
        spread_paise,
    }
}

/// Assembles the built-in knowledge base.
pub(super) fn builtin() -> KnowledgeBase {
    let crops = vec![
        crop(
            "Rice (Njavara)",
            DemandLevel::VeryHigh,
            "Traditional Kerala variety with medicinal properties",
            "Monsoon",
            &[SouthwestMonsoon, NortheastMonsoon],
            ProfitPotential::Good,
        ),
        crop(
            "Coconut",
            DemandLevel::High,
            "Kerala's signature crop, multiple uses",
            "Year-round",
            &YEAR_ROUND,
            ProfitPotential::Steady,
        ),
        crop(
            "Banana (Nendran)",
            DemandLevel::High,
            "Popular Kerala variety for chips and curry",
            "Year-round",
            &YEAR_ROUND,
            ProfitPotential::High,
        ),
        crop(
            "Black Pepper",
            DemandLevel::High,
            "Kerala is the spice capital",
            "Post-monsoon",
            &[NortheastMonsoon],
            ProfitPotential::VeryHigh,
        ),
        crop(
            "Cardamom",
            DemandLevel::Medium,
            "Thrives in Kerala's highland climate",
            "June-July",
            &[SouthwestMonsoon],
            ProfitPotential::VeryHigh,
        ),
        crop(
            "Rubber",
            DemandLevel::Medium,
            "Well-suited to Kerala's climate",
            "Year-round",
            &YEAR_ROUND,
            ProfitPotential::Steady,
        ),
        crop(
            "Tapioca",
            DemandLevel::Medium,
            "Traditional Kerala staple food",
            "Pre-monsoon",
            &[Summer],
            ProfitPotential::Moderate,
        ),
        crop(
            "Arecanut",
            DemandLevel::Medium,
            "Traditional crop in Kerala",
            "Year-round",
            &YEAR_ROUND,
            ProfitPotential::Good,
        ),
    ];

    let pests = vec![
        pest(
            "Rhinoceros Beetle",
            "Coconut",
            "Place naphthalene balls in leaf axils, use hook to remove beetles",
        ),
        pest(
            "Rice Stem Borer",
            "Rice",
            "Use neem-based pesticides, release parasitoids like Trichogramma",
        ),
        pest(
            "Tea Mosquito Bug",
            "Cashew",
            "Apply neem oil spray, maintain field sanitation",
        ),
        pest(
            "Fruit Fly",
            "Mango, Guava",
            "Install pheromone traps, wrap fruits with paper bags",
        ),
        pest(
            "Bunchy Top Virus Vector",
            "Banana",
            "Use disease-free planting material, remove affected plants",
        ),
        pest(
            "Red Palm Weevil",
            "Coconut",
            "Treat crown with carbaryl, fill leaf axil with sand",
        ),
    ];

    let market = vec![
        market("Rice (Matta)", "kg", 4000, 1000),
        market("Coconut", "piece", 2000, 1500),
        market("Banana (Nendran)", "kg", 5000, 2000),
        market("Black Pepper", "kg", 30000, 10000),
        market("Cardamom", "kg", 80000, 20000),
    ];

    let remedies = vec![
        "Apply organic NPK fertilizer for better nutrient balance",
        "Add coconut husk or coir pith to improve soil aeration",
        "Apply local Kerala neem cake as a natural pesticide",
        "Increase watering frequency during dry periods",
        "Implement mulching with banana leaves to retain soil moisture",
        "Use vermicompost from local sources",
        "Apply slaked lime to adjust soil pH",
        "Introduce parasitoid wasps for natural pest control",
        "Install pheromone traps around the field",
        "Apply fish amino acid as a growth promoter",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let organic_controls = vec![
        "Neem oil spray (Kerala traditional solution)",
        "Garlic and chili pepper spray",
        "Pseudomonas fluorescens application",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let chemical_controls = vec![
        "Selective insecticide (only if organic methods fail)",
        "Minimal copper fungicide spray",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let prevention_tips = vec![
        "Maintain field sanitation",
        "Use trap crops",
        "Regular monitoring",
        "Use natural predators",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let fertilizer_advisory = "Fertilizer Recommendations for Kerala Soils:\n\n\
        • Organic Options:\n\
        \x20 - Vermicompost: Excellent for Kerala's acidic soils\n\
        \x20 - Fish Amino Acid: Traditional Kerala fertilizer\n\
        \x20 - Coconut coir compost: Locally available\n\n\
        • Chemical NPK Ratios:\n\
        \x20 - Rice: 5:10:10\n\
        \x20 - Coconut: 2:4:4\n\
        \x20 - Banana: 15:9:20\n\
        \x20 - Vegetables: 10:10:10\n\n\
        Kerala soils are generally acidic (pH 4.5-5.5). I recommend getting a \
        soil test at your local Krishi Bhavan before applying fertilizers."
        .to_string();

    let starter_queries = vec![
        "what crops should I plant now?",
        "how to control pests in coconut?",
        "current rice prices in Kerala",
        "best fertilizer for banana plants",
        "weather forecast impact on farming",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let calendar = vec![
        (
            SouthwestMonsoon,
            to_strings(&["Rice", "Ginger", "Turmeric", "Tapioca"]),
        ),
        (
            NortheastMonsoon,
            to_strings(&["Vegetables", "Pulses", "Black Pepper", "Coffee"]),
        ),
        (
            Winter,
            to_strings(&["Coconut", "Banana", "Vegetables", "Cardamom"]),
        ),
        (
            Summer,
            to_strings(&["Mango", "Jackfruit", "Pineapple", "Cashew"]),
        ),
    ];

    KnowledgeBase {
        crops,
        pests,
        market,
        remedies,
        organic_controls,
        chemical_controls,
        prevention_tips,
        fertilizer_advisory,
        starter_queries,
        calendar,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
