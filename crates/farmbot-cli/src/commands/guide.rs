//! Seasonal planting guide.

use anyhow::Result;
use farmbot_core::context::Season;
use farmbot_engine::Engine;

pub fn run(engine: &Engine) -> Result<()> {
    let ctx = engine.current_context();
    println!("Current season: {}", ctx.season);
    println!(
        "Conditions: {:.1}°C, {:.0}% humidity, {:.1}mm rainfall, {:.1} km/h wind",
        ctx.weather.temperature_c,
        ctx.weather.humidity_pct,
        ctx.weather.rainfall_mm,
        ctx.weather.wind_kmh
    );
    println!();

    println!("Seasonal planting guide:");
    for season in Season::ALL {
        let marker = if season == ctx.season { "*" } else { " " };
        println!(
            "{} {}: {}",
            marker,
            season,
            engine.seasonal_guide(season).join(", ")
        );
    }
    println!();

    println!("Things you can ask:");
    for query in engine.starter_queries() {
        println!("  - {}", query);
    }
    Ok(())
}
