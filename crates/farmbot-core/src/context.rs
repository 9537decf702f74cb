//! Temporal context: agricultural seasons and simulated weather.
//!
//! The season is derived from the wall-clock month using Kerala's
//! agricultural calendar. Weather is a simulated snapshot evolved by a
//! bounded random walk; the refresh task in the engine crate replaces the
//! whole context atomically.

use crate::random::RandomSource;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Kerala's agricultural seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// June through September (Edavappathy).
    SouthwestMonsoon,
    /// October through December (Thulavarsham).
    NortheastMonsoon,
    /// January and February (Mandakalam).
    Winter,
    /// March through May (Venam).
    Summer,
}

impl Season {
    /// All seasons, in calendar order starting from the southwest monsoon.
    pub const ALL: [Season; 4] = [
        Season::SouthwestMonsoon,
        Season::NortheastMonsoon,
        Season::Winter,
        Season::Summer,
    ];

    /// Derives the season from a calendar month (1–12).
    pub fn for_month(month: u32) -> Self {
        match month {
            6..=9 => Self::SouthwestMonsoon,
            10..=12 => Self::NortheastMonsoon,
            1..=2 => Self::Winter,
            _ => Self::Summer,
        }
    }

    /// Derives the season from a timestamp.
    pub fn for_date(at: DateTime<Utc>) -> Self {
        Self::for_month(at.month())
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SouthwestMonsoon => "Southwest Monsoon (Edavappathy)",
            Self::NortheastMonsoon => "Northeast Monsoon (Thulavarsham)",
            Self::Winter => "Winter (Mandakalam)",
            Self::Summer => "Summer (Venam)",
        };
        write!(f, "{}", s)
    }
}

/// Bounds and step size for one weather variable of the random walk.
struct WalkBand {
    min: f64,
    max: f64,
    step: f64,
}

impl WalkBand {
    fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// One bounded step: move up to `step` in either direction, clamped.
    fn walk(&self, from: f64, rng: &mut dyn RandomSource) -> f64 {
        let next = from + (rng.next_float() * 2.0 - 1.0) * self.step;
        next.clamp(self.min, self.max)
    }
}

// Typical Kerala ranges.
const TEMPERATURE: WalkBand = WalkBand { min: 27.0, max: 30.0, step: 0.8 };
const HUMIDITY: WalkBand = WalkBand { min: 70.0, max: 85.0, step: 4.0 };
const RAINFALL: WalkBand = WalkBand { min: 0.0, max: 20.0, step: 5.0 };
const WIND: WalkBand = WalkBand { min: 5.0, max: 15.0, step: 3.0 };

/// A simulated weather snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_kmh: f64,
}

impl WeatherSnapshot {
    /// The mid-range starting point for the random walk.
    pub fn baseline() -> Self {
        Self {
            temperature_c: TEMPERATURE.midpoint(),
            humidity_pct: HUMIDITY.midpoint(),
            rainfall_mm: RAINFALL.midpoint(),
            wind_kmh: WIND.midpoint(),
        }
    }

    /// Advances the walk by one step, staying inside the typical ranges.
    pub fn step(&self, rng: &mut dyn RandomSource) -> Self {
        Self {
            temperature_c: TEMPERATURE.walk(self.temperature_c, rng),
            humidity_pct: HUMIDITY.walk(self.humidity_pct, rng),
            rainfall_mm: RAINFALL.walk(self.rainfall_mm, rng),
            wind_kmh: WIND.walk(self.wind_kmh, rng),
        }
    }
}

/// Season plus weather, replaced atomically on every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporalContext {
    pub season: Season,
    pub weather: WeatherSnapshot,
}

impl TemporalContext {
    /// Observes a fresh context: season from the clock, weather stepped
    /// from the previous snapshot.
    pub fn observe(at: DateTime<Utc>, previous: WeatherSnapshot, rng: &mut dyn RandomSource) -> Self {
        Self {
            season: Season::for_date(at),
            weather: previous.step(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn seasons_cover_the_calendar() {
        assert_eq!(Season::for_month(1), Season::Winter);
        assert_eq!(Season::for_month(2), Season::Winter);
        assert_eq!(Season::for_month(3), Season::Summer);
        assert_eq!(Season::for_month(5), Season::Summer);
        assert_eq!(Season::for_month(6), Season::SouthwestMonsoon);
        assert_eq!(Season::for_month(9), Season::SouthwestMonsoon);
        assert_eq!(Season::for_month(10), Season::NortheastMonsoon);
        assert_eq!(Season::for_month(12), Season::NortheastMonsoon);
    }

    #[test]
    fn walk_stays_within_bounds() {
        // Always step in the same extreme direction; bounds must hold.
        let mut up = ScriptedRandom::new(vec![0.999_999]);
        let mut down = ScriptedRandom::new(vec![0.0]);

        let mut snapshot = WeatherSnapshot::baseline();
        for _ in 0..50 {
            snapshot = snapshot.step(&mut up);
        }
        assert!(snapshot.temperature_c <= 30.0);
        assert!(snapshot.humidity_pct <= 85.0);
        assert!(snapshot.rainfall_mm <= 20.0);
        assert!(snapshot.wind_kmh <= 15.0);

        for _ in 0..50 {
            snapshot = snapshot.step(&mut down);
        }
        assert!(snapshot.temperature_c >= 27.0);
        assert!(snapshot.humidity_pct >= 70.0);
        assert!(snapshot.rainfall_mm >= 0.0);
        assert!(snapshot.wind_kmh >= 5.0);
    }

    #[test]
    fn observe_replaces_the_whole_context() {
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let at = "2026-07-15T10:00:00Z".parse().unwrap();
        let ctx = TemporalContext::observe(at, WeatherSnapshot::baseline(), &mut rng);
        assert_eq!(ctx.season, Season::SouthwestMonsoon);
    }
}
