//! Trip configuration
//!
//! Pure configuration struct: no cross-field invariants beyond type ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    #[serde(rename = "Day Hike")]
    DayHike,
    Overnight,
    #[serde(rename = "Multi-day")]
    MultiDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Forest,
    Desert,
    Alpine,
    Coastal,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Shoulder,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterAvailability {
    Frequent,
    Occasional,
    Rare,
}

/// Drives the target-weight thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackStyle {
    Ultralight,
    Balanced,
    Comfort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rainy,
    Stormy,
    Snowy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSettings {
    pub trip_type: TripType,
    pub environment: Environment,
    pub season: Season,
    /// Expected overnight low, °C
    pub low_temp_c: i32,
    pub distance_per_day_km: f64,
    pub water: WaterAvailability,
    pub location: String,
    pub pack_style: PackStyle,
    pub weather: Weather,
    pub party_size: u32,
}

impl Default for TripSettings {
    fn default() -> Self {
        Self {
            trip_type: TripType::Overnight,
            environment: Environment::Forest,
            season: Season::Summer,
            low_temp_c: 10,
            distance_per_day_km: 15.0,
            water: WaterAvailability::Occasional,
            location: String::new(),
            pack_style: PackStyle::Balanced,
            weather: Weather::Clear,
            party_size: 1,
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TripType::DayHike => "Day Hike",
            TripType::Overnight => "Overnight",
            TripType::MultiDay => "Multi-day",
        };
        f.write_str(s)
    }
}

macro_rules! display_via_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self)
            }
        })*
    };
}

display_via_debug!(Environment, Season, WaterAvailability, PackStyle, Weather);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_app_strings() {
        assert_eq!(
            serde_json::to_string(&TripType::MultiDay).unwrap(),
            "\"Multi-day\""
        );
        assert_eq!(
            serde_json::to_string(&TripType::DayHike).unwrap(),
            "\"Day Hike\""
        );
        assert_eq!(
            serde_json::to_string(&PackStyle::Ultralight).unwrap(),
            "\"Ultralight\""
        );
    }

    #[test]
    fn default_settings() {
        let settings = TripSettings::default();
        assert_eq!(settings.trip_type, TripType::Overnight);
        assert_eq!(settings.pack_style, PackStyle::Balanced);
        assert_eq!(settings.party_size, 1);
    }
}
