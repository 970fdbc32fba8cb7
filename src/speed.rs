use std::{fmt, str::FromStr, time::Duration};

use crate::error::ParseSpeedError;

/// Difficulty. Faster ticks pay more per food.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpeedProfile {
    Easy,
    #[default]
    Medium,
    Hard,
    Insane,
}

impl SpeedProfile {
    pub const ALL: [SpeedProfile; 4] = [
        SpeedProfile::Easy,
        SpeedProfile::Medium,
        SpeedProfile::Hard,
        SpeedProfile::Insane,
    ];

    pub fn interval_ms(self) -> u64 {
        match self {
            SpeedProfile::Easy => 200,
            SpeedProfile::Medium => 120,
            SpeedProfile::Hard => 80,
            SpeedProfile::Insane => 50,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn multiplier(self) -> f64 {
        match self {
            SpeedProfile::Easy => 1.0,
            SpeedProfile::Medium => 1.5,
            SpeedProfile::Hard => 2.0,
            SpeedProfile::Insane => 3.0,
        }
    }

    /// Points for one food, `floor(10 * multiplier)`.
    pub fn food_points(self) -> u32 {
        (10.0 * self.multiplier()).floor() as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedProfile::Easy => "EASY",
            SpeedProfile::Medium => "MEDIUM",
            SpeedProfile::Hard => "HARD",
            SpeedProfile::Insane => "INSANE",
        }
    }
}

impl fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for SpeedProfile {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpeedProfile::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSpeedError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_points_follow_multiplier() {
        let points: Vec<u32> = SpeedProfile::ALL.iter().map(|p| p.food_points()).collect();
        assert_eq!(points, vec![10, 15, 20, 30]);
    }

    #[test]
    fn faster_profiles_tick_sooner() {
        for pair in SpeedProfile::ALL.windows(2) {
            assert!(pair[0].interval() > pair[1].interval());
        }
        assert_eq!(SpeedProfile::Medium.interval_ms(), 120);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Hard".parse::<SpeedProfile>().unwrap(), SpeedProfile::Hard);
        assert_eq!(" insane ".parse::<SpeedProfile>().unwrap(), SpeedProfile::Insane);
        assert!("turbo".parse::<SpeedProfile>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let p = SpeedProfile::Easy;
        assert_eq!(p.to_string().parse::<SpeedProfile>().unwrap(), p);
    }
}
