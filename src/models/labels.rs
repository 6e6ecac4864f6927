//! Display labels for cycle days.
//!
//! Labels are presentation only; the model works on day indices.

use serde::{Deserialize, Serialize};

use super::{CycleConfig, Day, DAYS_PER_WEEK};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One display name per cycle day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLabels {
    names: Vec<String>,
}

impl DayLabels {
    /// Monday..Sunday.
    pub fn weekdays() -> Self {
        Self {
            names: WEEKDAYS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `Day 0`, `Day 1`, ... for any cycle length.
    pub fn numbered(cycle: &CycleConfig) -> Self {
        Self {
            names: cycle.days().map(|d| format!("Day {d}")).collect(),
        }
    }

    /// Weekday names for weekly cycles, numbered labels otherwise.
    pub fn for_cycle(cycle: &CycleConfig) -> Self {
        if cycle.cycle_length() == DAYS_PER_WEEK {
            Self::weekdays()
        } else {
            Self::numbered(cycle)
        }
    }

    /// Custom names. Returns `None` unless there is exactly one per day.
    pub fn custom<S: Into<String>>(cycle: &CycleConfig, names: Vec<S>) -> Option<Self> {
        if names.len() != cycle.cycle_length() as usize {
            return None;
        }
        Some(Self {
            names: names.into_iter().map(Into::into).collect(),
        })
    }

    /// Label for `day`, or `"?"` if out of range.
    pub fn label(&self, day: Day) -> &str {
        self.names.get(day.index()).map(String::as_str).unwrap_or("?")
    }

    /// Widest label, in characters.
    pub fn max_width(&self) -> usize {
        self.names.iter().map(|n| n.chars().count()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_labels() {
        let labels = DayLabels::for_cycle(&CycleConfig::weekly());
        assert_eq!(labels.label(Day::new(0)), "Monday");
        assert_eq!(labels.label(Day::new(6)), "Sunday");
        assert_eq!(labels.label(Day::new(7)), "?");
        assert_eq!(labels.max_width(), 9); // Wednesday
    }

    #[test]
    fn test_numbered_labels() {
        let cfg = CycleConfig::new(4, 3, 1).unwrap();
        let labels = DayLabels::for_cycle(&cfg);
        assert_eq!(labels.label(Day::new(3)), "Day 3");
    }

    #[test]
    fn test_custom_labels() {
        let cfg = CycleConfig::new(3, 2, 1).unwrap();
        assert!(DayLabels::custom(&cfg, vec!["a", "b"]).is_none());
        let labels = DayLabels::custom(&cfg, vec!["a", "b", "c"]).unwrap();
        assert_eq!(labels.label(Day::new(1)), "b");
    }
}
