//! End-of-round summary.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub correct: usize,
    pub total: usize,
    pub mistakes: u32,
    pub best_streak: u32,
    pub duration_ms: u64,
}

impl RoundResult {
    /// Percentage of words completed, 0 for an empty round.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_ms)
    }
}

/// Seconds rounded to one decimal place, e.g. `1.2s`.
pub fn format_duration(ms: u64) -> String {
    let tenths = ms.saturating_add(50) / 100;
    format!("{}.{}s", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(correct: usize, total: usize) -> RoundResult {
        RoundResult {
            correct,
            total,
            mistakes: 0,
            best_streak: 0,
            duration_ms: 0,
        }
    }

    #[test]
    fn accuracy_percent() {
        assert_eq!(result(0, 0).accuracy(), 0.0);
        assert_eq!(result(3, 4).accuracy(), 75.0);
        assert_eq!(result(4, 4).accuracy(), 100.0);
    }

    #[test]
    fn durations_round_to_tenths() {
        assert_eq!(format_duration(0), "0.0s");
        assert_eq!(format_duration(1234), "1.2s");
        assert_eq!(format_duration(1250), "1.3s");
        assert_eq!(format_duration(59_990), "60.0s");
    }
}
