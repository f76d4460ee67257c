//! Calculator usage counters

use serde::{Deserialize, Serialize};

/// How many times one calculator has been used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorCount {
    pub name: String,
    pub count: u64,
}

/// Usage statistics, most used calculator first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    total_calculations: u64,
    calculators: Vec<CalculatorCount>,
}

/// Calculators listed before any have been used
const SEEDED_CALCULATORS: [&str; 5] = [
    "Position Size",
    "Pip Value",
    "Risk/Reward",
    "Fibonacci",
    "Profit/Loss",
];

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            total_calculations: 0,
            calculators: SEEDED_CALCULATORS
                .iter()
                .map(|name| CalculatorCount {
                    name: name.to_string(),
                    count: 0,
                })
                .collect(),
        }
    }
}

impl UsageStats {
    /// Count one use of `name` and keep the list ordered by count
    pub fn record(&mut self, name: &str) {
        self.total_calculations += 1;

        match self.calculators.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.count += 1,
            None => self.calculators.push(CalculatorCount {
                name: name.to_string(),
                count: 1,
            }),
        }

        // Stable sort keeps first-seen order among ties
        self.calculators.sort_by(|a, b| b.count.cmp(&a.count));
    }

    pub fn total_calculations(&self) -> u64 {
        self.total_calculations
    }

    pub fn count_for(&self, name: &str) -> u64 {
        self.calculators
            .iter()
            .find(|c| c.name == name)
            .map_or(0, |c| c.count)
    }

    /// The `n` most used calculators
    pub fn most_used(&self, n: usize) -> &[CalculatorCount] {
        &self.calculators[..n.min(self.calculators.len())]
    }
}
