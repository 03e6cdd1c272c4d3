use serde::{Deserialize, Serialize};

/// A monthly spending guardrail for a specific category.
///
/// `spent` is derived for the current billing period from expense instances;
/// it is never ground truth on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub spent: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
            spent: 0.0,
        }
    }

    pub fn with_spent(mut self, spent: f64) -> Self {
        self.spent = spent;
        self
    }

    /// Spend as a percentage of the limit. A missing or zero limit reads as
    /// zero percent rather than dividing by zero.
    pub fn percentage_spent(&self) -> f64 {
        if self.limit <= 0.0 {
            0.0
        } else {
            self.spent / self.limit * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_reads_as_zero_percent() {
        let budget = Budget::new("Food", 0.0).with_spent(120.0);
        assert_eq!(budget.percentage_spent(), 0.0);
    }

    #[test]
    fn percentage_tracks_spend() {
        let budget = Budget::new("Food", 400.0).with_spent(340.0);
        assert_eq!(budget.percentage_spent(), 85.0);
    }
}
