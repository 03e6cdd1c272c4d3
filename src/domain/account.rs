use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::goal::Goal;

/// Broad classification of an account, as recorded by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Cash,
}

/// A financial account whose balance the engine projects forward.
///
/// `current_balance` is the balance as last recorded; the spendable figure is
/// always derived from a projection, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub current_balance: f64,
    /// Minimum balance the user wants preserved.
    #[serde(default)]
    pub cushion: f64,
    /// Sum of funds earmarked to goals funded from this account.
    #[serde(default)]
    pub goal_allocations: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, kind: AccountKind, current_balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            current_balance,
            cushion: 0.0,
            goal_allocations: 0.0,
        }
    }

    pub fn with_cushion(mut self, cushion: f64) -> Self {
        self.cushion = cushion;
        self
    }

    /// Fills `goal_allocations` from the goals funded by this account.
    pub fn with_goal_allocations(mut self, goals: &[Goal]) -> Self {
        let by_account = allocations_by_account(goals);
        self.goal_allocations = by_account.get(&self.id).copied().unwrap_or(0.0);
        self
    }

    /// Funds held back from spending: cushion plus goal allocations.
    pub fn reserved(&self) -> f64 {
        self.cushion + self.goal_allocations
    }
}

/// Sums allocated goal funds per funding account.
pub fn allocations_by_account(goals: &[Goal]) -> HashMap<Uuid, f64> {
    let mut totals: HashMap<Uuid, f64> = HashMap::new();
    for goal in goals {
        if let Some(account_id) = goal.funding_account_id {
            *totals.entry(account_id).or_insert(0.0) += goal.allocated_amount;
        }
    }
    totals
}
