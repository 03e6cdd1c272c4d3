use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal funded from one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub allocated_amount: f64,
    #[serde(default)]
    pub funding_account_id: Option<Uuid>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64, funding_account_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            allocated_amount: 0.0,
            funding_account_id,
        }
    }

    pub fn with_allocated(mut self, allocated_amount: f64) -> Self {
        self.allocated_amount = allocated_amount;
        self
    }

    /// Amount still to allocate before the goal is fully funded.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.allocated_amount).max(0.0)
    }
}
