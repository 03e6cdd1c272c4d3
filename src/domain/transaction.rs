use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::{Frequency, MAX_EXPANSION_OCCURRENCES};

/// Direction of a series; determines the sign of its amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Normalizes a raw magnitude into the signed convention used throughout the
/// engine: expenses negative, income positive.
pub fn signed_amount(kind: TransactionKind, amount: f64) -> f64 {
    match kind {
        TransactionKind::Income => amount.abs(),
        TransactionKind::Expense => -amount.abs(),
    }
}

/// Recurring-schedule definition attached to a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Next or last known occurrence; all other occurrences are derived from it.
    pub anchor_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Dates whose single occurrence was deleted or edited away from the series.
    #[serde(default)]
    pub excluded_dates: BTreeSet<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, anchor_date: NaiveDate) -> Self {
        Self {
            frequency,
            anchor_date,
            end_date: None,
            excluded_dates: BTreeSet::new(),
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// First non-excluded occurrence on or after `date`, if the rule still
    /// produces one.
    pub fn next_occurrence_on_or_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut index = self.frequency.periods_until(self.anchor_date, date);
        index = index.saturating_sub(1);
        for _ in 0..MAX_EXPANSION_OCCURRENCES {
            let candidate = self.frequency.occurrence(self.anchor_date, index);
            if let Some(end) = self.end_date {
                if candidate > end {
                    return None;
                }
            }
            if candidate >= date && !self.excluded_dates.contains(&candidate) {
                return Some(candidate);
            }
            index += 1;
        }
        None
    }
}

/// A transaction definition owned by the account it debits or credits.
///
/// One-time entries carry their date directly; recurring entries derive all
/// concrete occurrences from the attached [`RecurrenceRule`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionSeries {
    pub id: Uuid,
    pub description: String,
    /// Signed amount: expense negative, income positive.
    pub amount: f64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<String>,
    pub account_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
}

impl TransactionSeries {
    pub fn one_time(
        description: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        account_id: Uuid,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount: signed_amount(kind, amount),
            kind,
            category: None,
            account_id,
            date,
            recurrence: None,
        }
    }

    pub fn recurring(
        description: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        account_id: Uuid,
        rule: RecurrenceRule,
    ) -> Self {
        let date = rule.anchor_date;
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount: signed_amount(kind, amount),
            kind,
            category: None,
            account_id,
            date,
            recurrence: Some(rule),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Suppresses a single occurrence; the cadence continues unaffected.
    pub fn exclude_date(&mut self, date: NaiveDate) {
        if let Some(rule) = self.recurrence.as_mut() {
            rule.excluded_dates.insert(date);
        }
    }

    /// Builds the concrete occurrence of this series on `date`.
    pub fn instance_on(&self, date: NaiveDate, is_instance: bool) -> TransactionInstance {
        TransactionInstance {
            source_id: self.id,
            date,
            amount: self.amount,
            account_id: self.account_id,
            category: self.category.clone(),
            description: self.description.clone(),
            is_instance,
        }
    }
}

/// One concrete, dated occurrence of a one-time record or an expanded series.
///
/// Instances of recurring series are ephemeral and recomputed on demand; they
/// are never written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionInstance {
    pub source_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub account_id: Uuid,
    #[serde(default)]
    pub category: Option<String>,
    pub description: String,
    pub is_instance: bool,
}

impl TransactionInstance {
    /// Identity used to de-duplicate instances across merged projections.
    pub fn identity(&self) -> (Uuid, NaiveDate) {
        (self.source_id, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_amount_normalizes_direction() {
        assert_eq!(signed_amount(TransactionKind::Expense, 25.0), -25.0);
        assert_eq!(signed_amount(TransactionKind::Expense, -25.0), -25.0);
        assert_eq!(signed_amount(TransactionKind::Income, -40.0), 40.0);
    }

    #[test]
    fn next_occurrence_skips_excluded_dates() {
        let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut rule = RecurrenceRule::new(Frequency::Weekly, anchor);
        rule.excluded_dates
            .insert(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());

        let next = rule
            .next_occurrence_on_or_after(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn next_occurrence_respects_end_date() {
        let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rule = RecurrenceRule::new(Frequency::Monthly, anchor)
            .until(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(
            rule.next_occurrence_on_or_after(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            rule.next_occurrence_on_or_after(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
            None
        );
    }
}
