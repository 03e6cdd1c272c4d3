use uuid::Uuid;

use crate::domain::TransactionSeries;

/// Amount wiggle room, in currency units, under which two entries with the
/// same description look like one repeating bill.
const AMOUNT_TOLERANCE: f64 = 1.0;

/// Flags one-time entries that look like an undeclared recurring bill:
/// another one-time entry shares the description with a near-identical
/// amount. Callers surface these as "make this recurring?" suggestions.
pub fn recurring_candidates(series: &[TransactionSeries]) -> Vec<Uuid> {
    let mut candidates = Vec::new();
    for entry in series.iter().filter(|s| !s.is_recurring()) {
        let repeats = series.iter().any(|other| {
            other.id != entry.id
                && !other.is_recurring()
                && other.description == entry.description
                && (other.amount - entry.amount).abs() < AMOUNT_TOLERANCE
        });
        if repeats {
            candidates.push(entry.id);
        }
    }
    candidates
}
