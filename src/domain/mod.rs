//! Record types supplied by the external store plus the shared calendar
//! primitives every component agrees on.

pub mod account;
pub mod budget;
pub mod common;
pub mod goal;
pub mod transaction;

pub use account::{allocations_by_account, Account, AccountKind};
pub use budget::Budget;
pub use common::{DateWindow, PeriodKey};
pub use goal::Goal;
pub use transaction::{
    signed_amount, RecurrenceRule, TransactionInstance, TransactionKind, TransactionSeries,
};
