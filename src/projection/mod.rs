//! Day-by-day balance simulation for single accounts, cross-account merges,
//! and hypothetical-purchase overlays.

pub mod aggregate;
pub mod engine;
pub mod what_if;

pub use aggregate::aggregate;
pub use engine::{project, ProjectedDay, Projection, ProtectionHorizon};
pub use what_if::{simulate, WhatIfOutcome, WhatIfRisk};
