//! External rate lookup.
//!
//! This module contains the [`RateSource`] seam and the advisory lookup that
//! extracts role rates from a source's answer, with fallback to the
//! configured defaults.

mod lookup;
mod source;

pub use lookup::{extract_role_rates, fetch_latest_rates, RateLookupResult};
pub use source::{RateReport, RateSource, StaticRateSource};
