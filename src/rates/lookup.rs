//! Advisory role rate lookup.
//!
//! The lookup asks a [`RateSource`] once, pulls the role rates out of its
//! free-text answer and falls back to the configured defaults on any
//! failure. The result is informational only and never feeds the AC4
//! tariff table.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RoleRateTable;

use super::source::RateSource;

/// Outcome of a rate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLookupResult {
    /// Rates by role.
    pub rates: RoleRateTable,
    /// Citations for the rates. Empty when the defaults were used.
    pub sources: Vec<String>,
    /// True if the source failed and `rates` are the defaults.
    pub fallback: bool,
}

/// Extracts role rates such as `Praça: R$ 26,47` from free text.
///
/// Labels match case-insensitively, the colon and the `R` of `R$` are
/// optional, and the decimal separator may be a comma or a dot. A role
/// whose value is missing or zero keeps its fallback rate.
///
/// # Example
///
/// ```
/// use ac4_engine::config::RoleRateTable;
/// use ac4_engine::rates::extract_role_rates;
/// use rust_decimal::Decimal;
///
/// let text = "Praça: R$ 27,10. Oficial: R$ 36.50. Oficial Superior R$ 47,00";
/// let rates = extract_role_rates(text, &RoleRateTable::default());
/// assert_eq!(rates.praca, Decimal::new(2710, 2));
/// assert_eq!(rates.oficial, Decimal::new(3650, 2));
/// assert_eq!(rates.oficial_superior, Decimal::new(4700, 2));
/// ```
pub fn extract_role_rates(text: &str, fallback: &RoleRateTable) -> RoleRateTable {
    let lower = text.to_lowercase();
    RoleRateTable {
        praca: amount_after(&lower, "praça")
            .or_else(|| amount_after(&lower, "praca"))
            .unwrap_or(fallback.praca),
        oficial: amount_after(&lower, "oficial").unwrap_or(fallback.oficial),
        oficial_superior: amount_after(&lower, "oficial superior")
            .unwrap_or(fallback.oficial_superior),
    }
}

/// First amount that directly follows an occurrence of `label`.
fn amount_after(text: &str, label: &str) -> Option<Decimal> {
    text.match_indices(label)
        .find_map(|(index, _)| parse_amount(&text[index + label.len()..]))
        .filter(|amount| !amount.is_zero())
}

/// Parses `[:] [R]$ <digits>(,|.)<digits>` at the start of `rest`.
fn parse_amount(rest: &str) -> Option<Decimal> {
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim_start();
    let rest = rest.strip_prefix('r').unwrap_or(rest);
    let rest = rest.strip_prefix('$')?.trim_start();

    let (units, rest) = split_digits(rest)?;
    let rest = rest.strip_prefix([',', '.'])?;
    let (cents, _) = split_digits(rest)?;

    Decimal::from_str(&format!("{}.{}", units, cents)).ok()
}

fn split_digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}

/// Asks the source once and extracts the role rates.
///
/// A source error or a response slower than `timeout` yields the defaults
/// with no sources. Nothing is retried.
pub async fn fetch_latest_rates(
    source: &dyn RateSource,
    defaults: RoleRateTable,
    timeout: Duration,
) -> RateLookupResult {
    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(Ok(report)) => {
            info!(sources = report.sources.len(), "Fetched role rates");
            RateLookupResult {
                rates: extract_role_rates(&report.text, &defaults),
                sources: report.sources,
                fallback: false,
            }
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Rate lookup failed, using default rates");
            fallback(defaults)
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "Rate lookup timed out, using default rates");
            fallback(defaults)
        }
    }
}

fn fallback(defaults: RoleRateTable) -> RateLookupResult {
    RateLookupResult {
        rates: defaults,
        sources: Vec::new(),
        fallback: true,
    }
}
