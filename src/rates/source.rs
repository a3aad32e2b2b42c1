//! Rate source abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Free-text answer from a rate source plus the citations it was based on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateReport {
    /// Narrative text mentioning role rates.
    pub text: String,
    /// Source URLs.
    pub sources: Vec<String>,
}

/// An external collaborator reporting the current role rates.
///
/// Implementations typically call a search or language service over the
/// network. Failures are returned, never retried here.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches one report.
    async fn fetch(&self) -> EngineResult<RateReport>;
}

/// A source that always answers with the same report.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    report: RateReport,
}

impl StaticRateSource {
    /// Creates a source answering with `report`.
    pub fn new(report: RateReport) -> Self {
        Self { report }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self) -> EngineResult<RateReport> {
        Ok(self.report.clone())
    }
}
