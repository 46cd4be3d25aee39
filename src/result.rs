use crate::tables::{DomainRecord, SummaryRecord};
use crate::{HmmerError, Result};

/// Tables parsed from one completed scan or search
///
/// A table that was not requested is absent, never empty. Check with
/// [`has_summary`](Self::has_summary) / [`has_domain`](Self::has_domain)
/// before reading it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultBundle {
    summary: Option<Vec<SummaryRecord>>,
    domain: Option<Vec<DomainRecord>>,
}

impl ResultBundle {
    pub fn new(summary: Option<Vec<SummaryRecord>>, domain: Option<Vec<DomainRecord>>) -> Self {
        Self { summary, domain }
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    pub fn summary(&self) -> Result<&[SummaryRecord]> {
        self.summary.as_deref().ok_or_else(|| {
            HmmerError::ContractViolation("summary table was not captured".to_string())
        })
    }

    pub fn domain(&self) -> Result<&[DomainRecord]> {
        self.domain.as_deref().ok_or_else(|| {
            HmmerError::ContractViolation("domain table was not captured".to_string())
        })
    }

    pub fn into_parts(self) -> (Option<Vec<SummaryRecord>>, Option<Vec<DomainRecord>>) {
        (self.summary, self.domain)
    }
}
