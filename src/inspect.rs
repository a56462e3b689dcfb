use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::common::dns::{self, DnsResolver, LookupError};
use crate::common::domain;
use crate::dkim::{self, DkimRecord};
use crate::dmarc::{self, DmarcResult};
use crate::spf::{self, SpfResult};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Record lookups whose failure aborts an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Mx,
    Spf,
    Dmarc,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Mx => write!(f, "MX"),
            RecordKind::Spf => write!(f, "SPF"),
            RecordKind::Dmarc => write!(f, "DMARC"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("no domain given")]
    EmptyDomain,
    #[error("error fetching {kind} records for {domain}: {source}")]
    Lookup {
        kind: RecordKind,
        domain: String,
        #[source]
        source: LookupError,
    },
}

// ---------------------------------------------------------------------------
// DomainReport
// ---------------------------------------------------------------------------

/// Everything learned about one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    pub domain: String,
    pub mx_records: Vec<String>,
    /// Apex TXT records starting with `v=spf1`.
    pub spf_records: Vec<String>,
    pub spf: SpfResult,
    pub spf_summary: String,
    /// All TXT records at `_dmarc.<domain>`.
    pub dmarc_records: Vec<String>,
    pub dmarc: DmarcResult,
    pub dmarc_summary: String,
    pub dkim_records: Vec<DkimRecord>,
}

impl DomainReport {
    pub fn dkim_present(&self) -> bool {
        dkim::is_present(&self.dkim_records)
    }
}

// ---------------------------------------------------------------------------
// Inspector
// ---------------------------------------------------------------------------

pub struct Inspector<R: DnsResolver> {
    resolver: R,
}

impl<R: DnsResolver> Inspector<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Full inspection: MX, SPF, DMARC, then DKIM.
    pub async fn inspect(&self, domain: &str) -> Result<DomainReport, InspectError> {
        let domain = domain::normalize(domain);
        if domain.is_empty() {
            return Err(InspectError::EmptyDomain);
        }
        let lookup_err = |kind: RecordKind| {
            let domain = domain.clone();
            move |source: LookupError| InspectError::Lookup { kind, domain, source }
        };

        info!(domain = %domain, "inspecting domain");

        // 1. MX
        let mx_records = dns::lookup_mx(&self.resolver, &domain)
            .await
            .map_err(lookup_err(RecordKind::Mx))?;

        // 2. SPF
        let spf_records = spf::lookup_spf(&self.resolver, &domain)
            .await
            .map_err(lookup_err(RecordKind::Spf))?;
        let (spf, spf_summary) = spf::evaluate(&spf_records);

        // 3. DMARC
        let dmarc_records = dmarc::lookup_dmarc(&self.resolver, &domain)
            .await
            .map_err(lookup_err(RecordKind::Dmarc))?;
        let (dmarc, dmarc_summary) = dmarc::evaluate(&dmarc_records);

        // 4. DKIM; per-selector failures are absorbed
        let dkim_records = dkim::lookup_dkim(&self.resolver, &domain).await;

        info!(
            domain = %domain,
            spf = spf.all_tests_passed,
            dmarc = dmarc.all_tests_passed,
            dkim = !dkim_records.is_empty(),
            "inspection complete"
        );

        Ok(DomainReport {
            domain,
            mx_records,
            spf_records,
            spf,
            spf_summary,
            dmarc_records,
            dmarc,
            dmarc_summary,
            dkim_records,
        })
    }
}

/// Inspect `domain` with a one-off [`Inspector`].
pub async fn inspect_domain<R: DnsResolver>(
    resolver: &R,
    domain: &str,
) -> Result<DomainReport, InspectError> {
    Inspector::new(resolver.clone()).inspect(domain).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::dns::MockResolver;

    fn strict_domain() -> MockResolver {
        MockResolver::new()
            .with_mx("example.com", vec!["mx1.example.com", "mx2.example.com"])
            .with_txt(
                "example.com",
                vec!["v=spf1 include:_spf.example.com -all", "google-site-verification=abc"],
            )
            .with_txt("_dmarc.example.com", vec!["v=DMARC1; p=reject; sp=reject; pct=100"])
            .with_txt("selector1._domainkey.example.com", vec!["v=DKIM1; k=rsa; p=MIGf"])
    }

    #[tokio::test]
    async fn inspect_strict_domain() {
        let report = inspect_domain(&strict_domain(), "example.com").await.unwrap();

        assert_eq!(report.domain, "example.com");
        assert_eq!(report.mx_records, vec!["mx1.example.com", "mx2.example.com"]);
        // Non-SPF apex records are filtered before evaluation.
        assert_eq!(report.spf_records, vec!["v=spf1 include:_spf.example.com -all"]);
        assert!(report.spf.all_tests_passed);
        assert!(report.dmarc.all_tests_passed);
        assert!(report.dkim_present());
        assert_eq!(report.spf_summary, report.spf.to_string());
        assert_eq!(report.dmarc_summary, report.dmarc.to_string());
    }

    #[tokio::test]
    async fn inspect_normalizes_domain() {
        let report = inspect_domain(&strict_domain(), "EXAMPLE.com.").await.unwrap();
        assert_eq!(report.domain, "example.com");
        assert!(report.spf.record_found);
    }

    #[tokio::test]
    async fn inspect_bare_domain() {
        let report = inspect_domain(&MockResolver::new(), "bare.example").await.unwrap();

        assert!(report.mx_records.is_empty());
        assert!(!report.spf.record_found);
        assert!(!report.dmarc.record_found);
        assert!(report.dmarc.pct_valid);
        assert!(!report.dkim_present());
    }

    #[tokio::test]
    async fn inspect_rejects_empty_domain() {
        let err = inspect_domain(&MockResolver::new(), "  ").await.unwrap_err();
        assert!(matches!(err, InspectError::EmptyDomain));
    }

    #[tokio::test]
    async fn mx_failure_propagates() {
        let resolver = strict_domain().with_mx_err("example.com", LookupError::Timeout);
        let err = inspect_domain(&resolver, "example.com").await.unwrap_err();
        match err {
            InspectError::Lookup { kind, domain, source } => {
                assert_eq!(kind, RecordKind::Mx);
                assert_eq!(domain, "example.com");
                assert_eq!(source, LookupError::Timeout);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn spf_failure_propagates() {
        let resolver = strict_domain().with_txt_err("example.com", LookupError::ServFail);
        let err = inspect_domain(&resolver, "example.com").await.unwrap_err();
        assert!(matches!(err, InspectError::Lookup { kind: RecordKind::Spf, .. }));
        assert_eq!(
            err.to_string(),
            "error fetching SPF records for example.com: SERVFAIL: server failure"
        );
    }

    #[tokio::test]
    async fn dmarc_failure_propagates() {
        let resolver = strict_domain().with_txt_err("_dmarc.example.com", LookupError::Refused);
        let err = inspect_domain(&resolver, "example.com").await.unwrap_err();
        assert!(matches!(err, InspectError::Lookup { kind: RecordKind::Dmarc, .. }));
    }

    #[tokio::test]
    async fn dkim_failure_is_absorbed() {
        let resolver = strict_domain()
            .with_txt_err("selector1._domainkey.example.com", LookupError::ServFail);
        let report = inspect_domain(&resolver, "example.com").await.unwrap();
        assert!(!report.dkim_present());
        assert!(report.spf.all_tests_passed);
    }

    #[tokio::test]
    async fn inspector_is_reusable() {
        let inspector = Inspector::new(strict_domain());
        let first = inspector.inspect("example.com").await.unwrap();
        let second = inspector.inspect("example.com").await.unwrap();
        assert_eq!(first, second);
    }
}
