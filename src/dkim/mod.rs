//! DKIM presence check.
//!
//! Only a fixed list of common selectors is tried, so a domain signing with
//! any other selector is reported as having no DKIM key. Key contents are not
//! inspected.

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::dns::DnsResolver;
use crate::common::domain;

/// Selectors queried under `<selector>._domainkey.<domain>`.
pub const SELECTORS: [&str; 3] = ["default", "selector1", "selector2"];

/// A TXT record published under a DKIM selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DkimRecord {
    pub selector: String,
    pub record: String,
}

/// Query every selector in [`SELECTORS`] and collect the TXT records found,
/// in selector order.
///
/// A failed lookup is logged and treated as an absent selector; this never
/// returns an error.
pub async fn lookup_dkim<R: DnsResolver>(resolver: &R, domain: &str) -> Vec<DkimRecord> {
    let mut records = Vec::new();

    for selector in SELECTORS {
        let name = domain::dkim_name(selector, domain);
        let txt_records = match resolver.query_txt(&name).await {
            Ok(txt_records) => txt_records,
            Err(e) => {
                debug!(name = %name, error = %e, "DKIM lookup failed, skipping selector");
                continue;
            }
        };

        trace!(name = %name, count = txt_records.len(), "DKIM TXT records");
        records.extend(txt_records.into_iter().map(|record| DkimRecord {
            selector: selector.to_string(),
            record,
        }));
    }

    records
}

/// Whether any DKIM record was found.
pub fn is_present(records: &[DkimRecord]) -> bool {
    !records.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::dns::{LookupError, MockResolver};

    const KEY: &str = "v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQC";

    #[tokio::test]
    async fn no_selectors_resolve() {
        let resolver = MockResolver::new();
        let records = lookup_dkim(&resolver, "example.com").await;
        assert!(records.is_empty());
        assert!(!is_present(&records));
    }

    #[tokio::test]
    async fn collects_records_in_selector_order() {
        let resolver = MockResolver::new()
            .with_txt("selector2._domainkey.example.com", vec![KEY])
            .with_txt("default._domainkey.example.com", vec![KEY, "second"]);

        let records = lookup_dkim(&resolver, "example.com").await;
        let selectors: Vec<&str> = records.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["default", "default", "selector2"]);
        assert_eq!(records[1].record, "second");
        assert!(is_present(&records));
    }

    #[tokio::test]
    async fn failed_selector_is_skipped() {
        let resolver = MockResolver::new()
            .with_txt_err("default._domainkey.example.com", LookupError::ServFail)
            .with_txt("selector1._domainkey.example.com", vec![KEY])
            .with_txt_err("selector2._domainkey.example.com", LookupError::Timeout);

        let records = lookup_dkim(&resolver, "example.com").await;
        assert_eq!(
            records,
            vec![DkimRecord {
                selector: "selector1".into(),
                record: KEY.into(),
            }]
        );
    }

    #[tokio::test]
    async fn all_selectors_failing_is_empty() {
        let mut resolver = MockResolver::new();
        for selector in SELECTORS {
            resolver = resolver.with_txt_err(
                &format!("{selector}._domainkey.example.com"),
                LookupError::Refused,
            );
        }
        assert!(lookup_dkim(&resolver, "example.com").await.is_empty());
    }

    #[tokio::test]
    async fn other_selectors_are_not_queried() {
        let resolver = MockResolver::new().with_txt("google._domainkey.example.com", vec![KEY]);
        assert!(lookup_dkim(&resolver, "example.com").await.is_empty());
    }
}
