use tracing::{debug, trace};

use crate::common::dns::{DnsResolver, LookupError};
use crate::common::domain;

/// Query every TXT record at `_dmarc.<domain>`.
///
/// Records are returned unfiltered so the single-record check sees stray
/// entries published at the DMARC name. No organizational-domain fallback.
pub async fn lookup_dmarc<R: DnsResolver>(
    resolver: &R,
    domain: &str,
) -> Result<Vec<String>, LookupError> {
    let name = domain::dmarc_name(domain);
    debug!(name = %name, "looking up DMARC records");

    let records = resolver.query_txt(&name).await?;
    trace!(name = %name, count = records.len(), "DMARC TXT records");
    Ok(records)
}
