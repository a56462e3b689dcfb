use tracing::{debug, trace};

use super::eval::SPF_PREFIX;
use crate::common::dns::{DnsResolver, LookupError};
use crate::common::domain;

/// Query the apex TXT records of `domain` and keep those starting with `v=spf1`.
///
/// An empty result means no SPF record is published. Resolver failures propagate.
pub async fn lookup_spf<R: DnsResolver>(
    resolver: &R,
    domain: &str,
) -> Result<Vec<String>, LookupError> {
    let name = domain::normalize(domain);
    debug!(domain = %name, "looking up SPF records");

    let txt_records = resolver.query_txt(&name).await?;
    let total = txt_records.len();

    let spf_records: Vec<String> = txt_records
        .into_iter()
        .filter(|txt| txt.starts_with(SPF_PREFIX))
        .collect();

    trace!(domain = %name, total, spf = spf_records.len(), "filtered TXT records");
    Ok(spf_records)
}
