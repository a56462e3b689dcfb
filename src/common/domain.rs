/// Normalize a domain: trim, lowercase, strip trailing dot.
pub fn normalize(domain: &str) -> String {
    let d = domain.trim().to_ascii_lowercase();
    d.strip_suffix('.').unwrap_or(&d).to_string()
}

/// Owner name of a domain's DMARC policy record.
pub fn dmarc_name(domain: &str) -> String {
    format!("_dmarc.{}", normalize(domain))
}

/// Owner name of a DKIM key record for `selector`.
pub fn dkim_name(selector: &str, domain: &str) -> String {
    format!("{}._domainkey.{}", selector, normalize(domain))
}
