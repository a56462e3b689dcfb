//! Email-authentication posture checks for a domain: SPF, DMARC and DKIM.
//!
//! The evaluators in [`spf`] and [`dmarc`] are pure functions over TXT record
//! strings. DNS access goes through the [`common::dns::DnsResolver`] trait;
//! [`inspect`] ties lookups and evaluators together for one domain.

pub mod common;
pub mod config;
pub mod dkim;
pub mod dmarc;
pub mod inspect;
pub mod report;
pub mod spf;

pub use common::dns::{DnsResolver, HickoryResolver, LookupError, MockResolver};
pub use inspect::{inspect_domain, DomainReport, InspectError, Inspector};
