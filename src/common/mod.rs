//! Infrastructure shared by the SPF, DMARC and DKIM checks.

pub mod dns;
pub mod domain;
pub mod tag;
