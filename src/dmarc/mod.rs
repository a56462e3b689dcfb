//! DMARC posture: one `v=DMARC1` record rejecting for the domain and its
//! subdomains, applied to 100% of mail.
//!
//! Tags are found by substring search rather than parsed per RFC 7489, so a
//! record such as `v=DMARC1; p=none; np=reject` satisfies the `p=reject`
//! check. Keep it that way: the checklist's outcomes depend on it.

mod eval;
mod lookup;

pub use eval::{evaluate, DMARC_PREFIX};
pub use lookup::lookup_dmarc;

use std::fmt;

use serde::Serialize;

/// Outcome of the DMARC checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DmarcResult {
    pub record_found: bool,
    /// Computed from the length of the evaluated list, not its content.
    pub single_record: bool,
    pub policy_reject: bool,
    pub subdomain_policy_reject: bool,
    /// `true` unless some record carries a parseable `pct=` other than 100.
    pub pct_valid: bool,
    /// Conjunction of the five checks above.
    pub all_tests_passed: bool,
}

impl Default for DmarcResult {
    fn default() -> Self {
        Self {
            record_found: false,
            single_record: false,
            policy_reject: false,
            subdomain_policy_reject: false,
            pct_valid: true,
            all_tests_passed: false,
        }
    }
}

impl fmt::Display for DmarcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DMARC record found: {}, Single DMARC record: {}, Policy reject: {}, \
             Subdomain policy reject: {}, pct=100 or default: {}",
            self.record_found,
            self.single_record,
            self.policy_reject,
            self.subdomain_policy_reject,
            self.pct_valid
        )
    }
}
