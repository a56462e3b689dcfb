//! SPF posture: is there exactly one `v=spf1` record and does it end in `-all`.
//!
//! This is a fixed checklist over raw TXT strings, not RFC 7208 evaluation.

mod eval;
mod lookup;

pub use eval::{evaluate, SPF_PREFIX};
pub use lookup::lookup_spf;

use std::fmt;

use serde::Serialize;

/// Outcome of the SPF checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpfResult {
    pub record_found: bool,
    /// Computed from the length of the evaluated list, not its content.
    pub single_record: bool,
    pub qualifier_hard_fail: bool,
    /// `record_found && single_record && qualifier_hard_fail`
    pub all_tests_passed: bool,
}

impl fmt::Display for SpfResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SPF record found: {}, Single SPF record: {}, Hard fail qualifier: {}",
            self.record_found, self.single_record, self.qualifier_hard_fail
        )
    }
}
