use super::DmarcResult;
use crate::common::tag;

/// Literal prefix identifying a DMARC record. Matched case-sensitively.
pub const DMARC_PREFIX: &str = "v=DMARC1";

const FULL_PCT: i64 = 100;

/// Classify raw TXT values into a [`DmarcResult`] and its summary sentence.
///
/// Each `v=DMARC1` record is scanned on its own and its findings are OR'd in:
/// a later record never clears a flag an earlier one set, and a `pct=` other
/// than 100 in any record fails the percentage check.
pub fn evaluate<S: AsRef<str>>(records: &[S]) -> (DmarcResult, String) {
    let mut result = DmarcResult {
        single_record: records.len() == 1,
        ..DmarcResult::default()
    };

    for record in records.iter().map(AsRef::as_ref) {
        if !record.starts_with(DMARC_PREFIX) {
            continue;
        }
        result.record_found = true;

        if record.contains("p=reject") {
            result.policy_reject = true;
        }
        if record.contains("sp=reject") {
            result.subdomain_policy_reject = true;
        }
        // Unparseable values keep the default.
        if let Some(pct) = tag::int_value(record, "pct=") {
            if pct != FULL_PCT {
                result.pct_valid = false;
            }
        }
    }

    result.all_tests_passed = result.record_found
        && result.single_record
        && result.policy_reject
        && result.subdomain_policy_reject
        && result.pct_valid;

    let summary = result.to_string();
    (result, summary)
}
