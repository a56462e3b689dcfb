use super::SpfResult;

/// Literal prefix identifying an SPF record. Matched case-sensitively.
pub const SPF_PREFIX: &str = "v=spf1";

/// Classify raw TXT values into an [`SpfResult`] and its summary sentence.
///
/// Every element counts toward the single-record check, SPF-shaped or not.
pub fn evaluate<S: AsRef<str>>(records: &[S]) -> (SpfResult, String) {
    let mut result = SpfResult {
        single_record: records.len() == 1,
        ..SpfResult::default()
    };

    for record in records.iter().map(AsRef::as_ref) {
        if !record.starts_with(SPF_PREFIX) {
            continue;
        }
        result.record_found = true;
        if record.contains("-all") {
            result.qualifier_hard_fail = true;
        }
    }

    result.all_tests_passed =
        result.record_found && result.single_record && result.qualifier_hard_fail;

    let summary = result.to_string();
    (result, summary)
}
