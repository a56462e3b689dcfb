/// Raw value following the first occurrence of `tag` in `record`, up to the
/// next `;` or space. `tag` includes its `=`, e.g. `"pct="`.
///
/// This is a substring scan, not a tag-list parser: `tag` may match inside a
/// longer tag name.
pub fn raw_value<'a>(record: &'a str, tag: &str) -> Option<&'a str> {
    let start = record.find(tag)? + tag.len();
    let rest = &record[start..];
    let end = rest.find([';', ' ']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Integer value of `tag`, or `None` when the tag is absent or its value is
/// not a (optionally signed) decimal integer.
pub fn int_value(record: &str, tag: &str) -> Option<i64> {
    raw_value(record, tag)?.parse().ok()
}
