//! Integer-list text encodings used by legacy columns.
//!
//! `contests.eligible_to` is stored as `"1,2"` and `submissions.choices` as
//! `"{1,2}"`. Nothing above the repositories sees either form.

/// Encode as a comma-separated list: `[1, 2]` -> `"1,2"`
pub fn encode_csv(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode as a braced list: `[1, 2]` -> `"{1,2}"`
pub fn encode_braced(values: &[i32]) -> String {
    format!("{{{}}}", encode_csv(values))
}

/// Decode either form. Whitespace and surrounding braces are tolerated;
/// entries that are not integers are logged and skipped.
pub fn decode_int_list(raw: &str) -> Vec<i32> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i32>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(entry = part, raw, "Skipping invalid integer list entry");
                None
            }
        })
        .collect()
}
