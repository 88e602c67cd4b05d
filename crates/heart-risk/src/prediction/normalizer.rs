pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Reduces a label to its lowercase alphanumeric characters so that
/// `"ST-T Abnormality"`, `"st_t_abnormality"` and `"STTAbnormality"` compare equal.
pub(crate) fn compact_label(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Splits the option text used by the original form, e.g. `"Flat (1)"`, into its
/// label and the code carried in the trailing parentheses.
pub(crate) fn split_code_suffix(value: &str) -> Option<(&str, &str)> {
    let trimmed = value.trim_end();
    let without_close = trimmed.strip_suffix(')')?;
    let open = without_close.rfind('(')?;
    let label = without_close[..open].trim_end();
    let code = without_close[open + 1..].trim();
    if label.is_empty() || code.is_empty() {
        return None;
    }
    Some((label, code))
}
