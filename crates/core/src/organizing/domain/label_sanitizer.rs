use crate::shared::constants::UNNAMED_DIR;

/// Turns a label into a directory name.
///
/// Letters, digits, spaces, underscores and hyphens are kept; every other
/// character becomes `_`. Surrounding whitespace is trimmed. A label with
/// nothing usable becomes `unnamed`.
pub fn sanitize_label(label: &str) -> String {
    let mut kept_any = false;
    let safe: String = label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                kept_any = true;
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = safe.trim();
    if !kept_any || trimmed.is_empty() {
        UNNAMED_DIR.to_string()
    } else {
        trimmed.to_string()
    }
}
