//! Text normalization shared by every matching step.

/// Lower-cases `text`, replaces every character that is not a letter, digit
/// or whitespace with a space, collapses whitespace runs and trims.
///
/// Letter and digit classes are Unicode-aware, so Hangul survives.
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` if `text` contains a precomposed Hangul syllable.
#[must_use]
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}
