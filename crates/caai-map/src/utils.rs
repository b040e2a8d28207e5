//! Text normalization for header matching.

/// Normalizes header text for comparison: trims, lowercases, keeps
/// alphanumerics and Hebrew letters, collapses everything else to single
/// spaces.
pub fn normalize_header(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let lowered = ch.to_lowercase().next().unwrap_or(ch);
        if lowered.is_alphanumeric() || is_hebrew(lowered) {
            cleaned.push(lowered);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hebrew(ch: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&ch)
}
