//! Normalization of free-text model output into bullet lines.

use xt_core::SummaryResult;

const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// Strip one leading marker, either a bullet glyph or a number followed by
/// a period, plus the whitespace after it.
fn strip_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(&BULLET_MARKERS[..]) {
        return rest.trim_start();
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }
    line
}

/// Split raw text into trimmed, marker-free, non-empty lines.
pub fn parse_bullets(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| strip_marker(line.trim()).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse bullets, falling back to the whole trimmed text when no line survives.
pub fn parse_summary(raw: &str) -> SummaryResult {
    let bullets = parse_bullets(raw);
    if bullets.is_empty() {
        return SummaryResult {
            bullets: vec![raw.trim().to_string()],
        };
    }
    SummaryResult { bullets }
}
