// src/core/sanitize.rs

/// Collapse whitespace runs (incl. NBSP) to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Leading decimal number of a CSS-ish value: `"0px"` → 0, `"12.5em"` → 12.5.
pub fn leading_number(s: &str) -> Option<f64> {
    let t = s.trim();
    let end = t
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map_or(t.len(), |(i, _)| i);
    t[..end].parse::<f64>().ok()
}

/// Text ends in an ellipsis, optionally followed by a "more" style link text.
/// `"Great launch today..."`, `"Great launch… See more"`.
pub fn looks_truncated(s: &str) -> bool {
    let mut t = s.trim_end();
    let lc = t.to_ascii_lowercase();
    for tail in ["see more", "show more", "more"] {
        if lc.ends_with(tail) {
            t = t[..t.len() - tail.len()].trim_end();
            break;
        }
    }
    t.ends_with('…') || t.ends_with("...")
}
