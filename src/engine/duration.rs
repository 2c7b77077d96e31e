// src/engine/duration.rs

/// Card duration text to whole seconds.
///
/// `"M:SS"` → `m * 60 + s`, otherwise a bare integer, otherwise 0.
/// 0 doubles as "unknown"; the matcher skips it.
pub fn parse_duration_secs(raw: &str) -> u32 {
    let t = raw.trim();
    if t.is_empty() {
        return 0;
    }

    if let Some((m, s)) = t.split_once(':') {
        return match (m.trim().parse::<u32>(), s.trim().parse::<u32>()) {
            (Ok(m), Ok(s)) => m.saturating_mul(60).saturating_add(s),
            _ => 0,
        };
    }

    t.parse::<u32>().unwrap_or(0)
}

/// Loaded media duration (seconds) as `M:SS`. Fractions are dropped.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return s!();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_seconds() {
        assert_eq!(parse_duration_secs("1:30"), 90);
        assert_eq!(parse_duration_secs("0:07"), 7);
        assert_eq!(parse_duration_secs(" 12:00 "), 720);
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_duration_secs("45"), 45);
    }

    #[test]
    fn unparseable_is_zero() {
        assert_eq!(parse_duration_secs(""), 0);
        assert_eq!(parse_duration_secs("abc"), 0);
        assert_eq!(parse_duration_secs("1:xx"), 0);
        assert_eq!(parse_duration_secs("1:02:03"), 0);
    }

    #[test]
    fn formats_loaded_duration() {
        assert_eq!(format_duration(61.9), "1:01");
        assert_eq!(format_duration(5.0), "0:05");
        assert_eq!(format_duration(0.0), "");
        assert_eq!(format_duration(f64::NAN), "");
    }
}
