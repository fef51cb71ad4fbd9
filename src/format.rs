// Display helpers for the dashboard page

use std::time::Duration;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Largest unit whose value stays below 1024, one decimal place; anything past GB is TB.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}

/// `H:MM:SS`, prefixed with `N day(s), ` once past 24 hours. Sub-second part is dropped.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let clock = format!("{}:{:02}:{:02}", hours, minutes, seconds);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pick_largest_unit_below_1024() {
        assert_eq!(format_bytes(500), "500.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(1023), "1023.0 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GB");
        assert_eq!(format_bytes(3 * 1024u64.pow(4)), "3.0 TB");
    }

    #[test]
    fn uptime_clock_and_days() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "0:00:05");
        assert_eq!(format_uptime(Duration::from_millis(3_723_900)), "1:02:03");
        assert_eq!(format_uptime(Duration::from_secs(86_400 + 61)), "1 day, 0:01:01");
        assert_eq!(format_uptime(Duration::from_secs(3 * 86_400)), "3 days, 0:00:00");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"gpt\" & 'co'</b>"),
            "&lt;b&gt;&quot;gpt&quot; &amp; &#39;co&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("claude-sonnet"), "claude-sonnet");
    }
}
