//! Display helpers for catalog values.

use chrono::NaiveDate;

const STAR_FULL: char = '★';
const STAR_HALF: char = '⯪';
const STAR_EMPTY: char = '☆';

/// `142` → `2h 22m`
pub fn runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Cut to `max_chars` characters and append `...` when anything was cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Five-star string for a 0-5 score; a remainder of .5 or more shows a half star
pub fn stars(score: f64) -> String {
    let score = if score.is_finite() { score.clamp(0.0, 5.0) } else { 0.0 };
    let full = score.floor() as usize;
    let half = score.fract() >= 0.5;
    let empty = 5 - full - usize::from(half);

    let mut out = String::with_capacity(5 * 3);
    out.extend(std::iter::repeat(STAR_FULL).take(full));
    if half {
        out.push(STAR_HALF);
    }
    out.extend(std::iter::repeat(STAR_EMPTY).take(empty));
    out
}

/// Catalog vote averages are out of 10
pub fn vote_stars(vote_average: f64) -> String {
    stars(vote_average / 2.0)
}

/// `1234567` → `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole US dollars, e.g. `$63,000,000`
pub fn currency(amount: u64) -> String {
    format!("${}", thousands(amount))
}

/// `1999-10-15` → `October 15, 1999`; unknown dates read "Coming Soon"
pub fn long_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => "Coming Soon".to_string(),
    }
}

/// A 0-10 vote average as a percentage: `8.4` → `84%`
pub fn percentage(vote_average: f64) -> String {
    format!("{}%", (vote_average * 10.0).round() as i64)
}

/// Playback progress fraction: `0.25` → `25%`
pub fn progress(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime() {
        assert_eq!(runtime(142), "2h 22m");
        assert_eq!(runtime(45), "0h 45m");
        assert_eq!(runtime(120), "2h 0m");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("A thief and a cop", 7), "A thief...");
        assert_eq!(truncate("Amélie Poulain", 6), "Amélie...");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(3.5), "★★★⯪☆");
        assert_eq!(stars(3.4), "★★★☆☆");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(9.0), "★★★★★");
        assert_eq!(vote_stars(8.3), "★★★★☆");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(currency(63_000_000), "$63,000,000");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(1999, 10, 15);
        assert_eq!(long_date(date), "October 15, 1999");
        assert_eq!(long_date(None), "Coming Soon");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percentage(8.4), "84%");
        assert_eq!(percentage(0.0), "0%");
        assert_eq!(progress(0.256), "26%");
    }
}
