//! Display fields derived from issues and comments.

use chrono::{DateTime, Utc};

/// Characters of body shown on a post card.
pub const PREVIEW_CHARS: usize = 150;

/// Labels shown on a post card before collapsing into "+N more".
pub const MAX_CARD_LABELS: usize = 3;

/// Long date for the post header, e.g. "March 4, 2024".
pub fn long_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Card preview: the first 150 characters of the body, "..." when cut.
///
/// `None` for an empty body so the caller can show its own placeholder.
pub fn preview(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        Some(format!("{}...", head))
    } else {
        Some(head)
    }
}

/// Avatar fallback: the first two characters of the login, upper-cased.
pub fn initials(login: &str) -> String {
    login.chars().take(2).collect::<String>().to_uppercase()
}

/// The labels to show on a card, plus how many were hidden.
pub fn card_labels<'a, I>(names: I) -> (Vec<&'a str>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let all: Vec<&str> = names.into_iter().collect();
    let hidden = all.len().saturating_sub(MAX_CARD_LABELS);
    (all.into_iter().take(MAX_CARD_LABELS).collect(), hidden)
}

/// Human distance between `then` and `now`, e.g. "3 days ago" or "in about 1 hour".
///
/// Uses the same buckets as the web reader this replaces, so "about 2 hours"
/// and "over 1 year" read the same in both.
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *then).num_seconds();
    let distance = distance(seconds.unsigned_abs());
    if seconds >= 0 {
        format!("{} ago", distance)
    } else {
        format!("in {}", distance)
    }
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

fn distance(seconds: u64) -> String {
    // Round to the nearest minute first; all buckets are minute based.
    let minutes = (seconds + 30) / MINUTE;

    if seconds < 30 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return plural(minutes.max(1), "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < 24 * 60 {
        let hours = (minutes + 30) / 60;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 42 * 60 {
        return "1 day".to_string();
    }
    if minutes < 30 * 24 * 60 {
        let days = (seconds + DAY / 2) / DAY;
        return plural(days, "day");
    }
    if minutes < 45 * 24 * 60 {
        return "about 1 month".to_string();
    }
    if minutes < 60 * 24 * 60 {
        return "about 2 months".to_string();
    }
    if seconds < YEAR {
        let months = ((seconds + MONTH / 2) / MONTH).clamp(2, 12);
        return plural(months, "month");
    }

    let years = seconds / YEAR;
    let remainder_months = (seconds % YEAR) / MONTH;
    if remainder_months < 3 {
        format!("about {}", plural(years, "year"))
    } else if remainder_months < 9 {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        relative_time(&(now() - d), &now())
    }

    #[test]
    fn test_long_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 23, 0, 0).unwrap();
        assert_eq!(long_date(&at), "March 4, 2024");
    }

    #[test]
    fn test_preview_short_body_unchanged() {
        assert_eq!(preview("hello").as_deref(), Some("hello"));
        assert_eq!(preview(""), None);
    }

    #[test]
    fn test_preview_truncates_at_150_chars() {
        let body = "é".repeat(200);
        let p = preview(&body).unwrap();
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 153);
    }

    #[test]
    fn test_preview_exactly_150_is_not_cut() {
        let body = "a".repeat(150);
        assert_eq!(preview(&body).unwrap(), body);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("octocat"), "OC");
        assert_eq!(initials("a"), "A");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_card_labels_collapse() {
        let (shown, hidden) = card_labels(["a", "b", "c", "d", "e"]);
        assert_eq!(shown, vec!["a", "b", "c"]);
        assert_eq!(hidden, 2);

        let (shown, hidden) = card_labels(["a"]);
        assert_eq!(shown, vec!["a"]);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(3)), "about 3 hours ago");
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(40)), "about 1 month ago");
        assert_eq!(ago(Duration::days(50)), "about 2 months ago");
        assert_eq!(ago(Duration::days(120)), "4 months ago");
        assert_eq!(ago(Duration::days(380)), "about 1 year ago");
        assert_eq!(ago(Duration::days(365 + 180)), "over 1 year ago");
        assert_eq!(ago(Duration::days(365 + 300)), "almost 2 years ago");
    }

    #[test]
    fn test_relative_time_future() {
        let then = now() + Duration::minutes(5);
        assert_eq!(relative_time(&then, &now()), "in 5 minutes");
    }
}
