//! Date parsing and text formatting helpers used by the console.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Parse a due date relative to the local calendar. See [`parse_due_from`].
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    parse_due_from(s, Local::now().date_naive())
}

/// Parse human-friendly due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w", "in 1m"
/// - weekday names, optionally prefixed with "this" or "next"
/// - "YYYY-MM-DD"
pub fn parse_due_from(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => return Some(start_end_of_week(today).1),
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return NaiveDate::from_ymd_opt(year, month, 1).map(|d| d - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        if let Some((idx, _)) = rest.char_indices().last() {
            let (num, unit) = rest.split_at(idx);
            if let Ok(n) = num.trim().parse::<i64>() {
                let offset = match unit {
                    "d" => Duration::try_days(n),
                    "w" => Duration::try_weeks(n),
                    // Months are approximated as 30 days.
                    "m" => n.checked_mul(30).and_then(Duration::try_days),
                    _ => return None,
                };
                // Offsets past the calendar range are treated as unparseable.
                return offset.and_then(|d| today.checked_add_signed(d));
            }
        }
    }

    let (next_week, day) = if let Some(day) = s.strip_prefix("next ") {
        (true, day)
    } else if let Some(day) = s.strip_prefix("this ") {
        (false, day)
    } else {
        (false, s.as_str())
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday() as i64;
        let ahead = (target + 7 - current) % 7;
        let ahead = if next_week { if ahead == 0 { 7 } else { ahead + 7 } } else { ahead };
        return Some(today + Duration::days(ahead));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    let idx = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(idx)
}

/// Calculate the start and end dates of the ISO week containing `today` (Monday to Sunday).
pub fn start_end_of_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => match (d - today).num_days() {
            0 => "today".into(),
            1 => "tomorrow".into(),
            n if n > 1 => format!("in {n}d"),
            n => format!("{}d late", -n),
        },
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Split comma-separated input into trimmed, non-empty entries.
pub fn split_list(inputs: &[String]) -> Vec<String> {
    inputs
        .iter()
        .flat_map(|raw| raw.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 2024-01-10 is a Wednesday.
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_relative_keywords() {
        let today = wednesday();
        assert_eq!(parse_due_from("today", today), Some(today));
        assert_eq!(parse_due_from("Tomorrow", today), ymd(2024, 1, 11));
        assert_eq!(parse_due_from("eow", today), ymd(2024, 1, 14));
        assert_eq!(parse_due_from("end of month", today), ymd(2024, 1, 31));
        assert_eq!(parse_due_from("in 3d", today), ymd(2024, 1, 13));
        assert_eq!(parse_due_from("in 2w", today), ymd(2024, 1, 24));
    }

    #[test]
    fn test_parse_weekdays() {
        let today = wednesday();
        assert_eq!(parse_due_from("friday", today), ymd(2024, 1, 12));
        assert_eq!(parse_due_from("wed", today), Some(today));
        assert_eq!(parse_due_from("next wednesday", today), ymd(2024, 1, 17));
        assert_eq!(parse_due_from("next mon", today), ymd(2024, 1, 22));
        assert_eq!(parse_due_from("this sunday", today), ymd(2024, 1, 14));
    }

    #[test]
    fn test_parse_iso_and_garbage() {
        assert_eq!(parse_due_from("2024-03-15", wednesday()), ymd(2024, 3, 15));
        assert_eq!(parse_due_from("someday", wednesday()), None);
        assert_eq!(parse_due_from("in xd", wednesday()), None);
    }

    #[test]
    fn test_parse_relative_offsets_out_of_range() {
        let today = wednesday();
        assert_eq!(parse_due_from("in 100000000d", today), None);
        assert_eq!(parse_due_from("in 999999999999999d", today), None);
        assert_eq!(parse_due_from("in 999999999999999w", today), None);
        assert_eq!(parse_due_from(&format!("in {}m", i64::MAX), today), None);
        assert_eq!(parse_due_from("in -3d", today), ymd(2024, 1, 7));
    }

    #[test]
    fn test_end_of_month_in_december() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(parse_due_from("eom", today), ymd(2024, 12, 31));
    }

    #[test]
    fn test_format_due_relative() {
        let today = wednesday();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(today), today), "today");
        assert_eq!(format_due_relative(ymd(2024, 1, 11), today), "tomorrow");
        assert_eq!(format_due_relative(ymd(2024, 1, 15), today), "in 5d");
        assert_eq!(format_due_relative(ymd(2024, 1, 8), today), "2d late");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Website Redesign", 8), "Website…");
    }

    #[test]
    fn test_split_list() {
        let input = vec!["Ann, Bo".to_string(), " ".to_string(), "Cy".to_string()];
        assert_eq!(split_list(&input), vec!["Ann", "Bo", "Cy"]);
    }
}
