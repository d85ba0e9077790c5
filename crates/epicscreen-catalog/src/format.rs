use chrono::NaiveDate;

/// `125` -> `"2h 5m"`, `45` -> `"45m"`
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let remaining = minutes % 60;

    if hours == 0 {
        format!("{}m", remaining)
    } else {
        format!("{}h {}m", hours, remaining)
    }
}

/// `"2020-01-15"` -> `"January 15, 2020"`. Unparseable input is returned as-is.
pub fn format_release_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// One decimal place, the way ratings are shown on cards
pub fn format_rating(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(0), "0m");
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(60), "1h 0m");
        assert_eq!(format_runtime(125), "2h 5m");
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("2020-01-15"), "January 15, 2020");
        assert_eq!(format_release_date("1999-10-05"), "October 5, 1999");
        assert_eq!(format_release_date(""), "");
        assert_eq!(format_release_date("soon"), "soon");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(7.456), "7.5");
        assert_eq!(format_rating(0.0), "0.0");
    }
}
