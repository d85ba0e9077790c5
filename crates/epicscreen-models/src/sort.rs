use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use crate::watchlist::WatchlistItem;

/// Display orders offered on the watchlist page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistSort {
    /// Most recently added first
    #[default]
    Added,
    /// Title A-Z, case-insensitive
    Title,
    /// Highest rated first
    Rating,
    /// Newest release first; titles without a release date go last
    Release,
}

impl WatchlistSort {
    pub const ALL: [WatchlistSort; 4] = [
        WatchlistSort::Added,
        WatchlistSort::Title,
        WatchlistSort::Rating,
        WatchlistSort::Release,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WatchlistSort::Added => "Recently Added",
            WatchlistSort::Title => "Title A-Z",
            WatchlistSort::Rating => "Highest Rated",
            WatchlistSort::Release => "Release Date",
        }
    }

    /// Stable sort, so equal keys keep their stored order
    pub fn sort_items(&self, items: &mut [WatchlistItem]) {
        match self {
            WatchlistSort::Added => items.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
            WatchlistSort::Title => {
                items.sort_by_cached_key(|item| item.title.to_lowercase());
            }
            WatchlistSort::Rating => items.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average)),
            WatchlistSort::Release => items.sort_by(|a, b| {
                match (parse_release(&a.release_date), parse_release(&b.release_date)) {
                    (Some(a), Some(b)) => b.cmp(&a),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }),
        }
    }
}

fn parse_release(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

impl fmt::Display for WatchlistSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatchlistSort::Added => "added",
            WatchlistSort::Title => "title",
            WatchlistSort::Rating => "rating",
            WatchlistSort::Release => "release",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for WatchlistSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "added" | "recent" => Ok(WatchlistSort::Added),
            "title" => Ok(WatchlistSort::Title),
            "rating" => Ok(WatchlistSort::Rating),
            "release" | "release-date" | "release_date" => Ok(WatchlistSort::Release),
            _ => Err(format!("Invalid sort order: {}. Use 'added', 'title', 'rating', or 'release'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn item(id: u64, title: &str, rating: f64, release: &str, minutes_ago: i64) -> WatchlistItem {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        WatchlistItem {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: release.to_string(),
            vote_average: rating,
            added_at: base - Duration::minutes(minutes_ago),
        }
    }

    fn ids(items: &[WatchlistItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    fn sample() -> Vec<WatchlistItem> {
        vec![
            item(1, "blade Runner", 8.0, "1982-06-25", 30),
            item(2, "Alien", 8.5, "", 10),
            item(3, "Arrival", 7.9, "2016-11-11", 20),
        ]
    }

    #[test]
    fn test_sort_added() {
        let mut items = sample();
        WatchlistSort::Added.sort_items(&mut items);
        assert_eq!(ids(&items), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_title_ignores_case() {
        let mut items = sample();
        WatchlistSort::Title.sort_items(&mut items);
        assert_eq!(ids(&items), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_rating() {
        let mut items = sample();
        WatchlistSort::Rating.sort_items(&mut items);
        assert_eq!(ids(&items), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_release_missing_dates_last() {
        let mut items = sample();
        WatchlistSort::Release.sort_items(&mut items);
        assert_eq!(ids(&items), vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_and_display() {
        for sort in WatchlistSort::ALL {
            assert_eq!(sort.to_string().parse::<WatchlistSort>().unwrap(), sort);
        }
        assert_eq!("Release-Date".parse::<WatchlistSort>().unwrap(), WatchlistSort::Release);
        assert!("popularity".parse::<WatchlistSort>().is_err());
    }
}
