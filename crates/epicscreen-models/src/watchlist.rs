use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::Movie;

/// A saved reference to a movie.
///
/// Everything except `added_at` is a frozen copy of the catalog record taken
/// when the movie was added; it is never refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistItem {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    #[serde(rename = "addedAt", with = "iso_millis")]
    pub added_at: DateTime<Utc>,
}

impl WatchlistItem {
    /// Snapshot `movie` at `added_at` (truncated to milliseconds, the precision
    /// the timestamp is persisted with)
    pub fn from_movie(movie: &Movie, added_at: DateTime<Utc>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            added_at: added_at.trunc_subsecs(3),
        }
    }

    pub fn release_year(&self) -> Option<u32> {
        self.release_date.get(..4).and_then(|y| y.parse().ok())
    }
}

/// `2024-05-01T12:00:00.000Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn movie() -> Movie {
        Movie {
            id: 550,
            title: "Fight Club".to_string(),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
            release_date: "1999-10-15".to_string(),
            vote_average: 8.4,
            overview: "An insomniac office worker...".to_string(),
            ..Movie::default()
        }
    }

    #[test]
    fn test_from_movie_snapshots_fields() {
        let added = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let item = WatchlistItem::from_movie(&movie(), added);

        assert_eq!(item.id, 550);
        assert_eq!(item.title, "Fight Club");
        assert_eq!(item.poster_path.as_deref(), Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"));
        assert_eq!(item.release_date, "1999-10-15");
        assert_eq!(item.vote_average, 8.4);
        assert_eq!(item.added_at, added);
        assert_eq!(item.release_year(), Some(1999));
    }

    #[test]
    fn test_from_movie_truncates_to_millis() {
        let added = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let item = WatchlistItem::from_movie(&movie(), added);
        assert_eq!(item.added_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_persisted_field_names() {
        let added = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(WatchlistItem::from_movie(&movie(), added)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 550,
                "title": "Fight Club",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "release_date": "1999-10-15",
                "vote_average": 8.4,
                "addedAt": "2024-05-01T12:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_reads_browser_written_entry() {
        let item: WatchlistItem = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "poster_path": null,
            "release_date": "",
            "vote_average": 7.5,
            "addedAt": "2025-09-14T08:30:12.345Z"
        }))
        .unwrap();

        assert_eq!(item.poster_path, None);
        assert_eq!(item.added_at.timestamp_subsec_millis(), 345);
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let result = serde_json::from_value::<WatchlistItem>(json!({
            "id": 1,
            "title": "A",
            "poster_path": null,
            "release_date": "",
            "vote_average": 7.5,
            "addedAt": "yesterday"
        }));
        assert!(result.is_err());
    }
}
