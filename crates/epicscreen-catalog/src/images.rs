use epicscreen_models::Video;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

pub const POSTER_PLACEHOLDER: &str = "/abstract-movie-poster.png";
pub const BACKDROP_PLACEHOLDER: &str = "/movie-backdrop.png";
pub const PROFILE_PLACEHOLDER: &str = "/diverse-group.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PosterSize {
    W200,
    W300,
    W400,
    #[default]
    W500,
    W780,
    W1280,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W200 => "w200",
            PosterSize::W300 => "w300",
            PosterSize::W400 => "w400",
            PosterSize::W500 => "w500",
            PosterSize::W780 => "w780",
            PosterSize::W1280 => "w1280",
            PosterSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackdropSize {
    W300,
    W780,
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackdropSize::W300 => "w300",
            BackdropSize::W780 => "w780",
            BackdropSize::W1280 => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSize {
    W45,
    #[default]
    W185,
    H632,
    Original,
}

impl ProfileSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSize::W45 => "w45",
            ProfileSize::W185 => "w185",
            ProfileSize::H632 => "h632",
            ProfileSize::Original => "original",
        }
    }
}

/// Builds image URLs from the relative paths in catalog records, falling
/// back to local placeholders when a record has no image
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn poster(&self, path: Option<&str>, size: PosterSize) -> String {
        self.build(path, size.as_str(), POSTER_PLACEHOLDER)
    }

    pub fn backdrop(&self, path: Option<&str>, size: BackdropSize) -> String {
        self.build(path, size.as_str(), BACKDROP_PLACEHOLDER)
    }

    pub fn profile(&self, path: Option<&str>, size: ProfileSize) -> String {
        self.build(path, size.as_str(), PROFILE_PLACEHOLDER)
    }

    fn build(&self, path: Option<&str>, size: &str, placeholder: &str) -> String {
        match path {
            Some(path) if !path.is_empty() => format!("{}/{}{}", self.base_url, size, path),
            _ => placeholder.to_string(),
        }
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

/// First official YouTube trailer
pub fn trailer_url(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer" && v.official)
        .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, video_type: &str, official: bool) -> Video {
        Video {
            id: key.to_string(),
            iso_639_1: "en".to_string(),
            iso_3166_1: "US".to_string(),
            key: key.to_string(),
            name: String::new(),
            official,
            published_at: String::new(),
            site: site.to_string(),
            size: 1080,
            video_type: video_type.to_string(),
        }
    }

    #[test]
    fn test_poster_url() {
        let images = ImageUrls::default();
        assert_eq!(
            images.poster(Some("/abc.jpg"), PosterSize::default()),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(images.poster(None, PosterSize::W200), POSTER_PLACEHOLDER);
        assert_eq!(images.poster(Some(""), PosterSize::W200), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_backdrop_and_profile_urls() {
        let images = ImageUrls::new("https://cdn.example.com/t/p/");
        assert_eq!(
            images.backdrop(Some("/b.jpg"), BackdropSize::default()),
            "https://cdn.example.com/t/p/w1280/b.jpg"
        );
        assert_eq!(images.backdrop(None, BackdropSize::W780), BACKDROP_PLACEHOLDER);
        assert_eq!(
            images.profile(Some("/p.jpg"), ProfileSize::H632),
            "https://cdn.example.com/t/p/h632/p.jpg"
        );
        assert_eq!(images.profile(None, ProfileSize::default()), PROFILE_PLACEHOLDER);
    }

    #[test]
    fn test_trailer_url_picks_official_youtube_trailer() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", true),
            video("fan", "YouTube", "Trailer", false),
            video("vimeo", "Vimeo", "Trailer", true),
            video("real", "YouTube", "Trailer", true),
        ];
        assert_eq!(trailer_url(&videos), Some("https://www.youtube.com/watch?v=real".to_string()));
        assert_eq!(trailer_url(&videos[..3]), None);
    }
}
