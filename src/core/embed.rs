//! Streaming embeds and trailer selection.

use crate::models::media::{MediaKind, Video};
use crate::Error;

/// Trailer host accepted by the official-trailer filter.
pub const TRAILER_SITE: &str = "YouTube";

/// Trailer embed base URL.
const TRAILER_EMBED_URL: &str = "https://www.youtube.com/embed/";

/// Third-party streaming providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamingProvider {
    #[default]
    VidsrcCc,
    Videasy,
}

impl StreamingProvider {
    pub const ALL: [StreamingProvider; 2] = [StreamingProvider::VidsrcCc, StreamingProvider::Videasy];

    /// Provider name as shown in the selector.
    pub fn name(&self) -> &'static str {
        match self {
            StreamingProvider::VidsrcCc => "vidsrc.cc",
            StreamingProvider::Videasy => "player.videasy.net",
        }
    }

    /// Fill this provider's template with `kind` and `id`. No network access.
    pub fn embed_url(&self, kind: MediaKind, id: u64) -> String {
        match self {
            StreamingProvider::VidsrcCc => {
                format!("https://vidsrc.cc/v2/embed/{}/{}", kind.as_str(), id)
            }
            StreamingProvider::Videasy => {
                format!("https://player.videasy.net/{}/{}", kind.as_str(), id)
            }
        }
    }
}

impl std::fmt::Display for StreamingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for StreamingProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        StreamingProvider::ALL
            .into_iter()
            .find(|p| p.name() == s || p.name().split('.').next() == Some(s.as_str()))
            .ok_or(Error::UnknownProvider(s))
    }
}

/// Whether `video` is an official trailer: hosted on the trailer site, typed
/// "Trailer", and named with "official trailer" (any case).
pub fn is_official_trailer(video: &Video) -> bool {
    video.site == TRAILER_SITE
        && video.video_type == "Trailer"
        && video.name.to_lowercase().contains("official trailer")
}

/// Keep only official trailers, in their original order.
pub fn official_trailers(videos: Vec<Video>) -> Vec<Video> {
    videos.into_iter().filter(is_official_trailer).collect()
}

/// Autoplaying embed URL for a trailer key.
pub fn trailer_embed_url(key: &str) -> String {
    format!("{}{}?autoplay=1", TRAILER_EMBED_URL, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(site: &str, video_type: &str, name: &str, key: &str) -> Video {
        Video {
            site: site.to_string(),
            video_type: video_type.to_string(),
            name: name.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_official_trailer_filter() {
        let videos = vec![
            video("YouTube", "Teaser", "Official Trailer Teaser", "a"),
            video("Vimeo", "Trailer", "Official Trailer", "b"),
            video("YouTube", "Trailer", "Trailer 2", "c"),
            video("YouTube", "Trailer", "OFFICIAL TRAILER #2", "d"),
            video("YouTube", "Trailer", "The Batman - Official Trailer", "e"),
        ];

        let keys: Vec<_> = official_trailers(videos)
            .into_iter()
            .map(|v| v.key)
            .collect();
        assert_eq!(keys, vec!["d", "e"]);
    }

    #[test]
    fn test_no_qualifying_trailers() {
        let videos = vec![video("YouTube", "Clip", "Official Trailer", "a")];
        assert!(official_trailers(videos).is_empty());
    }

    #[test]
    fn test_embed_templates() {
        assert_eq!(
            StreamingProvider::VidsrcCc.embed_url(MediaKind::Tv, 100),
            "https://vidsrc.cc/v2/embed/tv/100"
        );
        assert_eq!(
            StreamingProvider::Videasy.embed_url(MediaKind::Movie, 27205),
            "https://player.videasy.net/movie/27205"
        );
        assert_eq!(
            trailer_embed_url("EXeTwQWrcwY"),
            "https://www.youtube.com/embed/EXeTwQWrcwY?autoplay=1"
        );
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "vidsrc.cc".parse::<StreamingProvider>().unwrap(),
            StreamingProvider::VidsrcCc
        );
        assert_eq!(
            "player.videasy.net".parse::<StreamingProvider>().unwrap(),
            StreamingProvider::Videasy
        );
        assert_eq!(
            "vidsrc".parse::<StreamingProvider>().unwrap(),
            StreamingProvider::VidsrcCc
        );
        assert!("vidsrc.me".parse::<StreamingProvider>().is_err());
    }
}
