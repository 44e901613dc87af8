//! Domain types for the Kodi library, as returned by the JSON-RPC API.
//!
//! Field names follow the wire schema. The server owns that schema; this
//! client only selects which properties to request per entity type, so
//! every field is deserialization-tolerant (`#[serde(default)]`) rather
//! than validated.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Resume point on a partially watched item, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub total: f64,
}

impl Resume {
    /// Whether there is a meaningful position to resume from.
    pub fn in_progress(&self) -> bool {
        self.position > 0.0 && self.total > 0.0
    }

    /// Watched percentage, rounded to the nearest whole percent and
    /// clamped to 0..=100.
    pub fn watched_percent(&self) -> u8 {
        if self.total <= 0.0 {
            return 0;
        }
        let percent = (self.position / self.total * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

/// JSON-RPC API version reported by `JSONRPC.Version`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// One cast list entry on a movie or episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Album as returned by `AudioLibrary.GetAlbumDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "albumid")]
    pub album_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Vec<String>,
    #[serde(default, rename = "artistid")]
    pub artist_ids: Vec<u32>,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub playcount: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, rename = "albumlabel")]
    pub album_label: String,
    #[serde(default)]
    pub description: String,
}

/// Artist as returned by `AudioLibrary.GetArtistDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "artistid")]
    pub artist_id: u32,
    /// Kodi keys the artist name under `artist`.
    #[serde(default, rename = "artist")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub formed: String,
    #[serde(default)]
    pub disbanded: String,
    #[serde(default, rename = "yearsactive")]
    pub years_active: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
}

/// Movie as returned by `VideoLibrary.GetMovieDetails` and, with a lighter
/// property set, by `VideoLibrary.GetMovies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieid")]
    pub movie_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub rating: f64,
    /// Runtime in seconds.
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub director: Vec<String>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub playcount: u32,
    #[serde(default)]
    pub premiered: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub fanart: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub resume: Resume,
}

/// TV show as returned by `VideoLibrary.GetTVShowDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    #[serde(rename = "tvshowid")]
    pub tvshow_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub studio: Vec<String>,
    #[serde(default)]
    pub mpaa: String,
    #[serde(default)]
    pub genre: Vec<String>,
    /// Episode count across all seasons.
    #[serde(default)]
    pub episode: u32,
    #[serde(default, rename = "watchedepisodes")]
    pub watched_episodes: u32,
    #[serde(default)]
    pub premiered: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub fanart: String,
}

/// Season as returned by `VideoLibrary.GetSeasons`.
///
/// Season numbers are values, not ids: season `0` is the specials season
/// and must not be folded into an "absent" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season: i32,
    #[serde(default, rename = "showtitle")]
    pub show_title: String,
    #[serde(default)]
    pub playcount: u32,
    #[serde(default)]
    pub episode: u32,
    #[serde(default, rename = "watchedepisodes")]
    pub watched_episodes: u32,
    #[serde(default)]
    pub thumbnail: String,
}

/// Episode as returned by `VideoLibrary.GetEpisodeDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "episodeid")]
    pub episode_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, rename = "firstaired")]
    pub first_aired: String,
    #[serde(default)]
    pub playcount: u32,
    /// Runtime in seconds.
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub season: i32,
    #[serde(default)]
    pub episode: i32,
    #[serde(default, rename = "showtitle")]
    pub show_title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub resume: Resume,
    #[serde(default)]
    pub file: String,
}

/// Live TV channel as returned by `PVR.GetChannels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "channelid")]
    pub channel_id: u32,
    /// Kodi keys the channel name under `channel`.
    #[serde(default, rename = "channel")]
    pub name: String,
    #[serde(default, rename = "channeltype")]
    pub channel_type: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub thumbnail: String,
}

/// PVR recording as returned by `PVR.GetRecordingDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(rename = "recordingid")]
    pub recording_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default, rename = "starttime", with = "kodi_datetime")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, rename = "endtime", with = "kodi_datetime")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub plot: String,
    /// Runtime in seconds.
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub resume: Resume,
}

/// PVR timer as returned by `PVR.GetTimers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    #[serde(rename = "timerid")]
    pub timer_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, rename = "channelid")]
    pub channel_id: u32,
    #[serde(default, rename = "starttime", with = "kodi_datetime")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, rename = "endtime", with = "kodi_datetime")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub state: String,
}

/// One page of a movie listing, with the cursor for the page after it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    /// Server-reported total across the whole (filtered) listing.
    pub total: u32,
    /// Start index of the next page; `None` once the listing is complete.
    pub next_start: Option<u32>,
}

/// Combined free-text search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.artists.is_empty() && self.albums.is_empty()
    }
}

/// What to hand to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PlayTarget {
    Movie(u32),
    Episode(u32),
    Recording(u32),
    Channel(u32),
}

/// Body of `POST /api/play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub target: PlayTarget,
    /// Resume from the saved position instead of starting over.
    #[serde(default)]
    pub resume: bool,
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppStatus {
    pub service: String,
    pub version: String,
    /// Whether the Kodi instance answered the last connectivity probe.
    pub connected: bool,
    pub api_version: Option<ApiVersion>,
    /// `host:port` of the configured Kodi instance.
    pub server: String,
    pub uptime_secs: u64,
    pub cache_entries: usize,
}

/// Kodi serializes datetimes as `YYYY-MM-DD HH:MM:SS` in server-local
/// time; an empty string means unset.
mod kodi_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quarter_watched_is_exactly_25_percent() {
        let resume = Resume {
            position: 30.0,
            total: 120.0,
        };
        assert!(resume.in_progress());
        assert_eq!(resume.watched_percent(), 25);
    }

    #[test]
    fn watched_percent_handles_degenerate_totals() {
        assert_eq!(Resume::default().watched_percent(), 0);
        let no_total = Resume {
            position: 30.0,
            total: 0.0,
        };
        assert_eq!(no_total.watched_percent(), 0);
        assert!(!no_total.in_progress());
        // A position past the end stays clamped.
        let overshot = Resume {
            position: 150.0,
            total: 120.0,
        };
        assert_eq!(overshot.watched_percent(), 100);
    }

    #[test]
    fn album_decodes_from_wire_names() {
        let album: Album = serde_json::from_value(json!({
            "albumid": 12,
            "title": "Mezzanine",
            "artist": ["Massive Attack"],
            "artistid": [3],
            "year": 1998,
            "albumlabel": "Virgin"
        }))
        .unwrap();
        assert_eq!(album.album_id, 12);
        assert_eq!(album.artist_ids, vec![3]);
        assert_eq!(album.album_label, "Virgin");
        // Unrequested properties default instead of failing the decode.
        assert!(album.description.is_empty());
    }

    #[test]
    fn recording_times_parse_kodi_datetimes() {
        let recording: Recording = serde_json::from_value(json!({
            "recordingid": 9,
            "title": "News",
            "starttime": "2024-05-01 20:00:00",
            "endtime": ""
        }))
        .unwrap();
        let start = recording.start_time.unwrap();
        assert_eq!(start.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 20:00:00");
        assert_eq!(recording.end_time, None);

        // And they serialize back in the same format.
        let round_tripped = serde_json::to_value(&recording).unwrap();
        assert_eq!(round_tripped["starttime"], "2024-05-01 20:00:00");
        assert_eq!(round_tripped["endtime"], "");
    }

    #[test]
    fn play_request_wire_shape() {
        let body: PlayRequest =
            serde_json::from_value(json!({ "target": { "kind": "movie", "id": 4 } })).unwrap();
        assert_eq!(body.target, PlayTarget::Movie(4));
        assert!(!body.resume);
    }
}
