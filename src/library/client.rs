//! Kodi library client.
//!
//! One read operation per entity type, each binding a single JSON-RPC
//! method to a cached, deduplicated, retry-once fetch. Every operation
//! requests a fixed property set and unwraps the response envelope to the
//! one domain field of interest; envelope metadata is discarded.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::KodiConfig;
use crate::library::cache::{QueryCache, QueryKey, QueryKind};
use crate::library::ids::LibraryId;
use crate::library::paging::{next_cursor, PageWindow, DEFAULT_PAGE_SIZE};
use crate::library::properties;
use crate::library::types::{
    Album, ApiVersion, Artist, Channel, Episode, Movie, MoviePage, PlayRequest, PlayTarget,
    Recording, SearchResults, Season, Timer, TvShow,
};
use crate::rpc::{HttpTransport, RpcError, Transport};

/// Search returns at most this many rows per entity type.
const SEARCH_LIMIT: u32 = 25;

/// Channel group queried for the live TV listing.
const CHANNEL_GROUP_ALL_TV: &str = "alltv";

/// Sort orders exposed for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    #[default]
    Title,
    Year,
    Rating,
    DateAdded,
}

impl SortMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMethod::Title => "title",
            SortMethod::Year => "year",
            SortMethod::Rating => "rating",
            SortMethod::DateAdded => "dateadded",
        }
    }

    /// Parse a query-string value; anything unrecognized is title sort.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("year") => SortMethod::Year,
            Some("rating") => SortMethod::Rating,
            Some("dateadded") => SortMethod::DateAdded,
            _ => SortMethod::Title,
        }
    }

    fn to_value(self) -> Value {
        json!({ "method": self.as_str(), "order": "ascending", "ignorearticle": true })
    }
}

/// Client over one Kodi instance: transport plus response cache.
///
/// Cheap to share behind an `Arc`; all state lives in the cache, which is
/// constructed here and owned explicitly rather than ambient.
pub struct KodiClient {
    transport: Arc<dyn Transport>,
    cache: Arc<QueryCache>,
}

impl KodiClient {
    pub fn new(config: &KodiConfig) -> Self {
        let transport = HttpTransport::new(
            config.endpoint(),
            config.username.clone(),
            config.password.clone(),
        );
        Self::with_transport(Arc::new(transport))
    }

    /// Build against any transport; tests inject mocks here.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// The response cache, for the GC sweeper and status reporting.
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// One cached RPC call; the whole entity-query pattern lives here.
    async fn cached_call(
        &self,
        key: QueryKey,
        method: &'static str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Value, RpcError> {
        let transport = self.transport.clone();
        let call_cancel = cancel.clone();
        self.cache
            .fetch(key, cancel, move || {
                let transport = transport.clone();
                let params = params.clone();
                let cancel = call_cancel.clone();
                async move { transport.call(method, params, &cancel).await }
            })
            .await
    }

    // -- connectivity --------------------------------------------------------

    /// Connectivity probe; cached briefly so status polling stays cheap.
    pub async fn ping(&self, cancel: &CancellationToken) -> Result<bool, RpcError> {
        let key = QueryKey::new(QueryKind::Connection, "ping");
        let result = self
            .cached_call(key, "JSONRPC.Ping", json!({}), cancel)
            .await?;
        Ok(result.as_str() == Some("pong"))
    }

    /// JSON-RPC API version reported by the server.
    pub async fn version(&self, cancel: &CancellationToken) -> Result<ApiVersion, RpcError> {
        let key = QueryKey::new(QueryKind::Connection, "version");
        let result = self
            .cached_call(key, "JSONRPC.Version", json!({}), cancel)
            .await?;
        decode(result.get("version").cloned().unwrap_or(Value::Null), "version")
    }

    // -- music ---------------------------------------------------------------

    /// `AudioLibrary.GetAlbumDetails`; `Ok(None)` when `id` is absent.
    pub async fn album_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Album>, RpcError> {
        let Some(album_id) = id.get() else {
            debug!("album query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::AlbumDetails, album_id.to_string());
        let params = json!({ "albumid": album_id, "properties": properties::ALBUM });
        let result = self
            .cached_call(key, "AudioLibrary.GetAlbumDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "albumdetails")?))
    }

    /// `AudioLibrary.GetArtistDetails`; `Ok(None)` when `id` is absent.
    pub async fn artist_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Artist>, RpcError> {
        let Some(artist_id) = id.get() else {
            debug!("artist query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::ArtistDetails, artist_id.to_string());
        let params = json!({ "artistid": artist_id, "properties": properties::ARTIST });
        let result = self
            .cached_call(key, "AudioLibrary.GetArtistDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "artistdetails")?))
    }

    /// All album artists, sorted by name.
    pub async fn artists(&self, cancel: &CancellationToken) -> Result<Vec<Artist>, RpcError> {
        let key = QueryKey::new(QueryKind::ArtistList, "all");
        let params = json!({
            "albumartistsonly": true,
            "properties": properties::ARTIST_LIST,
            "sort": { "method": "artist", "order": "ascending", "ignorearticle": true },
        });
        let result = self
            .cached_call(key, "AudioLibrary.GetArtists", params, cancel)
            .await?;
        unwrap_list(&result, "artists")
    }

    /// Albums of one artist; `Ok(None)` when `artist_id` is absent.
    pub async fn artist_albums(
        &self,
        artist_id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Album>>, RpcError> {
        let Some(artist_id) = artist_id.get() else {
            debug!("album listing disabled: artist id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::AlbumList, format!("artist={artist_id}"));
        let params = json!({
            "properties": properties::ALBUM_LIST,
            "filter": { "artistid": artist_id },
            "sort": { "method": "year", "order": "ascending" },
        });
        let result = self
            .cached_call(key, "AudioLibrary.GetAlbums", params, cancel)
            .await?;
        Ok(Some(unwrap_list(&result, "albums")?))
    }

    // -- movies --------------------------------------------------------------

    /// `VideoLibrary.GetMovieDetails`; `Ok(None)` when `id` is absent.
    pub async fn movie_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Movie>, RpcError> {
        let Some(movie_id) = id.get() else {
            debug!("movie query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::MovieDetails, movie_id.to_string());
        let params = json!({ "movieid": movie_id, "properties": properties::MOVIE });
        let result = self
            .cached_call(key, "VideoLibrary.GetMovieDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "moviedetails")?))
    }

    /// One page of `VideoLibrary.GetMovies` over the half-open window
    /// starting at `start`. Sort and genre filter are part of the cache
    /// key, so changing either never mixes pages across listings.
    pub async fn movies_page(
        &self,
        start: u32,
        sort: SortMethod,
        genre: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<MoviePage, RpcError> {
        let window = PageWindow::at(start, DEFAULT_PAGE_SIZE);
        let mut params = json!({
            "properties": properties::MOVIE_LIST,
            "limits": { "start": window.start, "end": window.end },
            "sort": sort.to_value(),
        });
        if let Some(genre) = genre {
            params["filter"] = json!({ "field": "genre", "operator": "is", "value": genre });
        }

        let ident = format!(
            "start={start}:sort={}:genre={}",
            sort.as_str(),
            genre.unwrap_or("")
        );
        let result = self
            .cached_call(
                QueryKey::new(QueryKind::MovieList, ident),
                "VideoLibrary.GetMovies",
                params,
                cancel,
            )
            .await?;

        let movies: Vec<Movie> = unwrap_list(&result, "movies")?;
        let total = list_total(&result).unwrap_or(start + movies.len() as u32);
        Ok(MoviePage {
            next_start: next_cursor(total, start, DEFAULT_PAGE_SIZE),
            total,
            movies,
        })
    }

    /// Drop the cached movie page sequence (sort or filter changed).
    pub async fn invalidate_movie_pages(&self) {
        self.cache.invalidate_kind(QueryKind::MovieList).await;
    }

    // -- tv ------------------------------------------------------------------

    /// All TV shows, sorted by title.
    pub async fn tv_shows(&self, cancel: &CancellationToken) -> Result<Vec<TvShow>, RpcError> {
        let key = QueryKey::new(QueryKind::TvShowList, "all");
        let params = json!({
            "properties": properties::TVSHOW_LIST,
            "sort": { "method": "title", "order": "ascending", "ignorearticle": true },
        });
        let result = self
            .cached_call(key, "VideoLibrary.GetTVShows", params, cancel)
            .await?;
        unwrap_list(&result, "tvshows")
    }

    /// `VideoLibrary.GetTVShowDetails`; `Ok(None)` when `id` is absent.
    pub async fn tv_show_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<TvShow>, RpcError> {
        let Some(tvshow_id) = id.get() else {
            debug!("tv show query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::TvShowDetails, tvshow_id.to_string());
        let params = json!({ "tvshowid": tvshow_id, "properties": properties::TVSHOW });
        let result = self
            .cached_call(key, "VideoLibrary.GetTVShowDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "tvshowdetails")?))
    }

    /// Seasons of one show; `Ok(None)` when `tvshow_id` is absent.
    pub async fn seasons(
        &self,
        tvshow_id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Season>>, RpcError> {
        let Some(tvshow_id) = tvshow_id.get() else {
            debug!("season listing disabled: show id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::SeasonList, format!("show={tvshow_id}"));
        let params = json!({ "tvshowid": tvshow_id, "properties": properties::SEASON });
        let result = self
            .cached_call(key, "VideoLibrary.GetSeasons", params, cancel)
            .await?;
        Ok(Some(unwrap_list(&result, "seasons")?))
    }

    /// Episodes of one show, optionally narrowed to a season. Season
    /// numbers are values (0 is the specials season), not ids.
    pub async fn episodes(
        &self,
        tvshow_id: LibraryId,
        season: Option<i32>,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Episode>>, RpcError> {
        let Some(tvshow_id) = tvshow_id.get() else {
            debug!("episode listing disabled: show id absent");
            return Ok(None);
        };
        let ident = match season {
            Some(season) => format!("show={tvshow_id}:season={season}"),
            None => format!("show={tvshow_id}"),
        };
        let mut params = json!({
            "tvshowid": tvshow_id,
            "properties": properties::EPISODE_LIST,
            "sort": { "method": "episode", "order": "ascending" },
        });
        if let Some(season) = season {
            params["season"] = json!(season);
        }
        let result = self
            .cached_call(
                QueryKey::new(QueryKind::EpisodeList, ident),
                "VideoLibrary.GetEpisodes",
                params,
                cancel,
            )
            .await?;
        Ok(Some(unwrap_list(&result, "episodes")?))
    }

    /// `VideoLibrary.GetEpisodeDetails`; `Ok(None)` when `id` is absent.
    pub async fn episode_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Episode>, RpcError> {
        let Some(episode_id) = id.get() else {
            debug!("episode query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::EpisodeDetails, episode_id.to_string());
        let params = json!({ "episodeid": episode_id, "properties": properties::EPISODE });
        let result = self
            .cached_call(key, "VideoLibrary.GetEpisodeDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "episodedetails")?))
    }

    // -- live tv -------------------------------------------------------------

    /// TV channels of the `alltv` group.
    pub async fn channels(&self, cancel: &CancellationToken) -> Result<Vec<Channel>, RpcError> {
        let key = QueryKey::new(QueryKind::ChannelList, CHANNEL_GROUP_ALL_TV);
        let params = json!({
            "channelgroupid": CHANNEL_GROUP_ALL_TV,
            "properties": properties::CHANNEL,
        });
        let result = self
            .cached_call(key, "PVR.GetChannels", params, cancel)
            .await?;
        unwrap_list(&result, "channels")
    }

    /// All PVR recordings.
    pub async fn recordings(&self, cancel: &CancellationToken) -> Result<Vec<Recording>, RpcError> {
        let key = QueryKey::new(QueryKind::RecordingList, "all");
        let params = json!({ "properties": properties::RECORDING });
        let result = self
            .cached_call(key, "PVR.GetRecordings", params, cancel)
            .await?;
        unwrap_list(&result, "recordings")
    }

    /// `PVR.GetRecordingDetails`; `Ok(None)` when `id` is absent.
    pub async fn recording_details(
        &self,
        id: LibraryId,
        cancel: &CancellationToken,
    ) -> Result<Option<Recording>, RpcError> {
        let Some(recording_id) = id.get() else {
            debug!("recording query disabled: id absent");
            return Ok(None);
        };
        let key = QueryKey::new(QueryKind::RecordingDetails, recording_id.to_string());
        let params = json!({ "recordingid": recording_id, "properties": properties::RECORDING });
        let result = self
            .cached_call(key, "PVR.GetRecordingDetails", params, cancel)
            .await?;
        Ok(Some(unwrap_envelope(&result, "recordingdetails")?))
    }

    /// All PVR timers.
    pub async fn timers(&self, cancel: &CancellationToken) -> Result<Vec<Timer>, RpcError> {
        let key = QueryKey::new(QueryKind::TimerList, "all");
        let params = json!({ "properties": properties::TIMER });
        let result = self
            .cached_call(key, "PVR.GetTimers", params, cancel)
            .await?;
        unwrap_list(&result, "timers")
    }

    // -- search --------------------------------------------------------------

    /// Free-text search across movies, artists and albums via the library
    /// filter operators. The three upstream calls run concurrently and
    /// share one short-lived cache entry per query.
    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResults, RpcError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchResults::default());
        }

        let key = QueryKey::new(QueryKind::Search, trimmed.to_lowercase());
        let transport = self.transport.clone();
        let call_cancel = cancel.clone();
        let needle = trimmed.to_string();

        let result = self
            .cache
            .fetch(key, cancel, move || {
                let transport = transport.clone();
                let cancel = call_cancel.clone();
                let needle = needle.clone();
                async move {
                    let limits = json!({ "start": 0, "end": SEARCH_LIMIT });
                    let movies = transport.call(
                        "VideoLibrary.GetMovies",
                        json!({
                            "properties": properties::MOVIE_LIST,
                            "filter": { "field": "title", "operator": "contains", "value": needle },
                            "limits": limits,
                        }),
                        &cancel,
                    );
                    let artists = transport.call(
                        "AudioLibrary.GetArtists",
                        json!({
                            "properties": properties::ARTIST_LIST,
                            "filter": { "field": "artist", "operator": "contains", "value": needle },
                            "limits": limits,
                        }),
                        &cancel,
                    );
                    let albums = transport.call(
                        "AudioLibrary.GetAlbums",
                        json!({
                            "properties": properties::ALBUM_LIST,
                            "filter": { "field": "album", "operator": "contains", "value": needle },
                            "limits": limits,
                        }),
                        &cancel,
                    );
                    let (movies, artists, albums) = futures::try_join!(movies, artists, albums)?;
                    Ok(json!({
                        "movies": movies.get("movies").cloned().unwrap_or_else(|| json!([])),
                        "artists": artists.get("artists").cloned().unwrap_or_else(|| json!([])),
                        "albums": albums.get("albums").cloned().unwrap_or_else(|| json!([])),
                    }))
                }
            })
            .await?;

        decode(result, "search results")
    }

    // -- playback ------------------------------------------------------------

    /// Start playback on the Kodi instance. A mutation, so it bypasses the
    /// cache and is never retried.
    pub async fn play(
        &self,
        request: PlayRequest,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        let item = match request.target {
            PlayTarget::Movie(id) => json!({ "movieid": id }),
            PlayTarget::Episode(id) => json!({ "episodeid": id }),
            PlayTarget::Recording(id) => json!({ "recordingid": id }),
            PlayTarget::Channel(id) => json!({ "channelid": id }),
        };
        let params = json!({ "item": item, "options": { "resume": request.resume } });
        self.transport.call("Player.Open", params, cancel).await?;
        Ok(())
    }
}

/// Pull the single envelope field out of a response and decode it.
fn unwrap_envelope<T: DeserializeOwned>(result: &Value, envelope_key: &str) -> Result<T, RpcError> {
    decode(
        result.get(envelope_key).cloned().unwrap_or(Value::Null),
        envelope_key,
    )
}

/// Like [`unwrap_envelope`] but a missing list field is an empty listing,
/// which is how Kodi reports "nothing there".
fn unwrap_list<T: DeserializeOwned>(result: &Value, envelope_key: &str) -> Result<Vec<T>, RpcError> {
    match result.get(envelope_key) {
        None => Ok(Vec::new()),
        Some(list) => decode(list.clone(), envelope_key),
    }
}

/// Server-reported total item count, when the response carries limits.
fn list_total(result: &Value) -> Option<u32> {
    result
        .get("limits")
        .and_then(|limits| limits.get("total"))
        .and_then(Value::as_u64)
        .map(|total| total as u32)
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::Decode(format!("{what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted transport: results are popped per call, the last repeats.
    /// Captures the params of every call for assertions.
    #[derive(Default)]
    struct MockTransport {
        script: Mutex<HashMap<String, Vec<Result<Value, RpcError>>>>,
        seen_params: Mutex<HashMap<String, Value>>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        fn new() -> Self {
            Self::default()
        }

        fn respond(self, method: &str, result: Result<Value, RpcError>) -> Self {
            self.script
                .lock()
                .unwrap()
                .entry(method.to_string())
                .or_default()
                .push(result);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn params_for(&self, method: &str) -> Value {
            self.seen_params
                .lock()
                .unwrap()
                .get(method)
                .cloned()
                .unwrap_or(Value::Null)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn call(
            &self,
            method: &str,
            params: Value,
            _cancel: &CancellationToken,
        ) -> Result<Value, RpcError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_params
                .lock()
                .unwrap()
                .insert(method.to_string(), params);
            let mut script = self.script.lock().unwrap();
            let seq = script
                .get_mut(method)
                .unwrap_or_else(|| panic!("unexpected method {method}"));
            if seq.len() > 1 {
                seq.remove(0)
            } else {
                seq[0].clone()
            }
        }
    }

    fn client(mock: MockTransport) -> (KodiClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        (KodiClient::with_transport(mock.clone()), mock)
    }

    #[tokio::test]
    async fn absent_id_issues_no_request_and_reports_not_ready() {
        let (client, mock) = client(MockTransport::new());
        let cancel = CancellationToken::new();

        assert_eq!(
            client.album_details(LibraryId::Absent, &cancel).await.unwrap(),
            None
        );
        // Raw id 0 folds into the same disabled state.
        assert_eq!(
            client
                .movie_details(LibraryId::from_raw(0), &cancel)
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            client
                .seasons(LibraryId::from_raw(0), &cancel)
                .await
                .unwrap(),
            None
        );
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn album_details_unwraps_envelope_and_caches() {
        let (client, mock) = client(MockTransport::new().respond(
            "AudioLibrary.GetAlbumDetails",
            Ok(json!({
                "albumdetails": { "albumid": 5, "title": "Dummy", "artist": ["Portishead"] }
            })),
        ));
        let cancel = CancellationToken::new();

        let album = client
            .album_details(LibraryId::Id(5), &cancel)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(album.title, "Dummy");

        // Same id again: served from cache, no second request.
        client
            .album_details(LibraryId::Id(5), &cancel)
            .await
            .unwrap();
        assert_eq!(mock.calls(), 1);

        let params = mock.params_for("AudioLibrary.GetAlbumDetails");
        assert_eq!(params["albumid"], 5);
        assert!(params["properties"]
            .as_array()
            .unwrap()
            .contains(&json!("albumlabel")));
    }

    #[tokio::test]
    async fn failing_query_is_retried_once_then_surfaced() {
        let (client, mock) = client(MockTransport::new().respond(
            "VideoLibrary.GetMovieDetails",
            Err(RpcError::Protocol {
                code: -32100,
                message: "busy".to_string(),
            }),
        ));
        let cancel = CancellationToken::new();

        let err = client
            .movie_details(LibraryId::Id(9), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Protocol { .. }));
        // Initial attempt plus exactly one retry.
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn movies_page_computes_next_cursor_from_total() {
        let movies: Vec<Value> = (0..100).map(|i| json!({ "movieid": i + 1 })).collect();
        let (client, mock) = client(MockTransport::new().respond(
            "VideoLibrary.GetMovies",
            Ok(json!({ "movies": movies, "limits": { "start": 0, "end": 100, "total": 250 } })),
        ));
        let cancel = CancellationToken::new();

        let page = client
            .movies_page(0, SortMethod::Title, None, &cancel)
            .await
            .unwrap();
        assert_eq!(page.total, 250);
        assert_eq!(page.next_start, Some(100));
        assert_eq!(page.movies.len(), 100);

        let params = mock.params_for("VideoLibrary.GetMovies");
        assert_eq!(params["limits"], json!({ "start": 0, "end": 100 }));
        assert_eq!(params["sort"]["method"], "title");
        assert!(params.get("filter").is_none());
    }

    #[tokio::test]
    async fn movies_last_page_terminates_pagination() {
        let (client, _mock) = client(MockTransport::new().respond(
            "VideoLibrary.GetMovies",
            Ok(json!({
                "movies": [ { "movieid": 201 } ],
                "limits": { "start": 200, "end": 300, "total": 250 }
            })),
        ));
        let cancel = CancellationToken::new();

        let page = client
            .movies_page(200, SortMethod::Title, None, &cancel)
            .await
            .unwrap();
        assert_eq!(page.next_start, None);
    }

    #[tokio::test]
    async fn genre_filter_reaches_the_wire_and_the_cache_key() {
        let (client, mock) = client(MockTransport::new().respond(
            "VideoLibrary.GetMovies",
            Ok(json!({ "movies": [], "limits": { "total": 0 } })),
        ));
        let cancel = CancellationToken::new();

        client
            .movies_page(0, SortMethod::Year, Some("Horror"), &cancel)
            .await
            .unwrap();
        let params = mock.params_for("VideoLibrary.GetMovies");
        assert_eq!(
            params["filter"],
            json!({ "field": "genre", "operator": "is", "value": "Horror" })
        );

        // A different filter is a different key: the wire is hit again.
        client
            .movies_page(0, SortMethod::Year, Some("Comedy"), &cancel)
            .await
            .unwrap();
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn ping_and_version_share_the_connection_kind() {
        let (client, mock) = client(
            MockTransport::new()
                .respond("JSONRPC.Ping", Ok(json!("pong")))
                .respond(
                    "JSONRPC.Version",
                    Ok(json!({ "version": { "major": 13, "minor": 5, "patch": 0 } })),
                ),
        );
        let cancel = CancellationToken::new();

        assert!(client.ping(&cancel).await.unwrap());
        let version = client.version(&cancel).await.unwrap();
        assert_eq!((version.major, version.minor), (13, 5));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn seasons_decode_including_the_specials_season() {
        let (client, _mock) = client(MockTransport::new().respond(
            "VideoLibrary.GetSeasons",
            Ok(json!({
                "seasons": [
                    { "season": 0, "showtitle": "Lost", "episode": 3 },
                    { "season": 1, "showtitle": "Lost", "episode": 24 }
                ]
            })),
        ));
        let cancel = CancellationToken::new();

        let seasons = client
            .seasons(LibraryId::Id(4), &cancel)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season, 0);
    }

    #[tokio::test]
    async fn search_fans_out_and_combines() {
        let (client, mock) = client(
            MockTransport::new()
                .respond(
                    "VideoLibrary.GetMovies",
                    Ok(json!({ "movies": [ { "movieid": 1, "title": "Heat" } ] })),
                )
                .respond("AudioLibrary.GetArtists", Ok(json!({ "artists": [] })))
                .respond(
                    "AudioLibrary.GetAlbums",
                    Ok(json!({ "albums": [ { "albumid": 2, "title": "Heathen" } ] })),
                ),
        );
        let cancel = CancellationToken::new();

        let results = client.search("hea", &cancel).await.unwrap();
        assert_eq!(results.movies.len(), 1);
        assert!(results.artists.is_empty());
        assert_eq!(results.albums.len(), 1);
        assert_eq!(mock.calls(), 3);

        // Same query again within the freshness window: fully cached.
        client.search("hea", &cancel).await.unwrap();
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn blank_search_never_touches_the_wire() {
        let (client, mock) = client(MockTransport::new());
        let cancel = CancellationToken::new();

        let results = client.search("   ", &cancel).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn play_opens_the_right_item() {
        let (client, mock) =
            client(MockTransport::new().respond("Player.Open", Ok(json!("OK"))));
        let cancel = CancellationToken::new();

        client
            .play(
                PlayRequest {
                    target: PlayTarget::Movie(12),
                    resume: true,
                },
                &cancel,
            )
            .await
            .unwrap();

        let params = mock.params_for("Player.Open");
        assert_eq!(params["item"], json!({ "movieid": 12 }));
        assert_eq!(params["options"]["resume"], json!(true));
    }

    #[test]
    fn sort_param_parsing_defaults_to_title() {
        assert_eq!(SortMethod::from_param(Some("year")), SortMethod::Year);
        assert_eq!(SortMethod::from_param(Some("bogus")), SortMethod::Title);
        assert_eq!(SortMethod::from_param(None), SortMethod::Title);
    }
}
