//! HTTP API handlers for the web UI.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::KodiConfig;
use crate::library::client::SortMethod;
use crate::library::types::{
    Album, AppStatus, Artist, Channel, Episode, Movie, MoviePage, PlayRequest, Recording,
    SearchResults, Season, Timer, TvShow,
};
use crate::library::{KodiClient, LibraryId};
use crate::rpc::RpcError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub kodi: Arc<KodiClient>,
    pub artwork: Arc<ArtworkProxy>,
    /// `host:port` of the configured Kodi instance, for status reporting.
    pub kodi_server: String,
    pub started: Instant,
}

impl AppState {
    pub fn new(kodi: Arc<KodiClient>, config: &KodiConfig) -> Self {
        Self {
            kodi,
            artwork: Arc::new(ArtworkProxy::new(config)),
            kodi_server: format!("{}:{}", config.host, config.port),
            started: Instant::now(),
        }
    }
}

/// Error payload returned to the UI.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler-level error: an upstream RPC failure or a missing entity.
#[derive(Debug)]
pub enum ApiError {
    Rpc(RpcError),
    NotFound,
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        ApiError::Rpc(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "unknown or absent library id".to_string(),
            ),
            ApiError::Rpc(RpcError::Cancelled) => {
                (StatusCode::GATEWAY_TIMEOUT, RpcError::Cancelled.to_string())
            }
            ApiError::Rpc(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// All `/api` routes over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/music/artists", get(artists_handler))
        .route("/api/music/artists/{id}", get(artist_handler))
        .route("/api/music/artists/{id}/albums", get(artist_albums_handler))
        .route("/api/music/albums/{id}", get(album_handler))
        .route("/api/movies", get(movies_handler))
        .route("/api/movies/{id}", get(movie_handler))
        .route("/api/tv", get(tv_shows_handler))
        .route("/api/tv/{id}", get(tv_show_handler))
        .route("/api/tv/{id}/seasons", get(seasons_handler))
        .route("/api/tv/{id}/episodes", get(episodes_handler))
        .route("/api/episodes/{id}", get(episode_handler))
        .route("/api/livetv/channels", get(channels_handler))
        .route("/api/livetv/recordings", get(recordings_handler))
        .route("/api/livetv/recordings/{id}", get(recording_handler))
        .route("/api/livetv/timers", get(timers_handler))
        .route("/api/search", get(search_handler))
        .route("/api/artwork", get(artwork_handler))
        .route("/api/play", post(play_handler))
        .with_state(state)
}

/// GET /api/status - Service health and Kodi connectivity
pub async fn status_handler(State(state): State<AppState>) -> Json<AppStatus> {
    let cancel = CancellationToken::new();
    let connected = state.kodi.ping(&cancel).await.unwrap_or(false);
    let api_version = if connected {
        state.kodi.version(&cancel).await.ok()
    } else {
        None
    };

    Json(AppStatus {
        service: "kodiview".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connected,
        api_version,
        server: state.kodi_server.clone(),
        uptime_secs: state.started.elapsed().as_secs(),
        cache_entries: state.kodi.cache().len().await,
    })
}

/// GET /api/music/artists - All album artists
pub async fn artists_handler(State(state): State<AppState>) -> Result<Json<Vec<Artist>>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.artists(&cancel).await?))
}

/// GET /api/music/artists/{id} - Artist details
pub async fn artist_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Artist>, ApiError> {
    let cancel = CancellationToken::new();
    let artist = state
        .kodi
        .artist_details(LibraryId::from_raw(id), &cancel)
        .await?;
    artist.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/music/artists/{id}/albums - Albums of one artist
pub async fn artist_albums_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let cancel = CancellationToken::new();
    let albums = state
        .kodi
        .artist_albums(LibraryId::from_raw(id), &cancel)
        .await?;
    albums.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/music/albums/{id} - Album details
pub async fn album_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Album>, ApiError> {
    let cancel = CancellationToken::new();
    let album = state
        .kodi
        .album_details(LibraryId::from_raw(id), &cancel)
        .await?;
    album.map(Json).ok_or(ApiError::NotFound)
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub start: u32,
    pub sort: Option<String>,
    pub genre: Option<String>,
    /// Drop the cached page sequence first (sort/filter just changed).
    #[serde(default)]
    pub refresh: bool,
}

/// GET /api/movies - One page of the movie listing
pub async fn movies_handler(
    State(state): State<AppState>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let cancel = CancellationToken::new();
    if query.refresh {
        state.kodi.invalidate_movie_pages().await;
    }
    let sort = SortMethod::from_param(query.sort.as_deref());
    let genre = query.genre.as_deref().filter(|g| !g.is_empty());
    Ok(Json(
        state
            .kodi
            .movies_page(query.start, sort, genre, &cancel)
            .await?,
    ))
}

/// GET /api/movies/{id} - Movie details
pub async fn movie_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Movie>, ApiError> {
    let cancel = CancellationToken::new();
    let movie = state
        .kodi
        .movie_details(LibraryId::from_raw(id), &cancel)
        .await?;
    movie.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/tv - All TV shows
pub async fn tv_shows_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TvShow>>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.tv_shows(&cancel).await?))
}

/// GET /api/tv/{id} - TV show details
pub async fn tv_show_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<TvShow>, ApiError> {
    let cancel = CancellationToken::new();
    let show = state
        .kodi
        .tv_show_details(LibraryId::from_raw(id), &cancel)
        .await?;
    show.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/tv/{id}/seasons - Seasons of one show
pub async fn seasons_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Season>>, ApiError> {
    let cancel = CancellationToken::new();
    let seasons = state
        .kodi
        .seasons(LibraryId::from_raw(id), &cancel)
        .await?;
    seasons.map(Json).ok_or(ApiError::NotFound)
}

#[derive(Debug, Deserialize)]
pub struct EpisodesQuery {
    pub season: Option<i32>,
}

/// GET /api/tv/{id}/episodes?season= - Episodes of one show
pub async fn episodes_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<EpisodesQuery>,
) -> Result<Json<Vec<Episode>>, ApiError> {
    let cancel = CancellationToken::new();
    let episodes = state
        .kodi
        .episodes(LibraryId::from_raw(id), query.season, &cancel)
        .await?;
    episodes.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/episodes/{id} - Episode details
pub async fn episode_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Episode>, ApiError> {
    let cancel = CancellationToken::new();
    let episode = state
        .kodi
        .episode_details(LibraryId::from_raw(id), &cancel)
        .await?;
    episode.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/livetv/channels - TV channels
pub async fn channels_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Channel>>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.channels(&cancel).await?))
}

/// GET /api/livetv/recordings - PVR recordings
pub async fn recordings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recording>>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.recordings(&cancel).await?))
}

/// GET /api/livetv/recordings/{id} - Recording details
pub async fn recording_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Recording>, ApiError> {
    let cancel = CancellationToken::new();
    let recording = state
        .kodi
        .recording_details(LibraryId::from_raw(id), &cancel)
        .await?;
    recording.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/livetv/timers - PVR timers
pub async fn timers_handler(State(state): State<AppState>) -> Result<Json<Vec<Timer>>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.timers(&cancel).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q= - Combined library search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let cancel = CancellationToken::new();
    Ok(Json(state.kodi.search(&query.q, &cancel).await?))
}

#[derive(Debug, Deserialize)]
pub struct ArtworkQuery {
    pub path: String,
}

/// GET /api/artwork?path= - Proxy artwork bytes from the Kodi image endpoint
pub async fn artwork_handler(
    State(state): State<AppState>,
    Query(query): Query<ArtworkQuery>,
) -> Result<Response, ApiError> {
    let (content_type, body) = state.artwork.get(&query.path).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// POST /api/play - Start playback on the Kodi instance
pub async fn play_handler(
    State(state): State<AppState>,
    Json(request): Json<PlayRequest>,
) -> Result<StatusCode, ApiError> {
    let cancel = CancellationToken::new();
    state.kodi.play(request, &cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetches artwork bytes from Kodi's image endpoint, carrying the
/// configured basic auth.
pub struct ArtworkProxy {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ArtworkProxy {
    pub fn new(config: &KodiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Fetch one image by its Kodi image path, returning content type and
    /// bytes.
    pub async fn get(&self, image: &str) -> Result<(String, Vec<u8>), RpcError> {
        let url = format!("{}/image/{}", self.base_url, urlencoding::encode(image));

        let mut request = self.client.get(&url);
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RpcError::Transport(format!(
                "Failed to fetch artwork: {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?
            .to_vec();
        Ok((content_type, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::Transport;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Transport that answers every method with the same scripted value.
    struct StaticTransport(Value);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn call(
            &self,
            _method: &str,
            _params: Value,
            _cancel: &CancellationToken,
        ) -> Result<Value, RpcError> {
            Ok(self.0.clone())
        }
    }

    fn state_with(transport: StaticTransport) -> AppState {
        let kodi = Arc::new(KodiClient::with_transport(Arc::new(transport)));
        AppState::new(kodi, &KodiConfig::default())
    }

    #[tokio::test]
    async fn raw_id_zero_maps_to_not_found() {
        let state = state_with(StaticTransport(json!({})));
        let err = movie_handler(State(state), Path(0)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn status_reports_connectivity_from_ping() {
        let state = state_with(StaticTransport(json!("pong")));
        let status = status_handler(State(state)).await;
        assert!(status.connected);
        assert_eq!(status.service, "kodiview");
    }

    #[test]
    fn error_responses_use_distinct_statuses() {
        let not_found = ApiError::NotFound.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let upstream = ApiError::Rpc(RpcError::Transport("down".to_string())).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let cancelled = ApiError::Rpc(RpcError::Cancelled).into_response();
        assert_eq!(cancelled.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
