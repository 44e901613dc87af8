//! Dioxus fullstack application entry point.
//!
//! This module provides the main App component that serves as the root
//! of the Dioxus application with client-side hydration.

use dioxus::prelude::*;

pub mod api;
pub mod components;
pub mod pages;
pub mod prefs;

use pages::{
    AlbumDetail, ArtistDetail, EpisodeDetail, Home, LiveTv, MovieDetail, Movies, Music,
    RecordingDetail, Search, SeasonDetail, Settings, TvShowDetail, TvShows,
};

/// Root app component with routing
#[component]
pub fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

/// Application routes; path segments map 1:1 to page components.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/music")]
    Music {},
    #[route("/music/:artist_id")]
    ArtistDetail { artist_id: u32 },
    #[route("/music/:artist_id/:album_id")]
    AlbumDetail { artist_id: u32, album_id: u32 },
    #[route("/movies")]
    Movies {},
    #[route("/movies/:movie_id")]
    MovieDetail { movie_id: u32 },
    #[route("/tv")]
    TvShows {},
    #[route("/tv/:tvshow_id")]
    TvShowDetail { tvshow_id: u32 },
    #[route("/tv/:tvshow_id/:season")]
    SeasonDetail { tvshow_id: u32, season: i32 },
    #[route("/tv/:tvshow_id/:season/:episode_id")]
    EpisodeDetail {
        tvshow_id: u32,
        season: i32,
        episode_id: u32,
    },
    #[route("/live-tv")]
    LiveTv {},
    #[route("/live-tv/recordings/:recording_id")]
    RecordingDetail { recording_id: u32 },
    #[route("/search")]
    Search {},
    #[route("/settings")]
    Settings {},
}
