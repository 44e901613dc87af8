//! Dioxus fullstack page components.
//!
//! Every data-bearing page renders four distinct states: loading, error,
//! empty and content. Errors are never swallowed into an empty view.

mod home;
mod livetv;
mod movies;
mod music;
mod search;
mod settings;
mod tv;

pub use home::Home;
pub use livetv::{LiveTv, RecordingDetail};
pub use movies::{MovieDetail, Movies};
pub use music::{AlbumDetail, ArtistDetail, Music};
pub use search::Search;
pub use settings::Settings;
pub use tv::{EpisodeDetail, SeasonDetail, TvShowDetail, TvShows};
