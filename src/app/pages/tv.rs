//! TV library pages: shows, show detail, season episodes, episode detail.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, post_json_no_response, FetchError, FetchPhase};
use crate::app::components::{
    EmptyCard, ErrorCard, Layout, LoadingCard, ResumeButton, ResumeProgress, ViewModeToggle,
};
use crate::app::prefs::{use_view_mode, ViewMode};
use crate::library::types::{Episode, PlayRequest, PlayTarget, Season, TvShow};
use crate::library::LibraryId;

/// TV shows listing page component.
#[component]
pub fn TvShows() -> Element {
    let shows = use_resource(|| async { fetch_json::<Vec<TvShow>>("/api/tv").await });
    let mut view = use_view_mode("tvshows", ViewMode::Grid);

    let content = match phase(shows.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading shows...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(shows) if shows.is_empty() => rsx! {
            EmptyCard { message: "No TV shows in the library.".to_string() }
        },
        FetchPhase::Ready(shows) => {
            let grid = view.get() == ViewMode::Grid;
            rsx! {
                div { class: if grid { "poster-grid" } else { "media-list" },
                    for show in shows {
                        ShowCard { key: "{show.tvshow_id}", show: show.clone() }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "TV".to_string(),
            nav_active: "tv".to_string(),

            h1 { "TV Shows" }
            div { class: "toolbar",
                ViewModeToggle {
                    mode: view.get(),
                    on_change: move |mode| view.set(mode),
                }
            }
            section { id: "shows",
                {content}
            }
        }
    }
}

#[component]
fn ShowCard(show: TvShow) -> Element {
    rsx! {
        a { href: "/tv/{show.tvshow_id}",
            article {
                h4 { "{show.title}" }
                small { "{show.watched_episodes}/{show.episode} watched" }
            }
        }
    }
}

/// TV show detail page: plot plus the season listing.
#[component]
pub fn TvShowDetail(tvshow_id: u32) -> Element {
    let show = use_resource(move || async move {
        match LibraryId::from_raw(tvshow_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<TvShow>(&format!("/api/tv/{id}")).await,
        }
    });
    let seasons = use_resource(move || async move {
        match LibraryId::from_raw(tvshow_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Vec<Season>>(&format!("/api/tv/{id}/seasons")).await,
        }
    });

    if LibraryId::from_raw(tvshow_id).is_absent() {
        return rsx! {
            Layout {
                title: "Show".to_string(),
                nav_active: "tv".to_string(),
                EmptyCard { message: "No show selected.".to_string() }
            }
        };
    }

    let header = match phase(show.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading show...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(show) => {
            let genres = show.genre.join(", ");
            let studios = show.studio.join(", ");
            rsx! {
                article {
                    h1 { "{show.title}" }
                    p {
                        if show.year > 0 {
                            small { "{show.year} · " }
                        }
                        if !show.mpaa.is_empty() {
                            small { "{show.mpaa} · " }
                        }
                        small { "{genres}" }
                    }
                    if !studios.is_empty() {
                        p { small { "{studios}" } }
                    }
                    p { small { "{show.watched_episodes}/{show.episode} episodes watched" } }
                    if !show.plot.is_empty() {
                        p { "{show.plot}" }
                    }
                }
            }
        }
    };

    let season_content = match phase(seasons.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading seasons...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(seasons) if seasons.is_empty() => rsx! {
            EmptyCard { message: "No seasons for this show.".to_string() }
        },
        FetchPhase::Ready(seasons) => rsx! {
            div { class: "media-list",
                for season in seasons {
                    SeasonRow { key: "{season.season}", tvshow_id, season: season.clone() }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: "Show".to_string(),
            nav_active: "tv".to_string(),

            p { a { href: "/tv", "← All shows" } }
            {header}
            section { id: "seasons",
                h2 { "Seasons" }
                {season_content}
            }
        }
    }
}

#[component]
fn SeasonRow(tvshow_id: u32, season: Season) -> Element {
    // Season 0 is the specials season, a real value rather than a missing id.
    let label = if season.season == 0 {
        "Specials".to_string()
    } else {
        format!("Season {}", season.season)
    };
    rsx! {
        article {
            div { class: "row",
                a { href: "/tv/{tvshow_id}/{season.season}", "{label}" }
                small { "{season.watched_episodes}/{season.episode} watched" }
            }
        }
    }
}

/// Episode listing for one season.
#[component]
pub fn SeasonDetail(tvshow_id: u32, season: i32) -> Element {
    let episodes = use_resource(move || async move {
        match LibraryId::from_raw(tvshow_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => {
                fetch_json::<Vec<Episode>>(&format!("/api/tv/{id}/episodes?season={season}")).await
            }
        }
    });

    if LibraryId::from_raw(tvshow_id).is_absent() {
        return rsx! {
            Layout {
                title: "Season".to_string(),
                nav_active: "tv".to_string(),
                EmptyCard { message: "No show selected.".to_string() }
            }
        };
    }

    let title = if season == 0 {
        "Specials".to_string()
    } else {
        format!("Season {season}")
    };

    let content = match phase(episodes.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading episodes...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(episodes) if episodes.is_empty() => rsx! {
            EmptyCard { message: "No episodes in this season.".to_string() }
        },
        FetchPhase::Ready(episodes) => rsx! {
            div { class: "media-list",
                for episode in episodes {
                    EpisodeRow {
                        key: "{episode.episode_id}",
                        tvshow_id,
                        season,
                        episode: episode.clone(),
                    }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: title.clone(),
            nav_active: "tv".to_string(),

            p { a { href: "/tv/{tvshow_id}", "← Seasons" } }
            h1 { "{title}" }
            section { id: "episodes",
                {content}
            }
        }
    }
}

#[component]
fn EpisodeRow(tvshow_id: u32, season: i32, episode: Episode) -> Element {
    rsx! {
        article {
            div { class: "row",
                a { href: "/tv/{tvshow_id}/{season}/{episode.episode_id}",
                    "{episode.episode}. {episode.title}"
                }
                small { "{episode.first_aired}" }
            }
            ResumeProgress { resume: episode.resume }
        }
    }
}

/// Episode detail page with resume-aware playback.
#[component]
pub fn EpisodeDetail(tvshow_id: u32, season: i32, episode_id: u32) -> Element {
    let episode = use_resource(move || async move {
        match LibraryId::from_raw(episode_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Episode>(&format!("/api/episodes/{id}")).await,
        }
    });

    if LibraryId::from_raw(episode_id).is_absent() {
        return rsx! {
            Layout {
                title: "Episode".to_string(),
                nav_active: "tv".to_string(),
                EmptyCard { message: "No episode selected.".to_string() }
            }
        };
    }

    let on_play = move |resume: bool| {
        spawn(async move {
            let request = PlayRequest {
                target: PlayTarget::Episode(episode_id),
                resume,
            };
            if let Err(err) = post_json_no_response("/api/play", &request).await {
                tracing::warn!(%err, "failed to start playback");
            }
        });
    };

    let content = match phase(episode.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading episode...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(episode) => {
            let minutes = episode.runtime / 60;
            rsx! {
                article {
                    h1 { "{episode.title}" }
                    p {
                        small { "{episode.show_title} · " }
                        if episode.season == 0 {
                            small { "Specials, episode {episode.episode}" }
                        } else {
                            small { "S{episode.season:02}E{episode.episode:02}" }
                        }
                    }
                    p {
                        if !episode.first_aired.is_empty() {
                            small { "Aired {episode.first_aired} · " }
                        }
                        if minutes > 0 {
                            small { "{minutes} min" }
                        }
                    }
                    ResumeProgress { resume: episode.resume }
                    ResumeButton { resume: episode.resume, on_play }
                    if !episode.plot.is_empty() {
                        p { "{episode.plot}" }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Episode".to_string(),
            nav_active: "tv".to_string(),

            p { a { href: "/tv/{tvshow_id}/{season}", "← Episodes" } }
            {content}
        }
    }
}
