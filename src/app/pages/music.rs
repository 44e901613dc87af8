//! Music library pages: artists, artist detail, album detail.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, FetchError, FetchPhase};
use crate::app::components::{EmptyCard, ErrorCard, Layout, LoadingCard, ViewModeToggle};
use crate::app::prefs::{use_view_mode, ViewMode};
use crate::library::types::{Album, Artist};
use crate::library::LibraryId;

/// Artists listing page component.
#[component]
pub fn Music() -> Element {
    let artists = use_resource(|| async { fetch_json::<Vec<Artist>>("/api/music/artists").await });
    let mut view = use_view_mode("artists", ViewMode::Grid);

    let content = match phase(artists.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading artists...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(artists) if artists.is_empty() => rsx! {
            EmptyCard { message: "No artists in the library.".to_string() }
        },
        FetchPhase::Ready(artists) => match view.get() {
            ViewMode::Grid => rsx! {
                div { class: "poster-grid",
                    for artist in artists {
                        ArtistCard { key: "{artist.artist_id}", artist: artist.clone() }
                    }
                }
            },
            ViewMode::List => rsx! {
                div { class: "media-list",
                    for artist in artists {
                        ArtistRow { key: "{artist.artist_id}", artist: artist.clone() }
                    }
                }
            },
        },
    };

    rsx! {
        Layout {
            title: "Music".to_string(),
            nav_active: "music".to_string(),

            h1 { "Music" }
            div { class: "toolbar",
                ViewModeToggle {
                    mode: view.get(),
                    on_change: move |mode| view.set(mode),
                }
            }
            section { id: "artists",
                {content}
            }
        }
    }
}

#[component]
fn ArtistCard(artist: Artist) -> Element {
    let genres = artist.genre.join(", ");
    rsx! {
        a { href: "/music/{artist.artist_id}",
            article {
                h4 { "{artist.name}" }
                small { "{genres}" }
            }
        }
    }
}

#[component]
fn ArtistRow(artist: Artist) -> Element {
    let genres = artist.genre.join(", ");
    rsx! {
        article {
            div { class: "row",
                a { href: "/music/{artist.artist_id}", "{artist.name}" }
                small { "{genres}" }
            }
        }
    }
}

/// Artist detail page: biography plus album listing.
#[component]
pub fn ArtistDetail(artist_id: u32) -> Element {
    // A raw id of 0 in the path means "nothing selected": the queries stay
    // disabled and never touch the network.
    let artist = use_resource(move || async move {
        match LibraryId::from_raw(artist_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Artist>(&format!("/api/music/artists/{id}")).await,
        }
    });
    let albums = use_resource(move || async move {
        match LibraryId::from_raw(artist_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Vec<Album>>(&format!("/api/music/artists/{id}/albums")).await,
        }
    });

    if LibraryId::from_raw(artist_id).is_absent() {
        return rsx! {
            Layout {
                title: "Artist".to_string(),
                nav_active: "music".to_string(),
                EmptyCard { message: "No artist selected.".to_string() }
            }
        };
    }

    let header = match phase(artist.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading artist...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(artist) => {
            let genres = artist.genre.join(", ");
            rsx! {
                article {
                    h1 { "{artist.name}" }
                    if !genres.is_empty() {
                        p { small { "{genres}" } }
                    }
                    if !artist.formed.is_empty() {
                        p { small { "Formed {artist.formed}" } }
                    }
                    if !artist.description.is_empty() {
                        p { "{artist.description}" }
                    }
                }
            }
        }
    };

    let album_content = match phase(albums.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading albums...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(albums) if albums.is_empty() => rsx! {
            EmptyCard { message: "No albums for this artist.".to_string() }
        },
        FetchPhase::Ready(albums) => rsx! {
            div { class: "poster-grid",
                for album in albums {
                    AlbumCard {
                        key: "{album.album_id}",
                        artist_id,
                        album: album.clone(),
                    }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: "Artist".to_string(),
            nav_active: "music".to_string(),

            p { a { href: "/music", "← All artists" } }
            {header}
            section { id: "albums",
                h2 { "Albums" }
                {album_content}
            }
        }
    }
}

#[component]
fn AlbumCard(artist_id: u32, album: Album) -> Element {
    rsx! {
        a { href: "/music/{artist_id}/{album.album_id}",
            article {
                h4 { "{album.title}" }
                if album.year > 0 {
                    small { "{album.year}" }
                }
            }
        }
    }
}

/// Album detail page.
#[component]
pub fn AlbumDetail(artist_id: u32, album_id: u32) -> Element {
    let album = use_resource(move || async move {
        match LibraryId::from_raw(album_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Album>(&format!("/api/music/albums/{id}")).await,
        }
    });

    if LibraryId::from_raw(album_id).is_absent() {
        return rsx! {
            Layout {
                title: "Album".to_string(),
                nav_active: "music".to_string(),
                EmptyCard { message: "No album selected.".to_string() }
            }
        };
    }

    let content = match phase(album.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading album...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(album) => {
            let artists = album.artist.join(", ");
            let genres = album.genre.join(", ");
            rsx! {
                article {
                    h1 { "{album.title}" }
                    p { "{artists}" }
                    p {
                        if album.year > 0 {
                            small { "{album.year} · " }
                        }
                        if !genres.is_empty() {
                            small { "{genres} · " }
                        }
                        if !album.album_label.is_empty() {
                            small { "{album.album_label}" }
                        }
                    }
                    if album.rating > 0.0 {
                        p { small { "Rated {album.rating:.1}" } }
                    }
                    if !album.description.is_empty() {
                        p { "{album.description}" }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Album".to_string(),
            nav_active: "music".to_string(),

            p { a { href: "/music/{artist_id}", "← Artist" } }
            {content}
        }
    }
}
