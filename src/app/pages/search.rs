//! Library search page.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, FetchPhase};
use crate::app::components::{EmptyCard, ErrorCard, Layout, LoadingCard};
use crate::library::types::SearchResults;

/// Free-text search across movies, artists and albums.
#[component]
pub fn Search() -> Element {
    let mut query = use_signal(String::new);
    let mut submitted = use_signal(String::new);

    // Re-runs whenever a new query is submitted.
    let results = use_resource(move || async move {
        let needle = submitted();
        if needle.trim().is_empty() {
            return Ok(SearchResults::default());
        }
        fetch_json::<SearchResults>(&format!("/api/search?q={}", urlencoding::encode(&needle)))
            .await
    });

    let searching = !submitted().trim().is_empty();

    let content = match phase(results.read().clone()) {
        FetchPhase::Loading if searching => rsx! {
            LoadingCard { label: "Searching...".to_string() }
        },
        FetchPhase::Loading => rsx! {
            EmptyCard { message: "Type something to search the library.".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(_) if !searching => rsx! {
            EmptyCard { message: "Type something to search the library.".to_string() }
        },
        FetchPhase::Ready(results) if results.is_empty() => rsx! {
            EmptyCard { message: "Nothing in the library matches.".to_string() }
        },
        FetchPhase::Ready(results) => rsx! {
            if !results.movies.is_empty() {
                section {
                    h2 { "Movies" }
                    div { class: "media-list",
                        for movie in results.movies {
                            article {
                                key: "{movie.movie_id}",
                                div { class: "row",
                                    a { href: "/movies/{movie.movie_id}", "{movie.title}" }
                                    if movie.year > 0 {
                                        small { "{movie.year}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if !results.artists.is_empty() {
                section {
                    h2 { "Artists" }
                    div { class: "media-list",
                        for artist in results.artists {
                            article {
                                key: "{artist.artist_id}",
                                div { class: "row",
                                    a { href: "/music/{artist.artist_id}", "{artist.name}" }
                                }
                            }
                        }
                    }
                }
            }
            if !results.albums.is_empty() {
                section {
                    h2 { "Albums" }
                    div { class: "media-list",
                        for album in results.albums {
                            article {
                                key: "{album.album_id}",
                                div { class: "row",
                                    span { "{album.title}" }
                                    if album.year > 0 {
                                        small { "{album.year}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: "Search".to_string(),
            nav_active: "search".to_string(),

            h1 { "Search" }
            div { class: "toolbar",
                input {
                    r#type: "search",
                    placeholder: "Titles, artists, albums...",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            submitted.set(query());
                        }
                    },
                }
                button {
                    onclick: move |_| submitted.set(query()),
                    "Search"
                }
            }
            section { id: "results",
                {content}
            }
        }
    }
}
