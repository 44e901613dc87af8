//! Movie library pages: the paginated listing and the detail view.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, post_json_no_response, FetchError, FetchPhase};
use crate::app::components::{
    EmptyCard, ErrorCard, Layout, LoadingCard, ResumeButton, ResumeProgress, ViewModeToggle,
};
use crate::app::prefs::{use_view_mode, ViewMode};
use crate::library::paging::{PagedAccumulator, DEFAULT_PAGE_SIZE};
use crate::library::types::{Movie, MoviePage, PlayRequest, PlayTarget};
use crate::library::LibraryId;

/// Paginated movie listing with sort and genre controls.
#[component]
pub fn Movies() -> Element {
    let mut pages = use_signal(|| PagedAccumulator::<Movie>::new(DEFAULT_PAGE_SIZE));
    let sort = use_signal(|| "title".to_string());
    let genre = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    // Bumped on every sort/filter change so a stale in-flight page is
    // dropped instead of landing in the fresh listing.
    let mut generation = use_signal(|| 0u32);
    let mut refresh_next = use_signal(|| false);
    let mut view = use_view_mode("movies", ViewMode::Grid);

    // Fetch the page at `cursor`; `refresh` additionally drops the server's
    // cached page sequence (sort or filter just changed).
    let load_page = move |cursor: u32, refresh: bool| {
        spawn(async move {
            let started_in = generation();
            loading.set(true);
            let url = format!(
                "/api/movies?start={}&sort={}&genre={}&refresh={}",
                cursor,
                sort(),
                urlencoding::encode(&genre()),
                refresh
            );
            match fetch_json::<MoviePage>(&url).await {
                Ok(page) => {
                    // A newer listing superseded this request.
                    if generation() == started_in {
                        pages.write().ingest(cursor, page.movies, page.total);
                        error.set(None);
                        refresh_next.set(false);
                    }
                }
                // Server render: leave the accumulator pending for hydration.
                Err(FetchError::Unsupported) => {}
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };

    // Sort or filter changed: restart pagination from cursor zero.
    let restart = move |_| {
        generation.set(generation() + 1);
        refresh_next.set(true);
        error.set(None);
        pages.write().reset();
    };

    // Loads the first page on mount and again after every restart.
    use_effect(move || {
        if pages.read().next_cursor() == Some(0) && !loading() {
            load_page(0, refresh_next());
        }
    });

    let items = pages.read().items();
    let total = pages.read().total();
    let next = pages.read().next_cursor();

    let listing = if let Some(message) = error() {
        rsx! {
            ErrorCard { message }
        }
    } else if items.is_empty() && (loading() || total.is_none()) {
        rsx! {
            LoadingCard { label: "Loading movies...".to_string() }
        }
    } else if items.is_empty() {
        rsx! {
            EmptyCard { message: "No movies match this listing.".to_string() }
        }
    } else {
        let loaded = items.len();
        let known_total = total.unwrap_or(loaded as u32);
        let grid = view.get() == ViewMode::Grid;
        rsx! {
            div { class: if grid { "poster-grid" } else { "media-list" },
                for movie in items {
                    MovieCard { key: "{movie.movie_id}", movie: movie.clone(), grid }
                }
            }
            p { small { "{loaded} of {known_total} movies" } }
            if next.is_some() {
                button {
                    disabled: loading(),
                    onclick: move |_| {
                        if let Some(cursor) = pages.read().next_cursor() {
                            load_page(cursor, false);
                        }
                    },
                    if loading() { "Loading..." } else { "Load more" }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Movies".to_string(),
            nav_active: "movies".to_string(),

            h1 { "Movies" }
            Toolbar { sort, genre, on_change: restart, view_mode: view.get(), on_view: move |mode| view.set(mode) }
            section { id: "movies",
                {listing}
            }
        }
    }
}

/// Sort select, genre filter and view toggle for the movie listing.
#[component]
fn Toolbar(
    sort: Signal<String>,
    genre: Signal<String>,
    on_change: EventHandler<()>,
    view_mode: ViewMode,
    on_view: EventHandler<ViewMode>,
) -> Element {
    let mut sort = sort;
    let mut genre = genre;
    rsx! {
        div { class: "toolbar",
            ViewModeToggle { mode: view_mode, on_change: move |mode| on_view.call(mode) }
            select {
                value: "{sort}",
                onchange: move |evt| {
                    sort.set(evt.value());
                    on_change.call(());
                },
                option { value: "title", "Title" }
                option { value: "year", "Year" }
                option { value: "rating", "Rating" }
                option { value: "dateadded", "Recently added" }
            }
            input {
                r#type: "text",
                placeholder: "Filter by genre",
                value: "{genre}",
                onchange: move |evt| {
                    genre.set(evt.value());
                    on_change.call(());
                },
            }
        }
    }
}

#[component]
fn MovieCard(movie: Movie, grid: bool) -> Element {
    let year = if movie.year > 0 {
        movie.year.to_string()
    } else {
        String::new()
    };

    if grid {
        rsx! {
            a { href: "/movies/{movie.movie_id}",
                article {
                    h4 { "{movie.title}" }
                    small { "{year}" }
                    ResumeProgress { resume: movie.resume }
                }
            }
        }
    } else {
        rsx! {
            article {
                div { class: "row",
                    a { href: "/movies/{movie.movie_id}", "{movie.title}" }
                    small { "{year}" }
                }
                ResumeProgress { resume: movie.resume }
            }
        }
    }
}

/// Movie detail page with resume-aware playback.
#[component]
pub fn MovieDetail(movie_id: u32) -> Element {
    let movie = use_resource(move || async move {
        match LibraryId::from_raw(movie_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Movie>(&format!("/api/movies/{id}")).await,
        }
    });

    if LibraryId::from_raw(movie_id).is_absent() {
        return rsx! {
            Layout {
                title: "Movie".to_string(),
                nav_active: "movies".to_string(),
                EmptyCard { message: "No movie selected.".to_string() }
            }
        };
    }

    let on_play = move |resume: bool| {
        spawn(async move {
            let request = PlayRequest {
                target: PlayTarget::Movie(movie_id),
                resume,
            };
            if let Err(err) = post_json_no_response("/api/play", &request).await {
                tracing::warn!(%err, "failed to start playback");
            }
        });
    };

    let content = match phase(movie.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading movie...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(movie) => {
            let genres = movie.genre.join(", ");
            let directors = movie.director.join(", ");
            let minutes = movie.runtime / 60;
            rsx! {
                article {
                    h1 { "{movie.title}" }
                    if !movie.tagline.is_empty() {
                        p { em { "{movie.tagline}" } }
                    }
                    p {
                        if movie.year > 0 {
                            small { "{movie.year} · " }
                        }
                        if minutes > 0 {
                            small { "{minutes} min · " }
                        }
                        small { "{genres}" }
                    }
                    if !directors.is_empty() {
                        p { small { "Directed by {directors}" } }
                    }
                    ResumeProgress { resume: movie.resume }
                    ResumeButton { resume: movie.resume, on_play }
                    if !movie.plot.is_empty() {
                        p { "{movie.plot}" }
                    }
                    if !movie.cast.is_empty() {
                        h3 { "Cast" }
                        ul {
                            for member in movie.cast.iter().take(8) {
                                li { "{member.name}" if !member.role.is_empty() { small { " as {member.role}" } } }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Movie".to_string(),
            nav_active: "movies".to_string(),

            p { a { href: "/movies", "← All movies" } }
            {content}
        }
    }
}
