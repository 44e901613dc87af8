//! Live TV pages: channels, recordings and timers, plus recording detail.

use chrono::NaiveDateTime;
use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, post_json_no_response, FetchError, FetchPhase};
use crate::app::components::{
    EmptyCard, ErrorCard, Layout, LoadingCard, ResumeButton, ResumeProgress,
};
use crate::library::types::{Channel, PlayRequest, PlayTarget, Recording, Timer};
use crate::library::LibraryId;

fn start_playback(target: PlayTarget, resume: bool) {
    spawn(async move {
        let request = PlayRequest { target, resume };
        if let Err(err) = post_json_no_response("/api/play", &request).await {
            tracing::warn!(%err, "failed to start playback");
        }
    });
}

fn format_when(when: Option<NaiveDateTime>) -> String {
    when.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Live TV overview: channels, recordings, timers.
#[component]
pub fn LiveTv() -> Element {
    let channels =
        use_resource(|| async { fetch_json::<Vec<Channel>>("/api/livetv/channels").await });
    let recordings =
        use_resource(|| async { fetch_json::<Vec<Recording>>("/api/livetv/recordings").await });
    let timers = use_resource(|| async { fetch_json::<Vec<Timer>>("/api/livetv/timers").await });

    let channel_content = match phase(channels.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading channels...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(channels) if channels.is_empty() => rsx! {
            EmptyCard { message: "No TV channels available.".to_string() }
        },
        FetchPhase::Ready(channels) => rsx! {
            div { class: "media-list",
                for channel in channels.iter().filter(|c| !c.hidden) {
                    ChannelRow { key: "{channel.channel_id}", channel: channel.clone() }
                }
            }
        },
    };

    let recording_content = match phase(recordings.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading recordings...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(recordings) if recordings.is_empty() => rsx! {
            EmptyCard { message: "No recordings yet.".to_string() }
        },
        FetchPhase::Ready(recordings) => rsx! {
            div { class: "media-list",
                for recording in recordings {
                    RecordingRow { key: "{recording.recording_id}", recording: recording.clone() }
                }
            }
        },
    };

    let timer_content = match phase(timers.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading timers...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(timers) if timers.is_empty() => rsx! {
            EmptyCard { message: "No scheduled recordings.".to_string() }
        },
        FetchPhase::Ready(timers) => rsx! {
            div { class: "media-list",
                for timer in timers {
                    TimerRow { key: "{timer.timer_id}", timer: timer.clone() }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: "Live TV".to_string(),
            nav_active: "live-tv".to_string(),

            h1 { "Live TV" }
            section { id: "channels",
                h2 { "Channels" }
                {channel_content}
            }
            section { id: "recordings",
                h2 { "Recordings" }
                {recording_content}
            }
            section { id: "timers",
                h2 { "Timers" }
                {timer_content}
            }
        }
    }
}

#[component]
fn ChannelRow(channel: Channel) -> Element {
    let channel_id = channel.channel_id;
    rsx! {
        article {
            div { class: "row",
                span {
                    "{channel.name}"
                    if channel.locked {
                        small { " 🔒" }
                    }
                }
                button {
                    class: "secondary",
                    onclick: move |_| start_playback(PlayTarget::Channel(channel_id), false),
                    "▶ Tune"
                }
            }
        }
    }
}

#[component]
fn RecordingRow(recording: Recording) -> Element {
    let when = format_when(recording.start_time);
    rsx! {
        article {
            div { class: "row",
                a { href: "/live-tv/recordings/{recording.recording_id}", "{recording.title}" }
                small { "{recording.channel} {when}" }
            }
            ResumeProgress { resume: recording.resume }
        }
    }
}

#[component]
fn TimerRow(timer: Timer) -> Element {
    let when = format_when(timer.start_time);
    rsx! {
        article {
            div { class: "row",
                span { "{timer.title}" }
                small { "{when} · {timer.state}" }
            }
        }
    }
}

/// Recording detail page with resume-aware playback.
#[component]
pub fn RecordingDetail(recording_id: u32) -> Element {
    let recording = use_resource(move || async move {
        match LibraryId::from_raw(recording_id).get() {
            None => Err(FetchError::Unsupported),
            Some(id) => fetch_json::<Recording>(&format!("/api/livetv/recordings/{id}")).await,
        }
    });

    if LibraryId::from_raw(recording_id).is_absent() {
        return rsx! {
            Layout {
                title: "Recording".to_string(),
                nav_active: "live-tv".to_string(),
                EmptyCard { message: "No recording selected.".to_string() }
            }
        };
    }

    let on_play = move |resume: bool| {
        start_playback(PlayTarget::Recording(recording_id), resume);
    };

    let content = match phase(recording.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading recording...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(recording) => {
            let start = format_when(recording.start_time);
            let end = format_when(recording.end_time);
            let minutes = recording.runtime / 60;
            rsx! {
                article {
                    h1 { "{recording.title}" }
                    p {
                        if !recording.channel.is_empty() {
                            small { "{recording.channel} · " }
                        }
                        if !start.is_empty() {
                            small { "{start} – {end} · " }
                        }
                        if minutes > 0 {
                            small { "{minutes} min" }
                        }
                    }
                    ResumeProgress { resume: recording.resume }
                    ResumeButton { resume: recording.resume, on_play }
                    if !recording.plot.is_empty() {
                        p { "{recording.plot}" }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Recording".to_string(),
            nav_active: "live-tv".to_string(),

            p { a { href: "/live-tv", "← Live TV" } }
            {content}
        }
    }
}
