//! Playback resume widgets.

use dioxus::prelude::*;

use crate::library::types::Resume;

/// Progress bar plus accessible label for a partially watched item.
/// Renders nothing when there is no meaningful resume point.
#[component]
pub fn ResumeProgress(resume: Resume) -> Element {
    if !resume.in_progress() {
        return rsx! {};
    }
    let percent = resume.watched_percent();
    let label = format!("{percent}% watched");

    rsx! {
        div { class: "resume",
            div {
                class: "progress-outer",
                role: "progressbar",
                aria_label: "{label}",
                aria_valuenow: "{percent}",
                aria_valuemin: "0",
                aria_valuemax: "100",
                div { class: "progress-inner", style: "width: {percent}%;" }
            }
            small { "{label}" }
        }
    }
}

/// Play button that offers to resume when a resume point exists.
#[component]
pub fn ResumeButton(resume: Resume, on_play: EventHandler<bool>) -> Element {
    if !resume.in_progress() {
        return rsx! {
            button { onclick: move |_| on_play.call(false), "▶ Play" }
        };
    }
    let from = format_position(resume.position);

    rsx! {
        div { class: "controls",
            button { onclick: move |_| on_play.call(true), "▶ Resume from {from}" }
            button { class: "secondary", onclick: move |_| on_play.call(false), "Play from start" }
        }
    }
}

/// `h:mm:ss` for positions an hour or longer, `m:ss` below that.
fn format_position(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_format_as_clock_times() {
        assert_eq!(format_position(30.0), "0:30");
        assert_eq!(format_position(754.0), "12:34");
        assert_eq!(format_position(3671.0), "1:01:11");
        assert_eq!(format_position(-3.0), "0:00");
    }

    #[test]
    fn quarter_watched_labels_as_25_percent() {
        let resume = Resume {
            position: 30.0,
            total: 120.0,
        };
        assert_eq!(format!("{}% watched", resume.watched_percent()), "25% watched");
    }
}
