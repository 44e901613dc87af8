//! Fixed property selections requested per entity type.
//!
//! Kodi returns only the properties you ask for. Each operation requests
//! the same set on every call so responses stay interchangeable under one
//! cache key.

pub const ALBUM: &[&str] = &[
    "title",
    "artist",
    "artistid",
    "year",
    "genre",
    "thumbnail",
    "playcount",
    "rating",
    "albumlabel",
    "description",
];

/// Lighter set for album listings under an artist.
pub const ALBUM_LIST: &[&str] = &["title", "artist", "artistid", "year", "thumbnail", "playcount"];

pub const ARTIST: &[&str] = &[
    "description",
    "genre",
    "thumbnail",
    "formed",
    "disbanded",
    "yearsactive",
    "style",
];

/// Lighter set for the artists listing and search results.
pub const ARTIST_LIST: &[&str] = &["genre", "thumbnail"];

pub const MOVIE: &[&str] = &[
    "title",
    "year",
    "rating",
    "runtime",
    "genre",
    "director",
    "tagline",
    "plot",
    "playcount",
    "premiered",
    "thumbnail",
    "fanart",
    "file",
    "cast",
    "resume",
];

/// Lighter set for the paginated movie grid and search results.
pub const MOVIE_LIST: &[&str] = &[
    "title",
    "year",
    "rating",
    "runtime",
    "genre",
    "playcount",
    "thumbnail",
    "resume",
];

pub const TVSHOW: &[&str] = &[
    "title",
    "year",
    "rating",
    "plot",
    "studio",
    "mpaa",
    "genre",
    "episode",
    "watchedepisodes",
    "premiered",
    "thumbnail",
    "fanart",
];

/// Lighter set for the show listing.
pub const TVSHOW_LIST: &[&str] = &[
    "title",
    "year",
    "rating",
    "genre",
    "episode",
    "watchedepisodes",
    "thumbnail",
];

pub const SEASON: &[&str] = &[
    "season",
    "showtitle",
    "playcount",
    "episode",
    "watchedepisodes",
    "thumbnail",
];

pub const EPISODE: &[&str] = &[
    "title",
    "plot",
    "rating",
    "firstaired",
    "playcount",
    "runtime",
    "season",
    "episode",
    "showtitle",
    "thumbnail",
    "resume",
    "file",
];

/// Lighter set for the episodes listing of a season.
pub const EPISODE_LIST: &[&str] = &[
    "title",
    "firstaired",
    "playcount",
    "runtime",
    "season",
    "episode",
    "thumbnail",
    "resume",
];

pub const CHANNEL: &[&str] = &["channel", "channeltype", "hidden", "locked", "thumbnail"];

pub const RECORDING: &[&str] = &[
    "title",
    "channel",
    "starttime",
    "endtime",
    "plot",
    "runtime",
    "resume",
];

pub const TIMER: &[&str] = &["title", "summary", "channelid", "starttime", "endtime", "state"];
