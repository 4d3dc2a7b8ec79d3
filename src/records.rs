//! Records rendered by the player UI and their template fields.
//!
//! Each record kind exposes a fixed set of single-character field keys:
//!
//! | Record      | Keys                                                   |
//! |-------------|--------------------------------------------------------|
//! | directory   | `p` path, `n` name                                     |
//! | track       | `p` path, `a` artist, `b` album, `t` title, `n` number, `l` length |
//! | status      | track keys plus `o` elapsed position                   |
//! | title       | `p` current browser path                               |
//!
//! Records deserialize from JSON tagged by `kind`, which is what the CLI reads
//! from stdin.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::utils::{format_duration, sanitize_for_terminal};

/// Directory shown in the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirEntry {
    pub path: String,
    pub name: String,
}

/// Track shown in the browser or the status line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub path: String,
    pub artist: String,
    pub album: String,
    pub title: String,
    /// Position on the album, if tagged
    pub number: Option<u32>,
    /// Length in seconds
    #[serde(rename = "length")]
    pub length_secs: u64,
}

impl Track {
    pub fn length(&self) -> Duration {
        Duration::from_secs(self.length_secs)
    }
}

/// One row of the directory browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Dir(DirEntry),
    Track(Track),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Player state shown in the status line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub track: Option<Track>,
    /// Elapsed position in seconds
    #[serde(rename = "position")]
    pub position_secs: u64,
}

/// Any record the CLI can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Dir(DirEntry),
    Track(Track),
    Status(PlaybackStatus),
    Title { path: String },
}

impl Record {
    /// Field map for this record.
    pub fn fields(&self, sanitize: bool) -> HashMap<char, String> {
        let builder = Fields::new().sanitize(sanitize);
        let builder = match self {
            Record::Dir(dir) => builder.dir(dir),
            Record::Track(track) => builder.track(track),
            Record::Status(status) => builder.status(status),
            Record::Title { path } => builder.title(path),
        };
        builder.build()
    }
}

/// Builder for the field map handed to a [`crate::Formatter`].
///
/// Empty values are not inserted; the formatter renders missing keys as
/// empty strings anyway.
///
/// # Example
///
/// ```
/// use linefmt::records::Fields;
///
/// let fields = Fields::new()
///     .set('a', "Kino")
///     .set('t', "Gruppa krovi")
///     .build();
/// assert_eq!(fields[&'a'], "Kino");
/// ```
#[derive(Debug, Default)]
pub struct Fields {
    values: HashMap<char, String>,
    sanitize: bool,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip control characters from values set after this call.
    pub fn sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    /// Set a field directly
    pub fn set(mut self, key: char, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        let value = if self.sanitize {
            sanitize_for_terminal(&value)
        } else {
            value
        };
        self.values.insert(key, value);
        self
    }

    /// Set directory fields (`p`, `n`)
    pub fn dir(self, dir: &DirEntry) -> Self {
        self.set('p', dir.path.as_str()).set('n', dir.name.as_str())
    }

    /// Set track fields (`p`, `a`, `b`, `t`, `n`, `l`)
    pub fn track(self, track: &Track) -> Self {
        let builder = self
            .set('p', track.path.as_str())
            .set('a', track.artist.as_str())
            .set('b', track.album.as_str())
            .set('t', track.title.as_str())
            .set('l', format_duration(track.length()));
        match track.number {
            Some(n) => builder.set('n', n.to_string()),
            None => builder,
        }
    }

    /// Set status fields: the current track's fields plus `o`.
    ///
    /// A stopped player has no track, so only `o` is set.
    pub fn status(self, status: &PlaybackStatus) -> Self {
        let builder = match &status.track {
            Some(track) => self.track(track),
            None => self,
        };
        builder.set('o', format_duration(Duration::from_secs(status.position_secs)))
    }

    /// Set title fields (`p`)
    pub fn title(self, path: &str) -> Self {
        self.set('p', path)
    }

    pub fn entry(self, entry: &Entry) -> Self {
        match entry {
            Entry::Dir(dir) => self.dir(dir),
            Entry::Track(track) => self.track(track),
        }
    }

    pub fn build(self) -> HashMap<char, String> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track {
            path: "/music/kino/01.flac".to_string(),
            artist: "Kino".to_string(),
            album: "Gruppa krovi".to_string(),
            title: "Gruppa krovi".to_string(),
            number: Some(1),
            length_secs: 287,
        }
    }

    #[test]
    fn test_dir_fields() {
        let dir = DirEntry {
            path: "/music/kino".to_string(),
            name: "kino".to_string(),
        };
        let fields = Fields::new().dir(&dir).build();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[&'p'], "/music/kino");
        assert_eq!(fields[&'n'], "kino");
    }

    #[test]
    fn test_track_fields() {
        let fields = Fields::new().track(&track()).build();
        assert_eq!(fields[&'a'], "Kino");
        assert_eq!(fields[&'n'], "1");
        assert_eq!(fields[&'l'], "4:47");
    }

    #[test]
    fn test_empty_values_skipped() {
        let t = Track {
            number: None,
            ..Default::default()
        };
        let fields = Fields::new().track(&t).build();
        assert!(!fields.contains_key(&'a'));
        assert!(!fields.contains_key(&'n'));
        assert_eq!(fields[&'l'], "0:00");
    }

    #[test]
    fn test_status_fields() {
        let status = PlaybackStatus {
            state: PlaybackState::Playing,
            track: Some(track()),
            position_secs: 61,
        };
        let fields = Fields::new().status(&status).build();
        assert_eq!(fields[&'o'], "1:01");
        assert_eq!(fields[&'t'], "Gruppa krovi");
    }

    #[test]
    fn test_sanitize() {
        let fields = Fields::new().sanitize(true).set('t', "a\x1b[1mb\n").build();
        assert_eq!(fields[&'t'], "ab");
        let fields = Fields::new().set('t', "a\nb").build();
        assert_eq!(fields[&'t'], "a\nb");
    }

    #[test]
    fn test_record_from_json() {
        let record: Record = serde_json::from_str(
            r#"{"kind": "track", "artist": "Kino", "title": "Kukushka", "length": 400}"#,
        )
        .unwrap();
        let fields = record.fields(true);
        assert_eq!(fields[&'a'], "Kino");
        assert_eq!(fields[&'l'], "6:40");

        let record: Record =
            serde_json::from_str(r#"{"kind": "status", "state": "paused", "position": 5}"#)
                .unwrap();
        assert_eq!(
            record,
            Record::Status(PlaybackStatus {
                state: PlaybackState::Paused,
                track: None,
                position_secs: 5,
            })
        );

        let record: Record =
            serde_json::from_str(r#"{"kind": "title", "path": "/music"}"#).unwrap();
        assert_eq!(record.fields(false)[&'p'], "/music");
    }
}
