//! Formatters for each display surface of the player.
//!
//! A [`Layout`] owns one [`Formatter`] per surface so every surface keeps its
//! own resolved-width cache. Formatters need `&mut self`; callers that render
//! from more than one thread wrap the layout in a mutex.

use crate::config::FormatConfig;
use crate::error::{LinefmtError, Result};
use crate::formatter::Formatter;
use crate::records::{Entry, Fields, PlaybackState, PlaybackStatus};

/// Display surfaces a template can be selected for.
pub const SURFACES: [&str; 6] = [
    "browser_dir",
    "browser_track",
    "status_playing",
    "status_paused",
    "status_stopped",
    "title",
];

#[derive(Debug, Clone)]
pub struct Layout {
    browser_dir: Formatter,
    browser_track: Formatter,
    status_playing: Formatter,
    status_paused: Formatter,
    status_stopped: Formatter,
    title: Formatter,
    sanitize: bool,
}

impl Layout {
    /// Build a layout from configuration, validating every template.
    pub fn from_config(config: &FormatConfig) -> Result<Self> {
        let checked = |key: &str, template: &str| {
            Formatter::checked(template).map_err(|e| LinefmtError::config_template(key, e))
        };

        Ok(Self {
            browser_dir: checked("browser_dir", &config.browser_dir)?,
            browser_track: checked("browser_track", &config.browser_track)?,
            status_playing: checked("status_playing", &config.status_playing)?,
            status_paused: checked("status_paused", &config.status_paused)?,
            status_stopped: checked("status_stopped", &config.status_stopped)?,
            title: checked("title", &config.title)?,
            sanitize: true,
        })
    }

    /// Whether field values are stripped of control characters (default on).
    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    fn fields(&self) -> Fields {
        Fields::new().sanitize(self.sanitize)
    }

    /// Render one browser row.
    pub fn render_entry(&mut self, entry: &Entry, width: usize) -> String {
        let data = self.fields().entry(entry).build();
        let formatter = match entry {
            Entry::Dir(_) => &mut self.browser_dir,
            Entry::Track(_) => &mut self.browser_track,
        };
        formatter.format(&data, width)
    }

    /// Render the status line with the template for the current state.
    pub fn render_status(&mut self, status: &PlaybackStatus, width: usize) -> String {
        let data = self.fields().status(status).build();
        let formatter = match status.state {
            PlaybackState::Playing => &mut self.status_playing,
            PlaybackState::Paused => &mut self.status_paused,
            PlaybackState::Stopped => &mut self.status_stopped,
        };
        formatter.format(&data, width)
    }

    /// Render the title line for the directory being browsed.
    pub fn render_title(&mut self, path: &str, width: usize) -> String {
        let data = self.fields().title(path).build();
        self.title.format(&data, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::records::{DirEntry, Track};

    fn track() -> Track {
        Track {
            artist: "Aquarium".to_string(),
            title: "Rock-n-roll".to_string(),
            length_secs: 185,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_dir_entry() {
        let mut layout = Layout::from_config(&FormatConfig::default()).unwrap();
        let entry = Entry::Dir(DirEntry {
            path: "/music/aquarium".to_string(),
            name: "aquarium".to_string(),
        });
        assert_eq!(layout.render_entry(&entry, 12), "aquarium/   ");
    }

    #[test]
    fn test_render_track_entry() {
        let mut layout = Layout::from_config(&FormatConfig::default()).unwrap();
        let line = layout.render_entry(&Entry::Track(track()), 30);
        // 80% / 20% of 30 columns.
        assert_eq!(line, "Aquarium - Rock-n-roll    3:05");
    }

    #[test]
    fn test_render_status_by_state() {
        let mut layout = Layout::from_config(&FormatConfig::default()).unwrap();
        let mut status = PlaybackStatus {
            state: PlaybackState::Playing,
            track: Some(track()),
            position_secs: 42,
        };
        // Two halves of 29 columns between the padding spaces.
        let line = layout.render_status(&status, 60);
        assert_eq!(
            line,
            format!(" Aquarium - Rock-n-roll{}[0:42/3:05] ", " ".repeat(25))
        );

        // Narrow line: the artist/title half is cut, not the whole line.
        let line = layout.render_status(&status, 40);
        assert_eq!(line, " Aquarium - Rock-n-r        [0:42/3:05] ");

        status.state = PlaybackState::Stopped;
        assert_eq!(layout.render_status(&status, 10), " ".repeat(10));
    }

    #[test]
    fn test_render_title() {
        let mut layout = Layout::from_config(&FormatConfig::default()).unwrap();
        assert_eq!(layout.render_title("/music", 10), " /music   ");
    }

    #[test]
    fn test_sanitize_toggle() {
        let config = FormatConfig {
            title: "{%p}".to_string(),
            ..Default::default()
        };
        let mut layout = Layout::from_config(&config).unwrap();
        assert_eq!(layout.render_title("a\tb", 3), "ab ");

        let mut layout = layout.with_sanitize(false);
        assert_eq!(layout.render_title("a\tb", 3), "a\tb");
    }

    #[test]
    fn test_invalid_template_names_surface() {
        let config = FormatConfig {
            status_paused: "{%a".to_string(),
            ..Default::default()
        };
        match Layout::from_config(&config) {
            Err(LinefmtError::ConfigTemplate { key, source }) => {
                assert_eq!(key, "status_paused");
                assert_eq!(
                    source,
                    TemplateError::UnterminatedSubstitution { position: 0 }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
