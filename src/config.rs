use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use serde::de::{self, Deserializer};

use crate::error::Error;

/// Largest pacing increment accepted; bounds cancellation latency.
pub const MAX_WAIT_CHUNK: Duration = Duration::from_millis(500);

/// Animation mode of a session. Each mode maps to exactly one effect strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    TableDrop,
    StarWars,
    RandomZoomIn,
    AppleTvLike,
    GridSwitch,
}

impl Mode {
    /// Settings-index order: `mode=0` is `TableDrop`, `mode=4` is `GridSwitch`.
    pub const ALL: &'static [Self] = &[
        Self::TableDrop,
        Self::StarWars,
        Self::RandomZoomIn,
        Self::AppleTvLike,
        Self::GridSwitch,
    ];
    pub const NAMES: &'static [&'static str] = &[
        "table-drop",
        "star-wars",
        "random-zoom-in",
        "apple-tv-like",
        "grid-switch",
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableDrop => "table-drop",
            Self::StarWars => "star-wars",
            Self::RandomZoomIn => "random-zoom-in",
            Self::AppleTvLike => "apple-tv-like",
            Self::GridSwitch => "grid-switch",
        }
    }

    /// Resolve a settings index.
    ///
    /// # Errors
    /// Returns [`Error::UnknownMode`] when `index` is outside the table.
    pub fn from_index(index: usize) -> Result<Self, Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::UnknownMode(index.to_string()))
    }

    /// Resolve a kebab-case mode name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownMode`] for names outside the table.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| Error::UnknownMode(name.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_name(&raw).map_err(|_| de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

/// Where the session's images come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    #[default]
    MovieFanart,
    ImageFolder,
    ArtistFanart,
    AlbumFanart,
}

impl SourceKind {
    /// Settings-index order.
    pub const ALL: &'static [Self] = &[
        Self::MovieFanart,
        Self::ImageFolder,
        Self::ArtistFanart,
        Self::AlbumFanart,
    ];
    pub const NAMES: &'static [&'static str] = &[
        "movie-fanart",
        "image-folder",
        "artist-fanart",
        "album-fanart",
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MovieFanart => "movie-fanart",
            Self::ImageFolder => "image-folder",
            Self::ArtistFanart => "artist-fanart",
            Self::AlbumFanart => "album-fanart",
        }
    }

    /// # Errors
    /// Returns [`Error::UnknownSource`] when `index` is outside the table.
    pub fn from_index(index: usize) -> Result<Self, Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::UnknownSource(index.to_string()))
    }

    /// # Errors
    /// Returns [`Error::UnknownSource`] for names outside the table.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnknownSource(name.to_string()))
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_name(&raw).map_err(|_| de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

/// Read-only add-on settings lookup.
pub trait SettingsStore {
    fn get_setting(&self, key: &str) -> Option<String>;
}

impl SettingsStore for HashMap<String, String> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    pub mode: Mode,
    pub source: SourceKind,
    /// Folder listed by the `image-folder` source.
    pub image_path: Option<PathBuf>,
    /// Directory holding the per-mode background images.
    pub media_dir: PathBuf,
    /// Width / height ratio assumed for every image.
    pub image_aspect_ratio: f64,
    /// Pacing increment; cancellation is observed at least this often.
    #[serde(with = "humantime_serde")]
    pub wait_chunk: Duration,
    /// Seed for every random choice of a session.
    pub shuffle_seed: Option<u64>,
    /// JSON file answering metadata queries in the headless host.
    pub library_file: Option<PathBuf>,
}

impl Configuration {
    const fn default_aspect_ratio() -> f64 {
        16.0 / 9.0
    }

    fn default_media_dir() -> PathBuf {
        PathBuf::from("resources").join("media")
    }

    /// # Errors
    /// [`Error::Io`] when the file can't be read, [`Error::Config`] when it
    /// isn't a valid configuration document.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Build a configuration from add-on style index settings (`mode`,
    /// `source`, `image_path`). Every other field keeps its default.
    ///
    /// # Errors
    /// Unknown or unparsable indexes are fatal.
    pub fn from_settings(store: &dyn SettingsStore) -> Result<Self, Error> {
        let mode = Mode::from_index(read_index(store, "mode")?)?;
        let source = SourceKind::from_index(read_index(store, "source")?)?;
        let image_path = store
            .get_setting("image_path")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            mode,
            source,
            image_path,
            ..Self::default()
        })
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.image_aspect_ratio.is_finite() && self.image_aspect_ratio > 0.0,
            "image-aspect-ratio must be positive"
        );
        ensure!(
            !self.wait_chunk.is_zero(),
            "wait-chunk must be greater than zero"
        );
        ensure!(
            self.wait_chunk <= MAX_WAIT_CHUNK,
            "wait-chunk must not exceed {}ms",
            MAX_WAIT_CHUNK.as_millis()
        );
        if self.source == SourceKind::ImageFolder {
            self.image_path
                .as_ref()
                .ok_or(Error::MissingImagePath)
                .context("invalid image source configuration")?;
        }
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            source: SourceKind::default(),
            image_path: None,
            media_dir: Self::default_media_dir(),
            image_aspect_ratio: Self::default_aspect_ratio(),
            wait_chunk: MAX_WAIT_CHUNK,
            shuffle_seed: None,
            library_file: None,
        }
    }
}

fn read_index(store: &dyn SettingsStore, key: &'static str) -> Result<usize, Error> {
    let raw = store.get_setting(key).ok_or(Error::MissingSetting(key))?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| Error::InvalidSetting { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn settings_indexes_follow_table_order() {
        let cfg = Configuration::from_settings(&settings(&[
            ("mode", "3"),
            ("source", "1"),
            ("image_path", "/pictures/"),
        ]))
        .unwrap();
        assert_eq!(cfg.mode, Mode::AppleTvLike);
        assert_eq!(cfg.source, SourceKind::ImageFolder);
        assert_eq!(cfg.image_path, Some(PathBuf::from("/pictures/")));
    }

    #[test]
    fn out_of_range_mode_is_fatal() {
        let err = Configuration::from_settings(&settings(&[("mode", "5"), ("source", "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownMode(ref m) if m == "5"));
    }

    #[test]
    fn non_numeric_source_is_rejected() {
        let err = Configuration::from_settings(&settings(&[("mode", "0"), ("source", "x")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { key: "source", .. }));
    }

    #[test]
    fn missing_mode_is_reported() {
        let err = Configuration::from_settings(&settings(&[("source", "0")])).unwrap_err();
        assert!(matches!(err, Error::MissingSetting("mode")));
    }

    #[test]
    fn yaml_uses_kebab_case_names_and_humantime() {
        let yaml = r#"
mode: star-wars
source: image-folder
image-path: /srv/pictures
wait-chunk: 250ms
shuffle-seed: 9
"#;
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        let cfg = cfg.validated().unwrap();
        assert_eq!(cfg.mode, Mode::StarWars);
        assert_eq!(cfg.source, SourceKind::ImageFolder);
        assert_eq!(cfg.wait_chunk, Duration::from_millis(250));
        assert_eq!(cfg.shuffle_seed, Some(9));
        assert_eq!(cfg.image_aspect_ratio, 16.0 / 9.0);
    }

    #[test]
    fn yaml_file_errors_keep_their_cause() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = Configuration::from_yaml_file(tmp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)), "{missing:?}");

        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "mode: [not, a, name]\n").unwrap();
        let invalid = Configuration::from_yaml_file(&path).unwrap_err();
        assert!(matches!(invalid, Error::Config(_)), "{invalid:?}");

        std::fs::write(&path, "mode: grid-switch\n").unwrap();
        let cfg = Configuration::from_yaml_file(&path).unwrap();
        assert_eq!(cfg.mode, Mode::GridSwitch);
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        let err = serde_yaml::from_str::<Configuration>("mode: spinning-cube\n").unwrap_err();
        assert!(err.to_string().contains("spinning-cube"), "{err}");
    }

    #[test]
    fn validation_bounds_wait_chunk() {
        let cfg = Configuration {
            wait_chunk: Duration::from_millis(750),
            ..Configuration::default()
        };
        assert!(cfg.validated().is_err());

        let cfg = Configuration {
            wait_chunk: Duration::ZERO,
            ..Configuration::default()
        };
        assert!(cfg.validated().is_err());
    }

    #[test]
    fn image_folder_requires_a_path() {
        let cfg = Configuration {
            source: SourceKind::ImageFolder,
            ..Configuration::default()
        };
        let err = cfg.validated().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingImagePath)
        ));
    }

    #[test]
    fn names_and_indexes_agree() {
        for (idx, mode) in Mode::ALL.iter().enumerate() {
            assert_eq!(Mode::NAMES[idx], mode.as_str());
            assert_eq!(Mode::from_index(idx).unwrap(), *mode);
        }
        for (idx, kind) in SourceKind::ALL.iter().enumerate() {
            assert_eq!(SourceKind::NAMES[idx], kind.as_str());
        }
    }
}
