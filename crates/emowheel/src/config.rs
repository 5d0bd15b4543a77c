use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use plutchik::{Catalog, CatalogError, LayoutError, MotionConfig, Wheel, WheelConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    /// Emotion data file. Relative paths resolve against the config
    /// directory; the built-in catalog is used when unset.
    #[serde(default)]
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

impl Config {
    pub fn data_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.data.as_ref().map(|p| config_dir.join(p))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Emotion data error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Wheel layout error: {0}")]
    Layout(#[from] LayoutError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "plutchik", "emowheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("EMOWHEEL").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_catalog(config: &Config, config_dir: &Path) -> Result<Catalog, ConfigError> {
    let catalog = match config.data_path(config_dir) {
        Some(path) => {
            log::debug!("Loading emotions from {}", path.display());
            Catalog::from_path(&path)?
        }
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

pub fn build_wheel(config: &Config, config_dir: &Path) -> Result<Wheel, ConfigError> {
    let catalog = load_catalog(config, config_dir)?;
    Ok(Wheel::new(catalog, config.wheel.clone(), config.motion)?)
}

pub fn load_wheel() -> Result<Wheel, ConfigError> {
    let config = load_config()?;
    build_wheel(&config, &config_dir(&get_config_path()?))
}

/// Falls back to the built-in wheel when the user's config is unusable.
pub fn load_or_default() -> Result<Wheel, ConfigError> {
    match load_wheel() {
        Ok(wheel) => Ok(wheel),
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            build_wheel(&Config::default(), Path::new(""))
        }
    }
}

/// Re-reads config and data into `wheel`. On error the wheel is untouched.
pub fn reload_wheel(wheel: &mut Wheel) -> Result<(), ConfigError> {
    let config = load_config()?;
    let catalog = load_catalog(&config, &config_dir(&get_config_path()?))?;
    wheel.reload(catalog, config.wheel, config.motion)?;
    Ok(())
}

/// Files whose changes trigger a reload: the config itself and the emotion
/// data it points at, as configured when the watcher starts.
fn watched_files(config_path: &Path) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::from([config_path.to_path_buf()]);
    if let Ok(config) = load_config()
        && let Some(data) = config.data_path(&config_dir(config_path))
    {
        files.insert(data);
    }
    files
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };

    if let Err(e) = fs_err::create_dir_all(config_dir(&config_path)) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let files = watched_files(&config_path);
    let dirs: BTreeSet<PathBuf> = files
        .iter()
        .filter_map(|f| f.parent().map(Path::to_path_buf))
        .collect();

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    for dir in &dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| files.contains(p))
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.wheel.ring2_radius, 450.0);
        assert_eq!(config.motion.fade_seconds, 0.3);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse(
            r#"
data = "emotions.toml"

[wheel]
core_radius = 0.0

[wheel.sub]
own = 40.0
family = 15.0

[motion]
stiffness = 500.0
"#,
        );

        assert_eq!(config.wheel.core_radius, 0.0);
        assert_eq!(config.wheel.sub.own, 40.0);
        assert_eq!(config.wheel.sub.family, 15.0);
        assert_eq!(config.wheel.ring1_radius, 200.0);
        assert_eq!(config.motion.stiffness, 500.0);
        assert_eq!(config.motion.damping, 20.0);
        assert_eq!(
            config.data_path(Path::new("/etc/emowheel")),
            Some(PathBuf::from("/etc/emowheel/emotions.toml"))
        );
    }

    #[test]
    fn test_json_config_deserialization() {
        let config: Config =
            serde_json::from_str(r#"{ "data": "/abs/emotions.toml", "wheel": { "viewport": 800 } }"#)
                .unwrap();
        assert_eq!(config.wheel.viewport, 800.0);
        // absolute data paths ignore the config directory
        assert_eq!(
            config.data_path(Path::new("/home/me/.config/emowheel")),
            Some(PathBuf::from("/abs/emotions.toml"))
        );
    }

    #[test]
    fn test_build_wheel_from_builtin() {
        let wheel = build_wheel(&Config::default(), Path::new("")).unwrap();
        assert_eq!(wheel.layout().wedges().len(), 32);
    }

    #[test]
    fn test_build_wheel_rejects_bad_layout() {
        let mut config = Config::default();
        config.wheel.ring2_radius = 100.0;
        assert!(matches!(
            build_wheel(&config, Path::new("")),
            Err(ConfigError::Layout(_))
        ));
    }

    #[test]
    fn test_build_wheel_rejects_bad_motion() {
        let config = parse("[motion]\ndamping = -1.0\n");
        assert!(matches!(
            build_wheel(&config, Path::new("")),
            Err(ConfigError::Layout(LayoutError::InvalidMotion { field: "damping", .. }))
        ));
    }

    #[test]
    fn test_missing_data_file_is_an_error() {
        let config = Config {
            data: Some(PathBuf::from("does-not-exist.toml")),
            ..Config::default()
        };
        assert!(matches!(
            load_catalog(&config, Path::new("/nonexistent")),
            Err(ConfigError::Catalog(_))
        ));
    }
}
