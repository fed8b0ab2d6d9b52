use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::DEFAULT_ASSETS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "shapepad";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Bitmap files for the numbered construction keys, in key order.
    pub assets: Vec<PathBuf>,
    /// Fixed RNG seed; random colors differ per run when unset.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            assets: DEFAULT_ASSETS.iter().map(PathBuf::from).collect(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Window dimensions are never zero; a zero falls back to the default.
    fn with_window_size_checked(mut self) -> Self {
        let defaults = Self::default();
        if self.window_width == 0 {
            tracing::warn!(
                default = defaults.window_width,
                "window_width is zero; using default"
            );
            self.window_width = defaults.window_width;
        }
        if self.window_height == 0 {
            tracing::warn!(
                default = defaults.window_height,
                "window_height is zero; using default"
            );
            self.window_height = defaults.window_height;
        }
        self
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

pub fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(?err, "no config directory; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str::<AppConfig>(&contents)
            .map(AppConfig::with_window_size_checked)
            .unwrap_or_else(|err| {
                tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
                AppConfig::default()
            }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "shapepad",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/shapepad/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("shapepad", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/shapepad/config.json"));
    }

    #[test]
    fn empty_xdg_config_home_is_ignored() {
        let path = app_config_path(
            "shapepad",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/shapepad/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("shapepad", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = load_app_config_with(Some(root.path()), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.assets.len(), 2);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), r#"{ "window_width": 1024, "seed": 9 }"#);

        let config = load_app_config_with(Some(root.path()), None);
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.assets, AppConfig::default().assets);
    }

    #[test]
    fn custom_assets_are_read_in_order() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), r#"{ "assets": ["a.png", "b.png", "c.png"] }"#);

        let config = load_app_config_with(Some(root.path()), None);
        assert_eq!(
            config.assets,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.png")
            ]
        );
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), "{ not json");

        assert_eq!(load_app_config_with(Some(root.path()), None), AppConfig::default());
    }

    #[test]
    fn zero_window_dimensions_fall_back_to_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), r#"{ "window_width": 0, "window_height": 720 }"#);

        let config = load_app_config_with(Some(root.path()), None);
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 720);

        write_config(root.path(), r#"{ "window_width": 800, "window_height": 0 }"#);
        let config = load_app_config_with(Some(root.path()), None);
        assert_eq!((config.window_width, config.window_height), (800, 480));
    }
}
