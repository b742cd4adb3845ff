//! Persistence of sticky tool options as JSON under the XDG config dir.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::engine::RectangleOptions;

const APP_DIR: &str = "marquee";
const OPTIONS_FILE: &str = "tool_options.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,

    #[error("failed to create config directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write tool options: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize tool options")]
    Serialize(#[source] serde_json::Error),
}

/// Loads persisted tool options, falling back to defaults when the file
/// is missing, unreadable or malformed.
pub fn load_tool_options() -> RectangleOptions {
    let (xdg_config_home, home) = config_env_dirs();
    load_tool_options_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_tool_options_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> RectangleOptions {
    let path = match options_path(xdg_config_home, home) {
        Ok(path) => path,
        Err(_) => return RectangleOptions::default(),
    };
    if !path.exists() {
        return RectangleOptions::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse tool options; using defaults");
            RectangleOptions::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read tool options; using defaults");
            RectangleOptions::default()
        }
    }
}

/// Writes the options to disk, creating the config directory if needed.
pub fn save_tool_options(options: &RectangleOptions) -> Result<(), ConfigError> {
    let (xdg_config_home, home) = config_env_dirs();
    save_tool_options_with(options, xdg_config_home.as_deref(), home.as_deref())
}

fn save_tool_options_with(
    options: &RectangleOptions,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<(), ConfigError> {
    let path = options_path(xdg_config_home, home)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let contents = serde_json::to_string_pretty(options).map_err(ConfigError::Serialize)?;
    std::fs::write(&path, contents).map_err(|source| ConfigError::Write { path, source })
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn options_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(APP_DIR);
    path.push(OPTIONS_FILE);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(xdg) = xdg_config_home {
        if xdg.is_absolute() {
            return Ok(xdg.to_path_buf());
        }
    }
    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConstraintMode, FixedRule, Precision};

    #[test]
    fn options_path_prefers_absolute_xdg_config_home() {
        let path = options_path(Some(Path::new("/xdg")), Some(Path::new("/home/user")))
            .expect("path should resolve");
        assert_eq!(path, PathBuf::from("/xdg/marquee/tool_options.json"));
    }

    #[test]
    fn options_path_ignores_relative_xdg_config_home() {
        let path = options_path(Some(Path::new("relative")), Some(Path::new("/home/user")))
            .expect("path should fall back to HOME");
        assert_eq!(
            path,
            PathBuf::from("/home/user/.config/marquee/tool_options.json")
        );
    }

    #[test]
    fn options_path_requires_some_home() {
        let err = options_path(None, None).expect_err("no home should fail");
        assert!(matches!(err, ConfigError::MissingHomeDirectory));
    }

    #[test]
    fn load_falls_back_to_defaults_without_any_config_dir() {
        let options = load_tool_options_with(None, None);
        assert_eq!(options, RectangleOptions::default());
    }

    #[test]
    fn options_round_trip_through_json() {
        let mut options = RectangleOptions::default();
        options.constraint = ConstraintMode::Image;
        options.fixed_rule = FixedRule::Aspect {
            numerator: 16.0,
            denominator: 9.0,
        };
        options.fixed_center = true;
        options.precision = Precision::Double;

        let json = serde_json::to_string(&options).expect("options should serialize");
        let parsed: RectangleOptions =
            serde_json::from_str(&json).expect("options should deserialize");
        assert_eq!(parsed, options);
    }

    #[test]
    fn partial_options_json_fills_in_defaults() {
        let parsed: RectangleOptions =
            serde_json::from_str("{}").expect("empty object should use serde defaults");
        assert_eq!(parsed, RectangleOptions::default());

        let parsed: RectangleOptions =
            serde_json::from_str(r#"{"fixed_center": true}"#).expect("partial options should parse");
        assert!(parsed.fixed_center);
        assert_eq!(parsed.constraint, ConstraintMode::None);
    }
}
