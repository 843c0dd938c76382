//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory name under the config base.
const APP_DIR: &str = "cinesearch";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set to an absolute path, returns
///   `$XDG_CONFIG_HOME/cinesearch/config.toml`.
/// - Otherwise returns `~/.config/cinesearch/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

/// Resolution rules of [`resolve_config_path`] over explicit inputs.
fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    // Relative XDG values are invalid and must be ignored.
    if let Some(base) = xdg.filter(|p| p.is_absolute()) {
        return Ok(base.join(APP_DIR).join(CONFIG_FILE));
    }
    let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) else {
        bail!("HOME environment variable is not set");
    };
    Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/cinesearch-dir");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/cinesearch-dir/config.toml"));
    }

    #[test]
    fn test_dir_wins_over_xdg() {
        // Arrange & Act
        let path = config_path_from(
            Some(Path::new("/srv/cs")),
            Some(Path::new("/xdg")),
            Some(Path::new("/home/u")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/cs/config.toml"));
    }

    #[test]
    fn test_xdg_config_home_is_used() {
        // Arrange & Act
        let path =
            config_path_from(None, Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/cinesearch/config.toml"));
    }

    #[test]
    fn test_relative_xdg_falls_back_to_home() {
        // Arrange & Act
        let path = config_path_from(None, Some(Path::new("rel/cfg")), Some(Path::new("/home/u")))
            .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/cinesearch/config.toml"));
    }

    #[test]
    fn test_missing_home_fails() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(result.is_err());
    }
}
