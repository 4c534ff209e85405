//! Platform-specific file locations.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "neurofolio")
}

/// Default config file location, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Log file used while the terminal is in raw mode.
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("neurofolio.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_have_expected_file_names() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("config.toml"));
        }
        if let Some(path) = log_path() {
            assert!(path.ends_with("neurofolio.log"));
        }
    }
}
