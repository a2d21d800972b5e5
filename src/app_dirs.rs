use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "guessword").map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("guessword");
            Some(state_dir.join("guessword.log"))
        } else {
            ProjectDirs::from("", "", "guessword")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("guessword.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_named_for_the_app() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("guessword/guessword.log"));
        }
        if let Some(path) = AppDirs::config_path() {
            assert_eq!(path.file_name().unwrap(), "config.json");
        }
    }
}
