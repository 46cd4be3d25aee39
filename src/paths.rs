use std::path::PathBuf;

/// Get the hmmer home directory
/// Checks HMMER_HOME environment variable, falls back to ${HOME}/.hmmer
pub fn hmmer_home() -> PathBuf {
    if let Ok(path) = std::env::var("HMMER_HOME") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hmmer")
}

/// Location of the user configuration file
pub fn default_config_path() -> PathBuf {
    hmmer_home().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_home_from_env() {
        std::env::set_var("HMMER_HOME", "/srv/hmmer");
        assert_eq!(hmmer_home(), PathBuf::from("/srv/hmmer"));
        assert_eq!(
            default_config_path(),
            PathBuf::from("/srv/hmmer/config.toml")
        );
        std::env::remove_var("HMMER_HOME");
    }

    #[test]
    #[serial]
    fn test_home_default() {
        std::env::remove_var("HMMER_HOME");
        assert!(hmmer_home().ends_with(".hmmer"));
    }
}
