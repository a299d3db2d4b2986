use std::path::PathBuf;

/// Application directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "shardlink";

/// `<data_local_dir>/shardlink`, or a relative `shardlink` directory on
/// platforms without a data dir.
pub fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_dir_ends_with_app_name() {
        assert!(default_state_dir().ends_with(APP_DIR_NAME));
    }
}
