use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use blockfall_engine::GameConfig;

/// Loads game settings from a JSON file.
///
/// The result is not validated; missing fields take their defaults.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open game config: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed game config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_malformed_config_reports_path() {
        let path = env::temp_dir().join(format!("blockfall-malformed-{}.json", process::id()));
        fs::write(&path, r#"{ "width": "wide" }"#).unwrap();
        let result = load_game_config(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Malformed game config"), "{err}");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let path = env::temp_dir().join(format!("blockfall-unknown-{}.json", process::id()));
        fs::write(&path, r#"{ "gravity": 3 }"#).unwrap();
        let result = load_game_config(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("gravity"), "{err:#}");
    }
}
