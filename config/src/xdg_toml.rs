//! `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set and absolute, else the platform config dir.
fn config_home() -> Result<PathBuf, LoadError> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(dirs::config_dir)
        .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into()))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Reads `<config_home>/<app_name>/config.toml`. Missing file or `[env]` table yields an empty map.
pub fn load_env_map_from(
    config_home: &Path,
    app_name: &str,
) -> Result<HashMap<String, String>, LoadError> {
    let path = config_home.join(app_name).join("config.toml");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.env)
}

pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_env_map_from(&config_home()?, app_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, app: &str, body: &str) {
        let dir = root.join(app);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn missing_file_is_empty() {
        let root = tempfile::tempdir().unwrap();
        assert!(load_env_map_from(root.path(), "mermaid-bot").unwrap().is_empty());
    }

    #[test]
    fn reads_env_table() {
        let root = tempfile::tempdir().unwrap();
        write_config(
            root.path(),
            "mermaid-bot",
            r#"
[env]
MERMAID_BOT_STORE = "sqlite"
MERMAID_BOT_SQLITE_PATH = "/var/lib/mermaid-bot/prefs.db"
"#,
        );
        let map = load_env_map_from(root.path(), "mermaid-bot").unwrap();
        assert_eq!(map.get("MERMAID_BOT_STORE").map(String::as_str), Some("sqlite"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn other_tables_are_ignored() {
        let root = tempfile::tempdir().unwrap();
        write_config(root.path(), "mermaid-bot", "[bot]\nprefix = \"!x-\"\n");
        assert!(load_env_map_from(root.path(), "mermaid-bot").unwrap().is_empty());
    }

    #[test]
    fn non_string_value_is_parse_error() {
        let root = tempfile::tempdir().unwrap();
        write_config(root.path(), "mermaid-bot", "[env]\nPORT = 8080\n");
        let result = load_env_map_from(root.path(), "mermaid-bot");
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
