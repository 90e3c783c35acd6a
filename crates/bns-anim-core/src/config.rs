use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BnsAnimError, Result};
use crate::queue::Selection;

const CONFIG_DIR: &str = "bns-anim";
const CONFIG_FILE: &str = "config.toml";

/// Default client install location
pub const DEFAULT_ROOT: &str = r"C:\Games\Blade and Soul";

/// Backup directory name under the client root
pub const BACKUP_DIR_NAME: &str = "animation_backup";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# bns-anim configuration file

[game]
# Blade & Soul client directory (the one containing `contents/`)
root = 'C:\Games\Blade and Soul'

# Where removed animations are kept
# Default: <root>/animation_backup
# backup_dir = 'D:\Backups\bns-animations'

[queue]
# Remove animations shared by every class
include_common = true

# Class-specific animations to remove. Each entry picks every package whose
# class and stage overlap the given sets.
# Classes: ASSASSIN ASTROMANCER BLADE_DANCER BLADE_MASTER DESTROYER
#          FORCE_MASTER GUNSLINGER KUNG_FU_MASTER SOUL_FIGHTER SUMMONER
#          WARDEN WARLOCK ZEN_ARCHER ALL
# Stages:  BEFORE_AWAKENING AFTER_AWAKENING THIRD_SPECIALIZATION ALL
[[queue.select]]
classes = "ALL"
stages = "ALL"
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,

    #[serde(default)]
    pub queue: QueueConfig,
}

/// Client location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Overrides `<root>/animation_backup`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

/// What to move out of the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_include_common")]
    pub include_common: bool,

    #[serde(default = "default_select")]
    pub select: Vec<Selection>,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_include_common() -> bool {
    true
}

fn default_select() -> Vec<Selection> {
    vec![Selection::all()]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            backup_dir: None,
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            include_common: default_include_common(),
            select: default_select(),
        }
    }
}

impl GameConfig {
    /// Resolved backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| self.root.join(BACKUP_DIR_NAME))
    }
}

impl Config {
    /// Platform config location (e.g. ~/.config/bns-anim/config.toml)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load config, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| BnsAnimError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the commented template unless a config already exists
    pub fn init(path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path.to_path_buf())
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "game.root" => Some(self.game.root.display().to_string()),
            "game.backup_dir" => Some(self.game.backup_dir().display().to_string()),
            "queue.include_common" => Some(self.queue.include_common.to_string()),
            "queue.select" => Some(format_selections(&self.queue.select)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "game.root" => {
                self.game.root = PathBuf::from(value.trim());
                Ok(())
            }
            "game.backup_dir" => {
                let value = value.trim();
                self.game.backup_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
                Ok(())
            }
            "queue.include_common" => {
                self.queue.include_common = parse_bool(key, value)?;
                Ok(())
            }
            "queue.select" => {
                self.queue.select = parse_selections(value)?;
                Ok(())
            }
            _ => Err(BnsAnimError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["game.root", "game.backup_dir", "queue.include_common", "queue.select"]
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(BnsAnimError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse selections separated by `;`: "warden:all; all:before-awakening"
pub fn parse_selections(value: &str) -> Result<Vec<Selection>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Selection>())
        .collect()
}

fn format_selections(selections: &[Selection]) -> String {
    selections
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Class, Stage};
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.game.root, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(
            config.game.backup_dir(),
            PathBuf::from(DEFAULT_ROOT).join(BACKUP_DIR_NAME)
        );
        assert!(config.queue.include_common);
        assert_eq!(config.queue.select, vec![Selection::all()]);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILE);

        let written = Config::init(&path).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[game]
root = "/games/bns"

[queue]
include_common = false

[[queue.select]]
classes = "WARDEN | WARLOCK"
stages = "BEFORE_AWAKENING"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.game.root, PathBuf::from("/games/bns"));
        assert_eq!(
            config.game.backup_dir(),
            PathBuf::from("/games/bns").join(BACKUP_DIR_NAME)
        );
        assert!(!config.queue.include_common);
        assert_eq!(
            config.queue.select,
            vec![Selection::new(
                Class::WARDEN | Class::WARLOCK,
                Stage::BEFORE_AWAKENING
            )]
        );
    }

    #[test]
    fn test_load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[queue]\ninclude_common = \"maybe\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, BnsAnimError::ConfigParse { .. }));
    }

    #[test]
    fn test_save_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.game.backup_dir = Some(PathBuf::from("/backups/bns"));
        config.queue.select = vec![Selection::new(Class::SUMMONER, Stage::ALL)];
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("game.root", "/games/bns").unwrap();
        assert_eq!(config.get("game.root").unwrap(), "/games/bns");

        config.set("queue.include_common", "no").unwrap();
        assert!(!config.queue.include_common);

        config
            .set("queue.select", "assassin:third-specialization; warden:all")
            .unwrap();
        assert_eq!(
            config.get("queue.select").unwrap(),
            "assassin:third-specialization; warden:all"
        );

        assert!(matches!(
            config.set("game.nope", "x"),
            Err(BnsAnimError::ConfigKeyNotFound { .. })
        ));
        assert!(matches!(
            config.set("queue.include_common", "maybe"),
            Err(BnsAnimError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_select_get_output_sets_back() {
        let mut config = Config::default();
        config.queue.select = vec![Selection::new(Class::empty(), Stage::ALL)];

        let value = config.get("queue.select").unwrap();
        assert_eq!(value, "none:all");

        config.set("queue.select", &value).unwrap();
        assert_eq!(
            config.queue.select,
            vec![Selection::new(Class::empty(), Stage::ALL)]
        );
    }

    #[test]
    fn test_set_backup_dir_empty_resets() {
        let mut config = Config::default();
        config.set("game.backup_dir", "/backups").unwrap();
        assert_eq!(config.game.backup_dir(), PathBuf::from("/backups"));

        config.set("game.backup_dir", "").unwrap();
        assert_eq!(config.game.backup_dir, None);
    }

    #[test]
    fn test_list_covers_all_keys() {
        let keys: Vec<String> = Config::default().list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "game.root",
                "game.backup_dir",
                "queue.include_common",
                "queue.select"
            ]
        );
    }

    #[test]
    fn test_parse_selections_empty() {
        assert!(parse_selections("").unwrap().is_empty());
        assert!(parse_selections("warden").is_err());
    }
}
