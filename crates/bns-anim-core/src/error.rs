use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BnsAnimError {
    #[error("Animation files not found: {paths:?}")]
    MissingFiles { paths: Vec<PathBuf> },

    #[error("Backup directory does not exist: {path}")]
    BackupNotFound { path: PathBuf },

    #[error("Backup directory would clear the client files: {path}")]
    UnsafeBackupDir { path: PathBuf },

    #[error("Unknown {kind}: '{name}'")]
    InvalidCategory { kind: &'static str, name: String },

    #[error("Invalid selection: '{value}' - expected CLASSES:STAGES (e.g. warden:all)")]
    InvalidSelection { value: String },

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BnsAnimError>;

impl BnsAnimError {
    /// Filesystem state does not match what the operation requires.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::MissingFiles { .. } | Self::BackupNotFound { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingFiles { .. } | Self::BackupNotFound { .. } => 0,
            Self::InvalidCategory { .. } | Self::InvalidSelection { .. } => 2,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. }
            | Self::UnsafeBackupDir { .. } => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_errors_exit_cleanly() {
        let err = BnsAnimError::BackupNotFound {
            path: PathBuf::from("animation_backup"),
        };
        assert!(err.is_integrity());
        assert_eq!(err.exit_code(), 0);

        let err = BnsAnimError::ConfigKeyNotFound {
            key: "game.nope".to_string(),
        };
        assert!(!err.is_integrity());
        assert_eq!(err.exit_code(), 3);
    }
}
