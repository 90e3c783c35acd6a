use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{BnsAnimError, Result};

/// Package directory relative to the client root
const COOKED_PC: &[&str] = &["contents", "bns", "CookedPC"];
const PACKAGE_EXT: &str = "upk";

/// Callback type for file operation progress reporting
pub type FileCallback<'a> = Option<&'a dyn Fn(&str, &str)>;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemoveResult {
    /// Stale entries deleted from the backup directory
    pub cleared: usize,
    pub moved: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RestoreResult {
    pub restored: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLocation {
    /// In the client, animation active
    Game,
    /// In the backup directory, animation removed
    Backup,
    /// Present in both places
    Both,
    Missing,
}

impl FileLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Backup => "backup",
            Self::Both => "both",
            Self::Missing => "missing",
        }
    }
}

impl std::fmt::Display for FileLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug)]
pub struct FileInfo {
    pub id: String,
    pub location: FileLocation,
}

/// Moves animation packages between the client and the backup directory
pub struct Operator {
    root: PathBuf,
    backup_dir: PathBuf,
}

impl Operator {
    pub fn new(root: PathBuf, backup_dir: PathBuf) -> Self {
        Self { root, backup_dir }
    }

    pub fn from_config(game: &GameConfig) -> Self {
        Self::new(game.root.clone(), game.backup_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// `<root>/contents/bns/CookedPC`
    pub fn packages_dir(&self) -> PathBuf {
        COOKED_PC
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Live location of a package
    pub fn package_path(&self, id: &str) -> PathBuf {
        self.packages_dir().join(package_file_name(id))
    }

    /// Backup location of a package
    pub fn backup_path(&self, id: &str) -> PathBuf {
        self.backup_dir.join(package_file_name(id))
    }

    /// Move every queued package into a freshly cleared backup directory.
    ///
    /// Nothing is touched unless all queued packages exist. The backup
    /// directory is emptied before the moves start, so a failure inside the
    /// move loop leaves the previous backup lost and the new one partial.
    pub fn remove(
        &self,
        queue: &BTreeSet<&str>,
        on_file: FileCallback<'_>,
    ) -> Result<RemoveResult> {
        let missing: Vec<PathBuf> = queue
            .iter()
            .map(|id| self.package_path(id))
            .filter(|path| !path.is_file())
            .collect();

        if !missing.is_empty() {
            debug!(count = missing.len(), "queued packages missing from client");
            return Err(BnsAnimError::MissingFiles { paths: missing });
        }
        self.check_backup_dir()?;

        let mut result = RemoveResult::default();

        fs::create_dir_all(&self.backup_dir)?;
        for entry in fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }

            debug!(path = %path.display(), "cleared stale backup entry");
            if let Some(f) = on_file {
                f("CLEAR", &entry.file_name().to_string_lossy());
            }
            result.cleared += 1;
        }

        for id in queue {
            let src = self.package_path(id);
            let dst = self.backup_path(id);

            if let Err(e) = fs::rename(&src, &dst) {
                warn!(
                    path = %src.display(),
                    moved = result.moved,
                    remaining = queue.len() - result.moved,
                    "move failed after backup directory was cleared"
                );
                return Err(e.into());
            }

            debug!(from = %src.display(), to = %dst.display(), "moved package");
            if let Some(f) = on_file {
                f("MOVE", &package_file_name(id));
            }
            result.moved += 1;
        }

        info!(
            cleared = result.cleared,
            moved = result.moved,
            backup = %self.backup_dir.display(),
            "animations removed"
        );
        Ok(result)
    }

    /// Move everything in the backup directory back into the client,
    /// replacing files of the same name.
    pub fn restore(&self, on_file: FileCallback<'_>) -> Result<RestoreResult> {
        if !self.backup_dir.is_dir() {
            return Err(BnsAnimError::BackupNotFound {
                path: self.backup_dir.clone(),
            });
        }
        self.check_backup_dir()?;

        let mut entries = fs::read_dir(&self.backup_dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        let packages_dir = self.packages_dir();
        let mut result = RestoreResult::default();

        for name in entries {
            let src = self.backup_dir.join(&name);
            let dst = packages_dir.join(&name);

            fs::rename(&src, &dst)?;

            debug!(from = %src.display(), to = %dst.display(), "restored package");
            if let Some(f) = on_file {
                f("RESTORE", &name.to_string_lossy());
            }
            result.restored += 1;
        }

        info!(restored = result.restored, "animations restored");
        Ok(result)
    }

    /// Reject a backup directory that is the client root, the package
    /// directory, or one of their ancestors.
    fn check_backup_dir(&self) -> Result<()> {
        let Ok(backup) = self.backup_dir.canonicalize() else {
            return Ok(());
        };
        let packages_dir = self.packages_dir();
        let packages_dir = packages_dir.canonicalize().unwrap_or(packages_dir);
        let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());

        if packages_dir.starts_with(&backup) || root.starts_with(&backup) {
            warn!(backup = %backup.display(), "backup directory overlaps the client");
            return Err(BnsAnimError::UnsafeBackupDir {
                path: self.backup_dir.clone(),
            });
        }

        Ok(())
    }

    /// Where each queued package currently lives
    pub fn status(&self, queue: &BTreeSet<&str>) -> Vec<FileInfo> {
        queue
            .iter()
            .map(|id| {
                let in_game = self.package_path(id).is_file();
                let in_backup = self.backup_path(id).is_file();
                let location = match (in_game, in_backup) {
                    (true, true) => FileLocation::Both,
                    (true, false) => FileLocation::Game,
                    (false, true) => FileLocation::Backup,
                    (false, false) => FileLocation::Missing,
                };
                FileInfo {
                    id: id.to_string(),
                    location,
                }
            })
            .collect()
    }
}

fn package_file_name(id: &str) -> String {
    format!("{}.{}", id, PACKAGE_EXT)
}
