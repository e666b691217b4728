//! Fixed directory layout for the store and the runtime configuration root.
//!
//! # Storage layout
//!
//! ```text
//! <home>/.attune/             git working copy ("the store")
//!   servers/servers.json      aggregated server-definition file
//!   settings/settings.json    settings file
//!   skills/                   skill bundles
//!   plugins/                  installed plugins
//!
//! <home>/.agent/              agent runtime configuration root
//!   servers.json
//!   settings.json
//!   skills/
//!   plugins/
//! ```
//!
//! The layout is resolved exactly once ([`Layout::discover`] in the CLI,
//! [`Layout::new`] in tests against a `TempDir`) and passed down explicitly;
//! no component reads the environment on its own.

use std::path::{Path, PathBuf};

use crate::error::LayoutError;

/// Directory name of the git working copy under the home directory.
pub const STORE_DIR_NAME: &str = ".attune";

/// Directory name of the agent's runtime configuration root.
pub const RUNTIME_DIR_NAME: &str = ".agent";

/// Suffix appended to a runtime config file path to form its backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A directory category reconciled with mirror semantics: after
/// reconciliation the destination's entry set and content equal the
/// source's, and extraneous destination entries are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub name: &'static str,
    /// Category directory inside the working copy.
    pub repo_dir: PathBuf,
    /// Matching directory inside the runtime configuration root.
    pub runtime_dir: PathBuf,
}

/// A single configuration file reconciled with overwrite semantics.
///
/// The runtime side is copied to [`ConfigFile::backup_path`] before an
/// inbound overwrite; the repository side is protected by git history only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub name: &'static str,
    /// File path inside the working copy.
    pub repo_path: PathBuf,
    /// File path the consuming agent reads at runtime.
    pub runtime_path: PathBuf,
}

impl ConfigFile {
    /// `<runtime_path>.bak` — a single backup slot, overwritten per transfer.
    pub fn backup_path(&self) -> PathBuf {
        let mut os = self.runtime_path.clone().into_os_string();
        os.push(BACKUP_SUFFIX);
        PathBuf::from(os)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// The two roots every phase operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Root of the git working copy.
    pub repo_root: PathBuf,
    /// Root of the agent's runtime configuration directory.
    pub runtime_root: PathBuf,
}

impl Layout {
    /// Build a layout from explicit roots. Tests use this with `TempDir`.
    pub fn new(repo_root: impl Into<PathBuf>, runtime_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            runtime_root: runtime_root.into(),
        }
    }

    /// The fixed layout rooted at `home`.
    pub fn from_home(home: &Path) -> Self {
        Self::new(home.join(STORE_DIR_NAME), home.join(RUNTIME_DIR_NAME))
    }

    /// Resolve the layout from the current user's home directory.
    pub fn discover() -> Result<Self, LayoutError> {
        let home = dirs::home_dir().ok_or(LayoutError::HomeNotFound)?;
        Ok(Self::from_home(&home))
    }

    /// Mirror categories, in reconciliation order.
    pub fn sync_targets(&self) -> Vec<SyncTarget> {
        ["skills", "plugins"]
            .into_iter()
            .map(|name| SyncTarget {
                name,
                repo_dir: self.repo_root.join(name),
                runtime_dir: self.runtime_root.join(name),
            })
            .collect()
    }

    /// Single-file categories, in reconciliation order.
    pub fn config_files(&self) -> Vec<ConfigFile> {
        [("servers", "servers.json"), ("settings", "settings.json")]
            .into_iter()
            .map(|(name, file)| ConfigFile {
                name,
                repo_path: self.repo_root.join(name).join(file),
                runtime_path: self.runtime_root.join(file),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_home_joins_fixed_roots() {
        let layout = Layout::from_home(Path::new("/home/u"));
        assert_eq!(layout.repo_root, PathBuf::from("/home/u/.attune"));
        assert_eq!(layout.runtime_root, PathBuf::from("/home/u/.agent"));
    }

    #[test]
    fn sync_targets_cover_skills_and_plugins() {
        let layout = Layout::new("/repo", "/runtime");
        let targets = layout.sync_targets();
        let names: Vec<_> = targets.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["skills", "plugins"]);
        assert_eq!(targets[0].repo_dir, PathBuf::from("/repo/skills"));
        assert_eq!(targets[0].runtime_dir, PathBuf::from("/runtime/skills"));
    }

    #[test]
    fn config_files_map_repo_subdirs_to_runtime_root() {
        let layout = Layout::new("/repo", "/runtime");
        let files = layout.config_files();
        let names: Vec<_> = files.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["servers", "settings"]);
        assert_eq!(
            files[0].repo_path,
            PathBuf::from("/repo/servers/servers.json")
        );
        assert_eq!(files[0].runtime_path, PathBuf::from("/runtime/servers.json"));
        assert_eq!(
            files[1].repo_path,
            PathBuf::from("/repo/settings/settings.json")
        );
    }

    #[test]
    fn backup_path_appends_suffix() {
        let layout = Layout::new("/repo", "/runtime");
        let settings = layout.config_files().pop().unwrap();
        assert_eq!(
            settings.backup_path(),
            PathBuf::from("/runtime/settings.json.bak")
        );
    }
}
