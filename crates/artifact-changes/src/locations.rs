// Copyright 2026 The artifact-changes Authors

//! Where artifacts live inside a repository.

use camino::{Utf8Path, Utf8PathBuf};

/// The watched directories of a repository.
///
/// All paths are relative to the repository root. Cookbook directories are
/// ordered: a path is attributed to the first cookbook directory it falls
/// under, so configuration order matters when directories nest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    cookbook_dirs: Vec<Utf8PathBuf>,
    role_dir: Utf8PathBuf,
    databag_dir: Utf8PathBuf,
    track_symlinks: bool,
}

impl Locations {
    /// Creates a new set of locations with symlink tracking disabled.
    ///
    /// Trailing slashes are dropped from every directory.
    pub fn new<I, P>(
        cookbook_dirs: I,
        role_dir: impl Into<Utf8PathBuf>,
        databag_dir: impl Into<Utf8PathBuf>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Locations {
            cookbook_dirs: cookbook_dirs
                .into_iter()
                .map(|dir| normalize_dir(dir.into()))
                .collect(),
            role_dir: normalize_dir(role_dir.into()),
            databag_dir: normalize_dir(databag_dir.into()),
            track_symlinks: false,
        }
    }

    /// Enables or disables symlink tracking for cookbooks.
    ///
    /// When enabled, changes under the real target of a symlink found
    /// directly inside a cookbook directory are also reported under the
    /// symlink's own path.
    pub fn with_symlink_tracking(mut self, track_symlinks: bool) -> Self {
        self.track_symlinks = track_symlinks;
        self
    }

    /// Returns the cookbook directories, in priority order.
    pub fn cookbook_dirs(&self) -> &[Utf8PathBuf] {
        &self.cookbook_dirs
    }

    /// Returns the role directory.
    pub fn role_dir(&self) -> &Utf8Path {
        &self.role_dir
    }

    /// Returns the data bag directory.
    pub fn databag_dir(&self) -> &Utf8Path {
        &self.databag_dir
    }

    /// Returns whether symlink tracking is enabled.
    pub fn track_symlinks(&self) -> bool {
        self.track_symlinks
    }
}

impl Default for Locations {
    /// `cookbooks`, `roles` and `databags`, without symlink tracking.
    fn default() -> Self {
        Locations::new(["cookbooks"], "roles", "databags")
    }
}

fn normalize_dir(dir: Utf8PathBuf) -> Utf8PathBuf {
    let trimmed = dir.as_str().trim_end_matches('/');
    if trimmed.len() == dir.as_str().len() {
        dir
    } else {
        Utf8PathBuf::from(trimmed)
    }
}
