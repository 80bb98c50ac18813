// Copyright 2026 The artifact-changes Authors

//! Attributing changes under a symlink's target to the symlink itself.
//!
//! A cookbook directory may contain a symlink to a cookbook stored elsewhere
//! in the repository. The VCS only reports changes at the real location, so
//! each such change is duplicated under the symlink's path before
//! classification.

use crate::{RawChange, SymlinkError};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::{collections::HashSet, io};
use tracing::{debug, warn};

/// A symlink inside a watched directory, and where it points.
///
/// Both paths are relative to the repository root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymlinkMapping {
    real_path: Utf8PathBuf,
    link_path: Utf8PathBuf,
    is_directory: bool,
}

impl SymlinkMapping {
    /// Creates a new mapping from `link_path` to `real_path`.
    pub fn new(
        real_path: impl Into<Utf8PathBuf>,
        link_path: impl Into<Utf8PathBuf>,
        is_directory: bool,
    ) -> Self {
        SymlinkMapping {
            real_path: real_path.into(),
            link_path: link_path.into(),
            is_directory,
        }
    }

    /// Returns the path the symlink resolves to.
    pub fn real_path(&self) -> &Utf8Path {
        &self.real_path
    }

    /// Returns the path of the symlink itself.
    pub fn link_path(&self) -> &Utf8Path {
        &self.link_path
    }

    /// Returns whether the symlink points to a directory.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Re-attributes `change` to the symlink, if it falls under the target.
    ///
    /// A change to a directory symlink's own path is reported as `<link>/`
    /// so that it lands inside the linked artifact.
    fn remap(&self, change: &RawChange) -> Option<RawChange> {
        let path = change.path();
        if self.is_directory && path.as_str() == self.link_path.as_str() {
            return Some(RawChange::new(
                format!("{}/", self.link_path),
                change.status(),
            ));
        }

        let rest = path.strip_prefix(&self.real_path).ok()?;
        let remapped = if !rest.as_str().is_empty() {
            self.link_path.join(rest)
        } else if self.is_directory {
            Utf8PathBuf::from(format!("{}/", self.link_path))
        } else {
            self.link_path.clone()
        };
        Some(RawChange::new(remapped, change.status()))
    }
}

/// Finds the symlinks directly inside each watched directory.
///
/// `watched_dirs` are relative to `repo_root`. Each symlink is reported at
/// most once, the first time it is seen. Symlinks that cannot be resolved,
/// or that point outside the repository, are skipped. Watched directories
/// that do not exist are skipped as well.
pub fn discover_symlinks(
    repo_root: &Utf8Path,
    watched_dirs: &[Utf8PathBuf],
) -> Result<Vec<SymlinkMapping>, SymlinkError> {
    let real_root = repo_root.canonicalize_utf8().map_err(|source| {
        SymlinkError::RepoRoot { path: repo_root.to_owned(), source }
    })?;

    let mut seen = HashSet::new();
    let mut mappings = Vec::new();

    for dir in watched_dirs {
        let abs_dir = real_root.join(dir);
        let entries = match fs::read_dir(&abs_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %dir, "watched directory does not exist");
                continue;
            }
            Err(source) => {
                return Err(SymlinkError::ReadDir { path: abs_dir, source });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SymlinkError::ReadDir {
                path: abs_dir.clone(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| {
                SymlinkError::ReadDir { path: abs_dir.clone(), source }
            })?;
            if !file_type.is_symlink() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    warn!(dir = %dir, ?name, "skipping non-UTF-8 symlink");
                }
            }
        }
        // Directory listing order is unspecified.
        names.sort();

        for name in names {
            let link_path = dir.join(&name);
            if !seen.insert(link_path.clone()) {
                continue;
            }
            if let Some(mapping) =
                resolve_symlink(&real_root, &abs_dir.join(&name), link_path)
            {
                mappings.push(mapping);
            }
        }
    }

    Ok(mappings)
}

fn resolve_symlink(
    real_root: &Utf8Path,
    abs_link: &Utf8Path,
    link_path: Utf8PathBuf,
) -> Option<SymlinkMapping> {
    let real = match abs_link.canonicalize_utf8() {
        Ok(real) => real,
        Err(error) => {
            warn!(link = %link_path, %error, "skipping unresolvable symlink");
            return None;
        }
    };

    let real_path = match real.strip_prefix(real_root) {
        Ok(rel) if !rel.as_str().is_empty() => rel.to_owned(),
        _ => {
            debug!(
                link = %link_path,
                target = %real,
                "skipping symlink that does not point inside the repository"
            );
            return None;
        }
    };

    let is_directory = match fs::metadata(&real) {
        Ok(metadata) => metadata.is_dir(),
        Err(error) => {
            warn!(
                link = %link_path,
                %error,
                "skipping unreadable symlink target"
            );
            return None;
        }
    };

    debug!(
        link = %link_path,
        real = %real_path,
        is_directory,
        "found symlink in watched directory"
    );
    Some(SymlinkMapping { real_path, link_path, is_directory })
}

/// Produces the additional changes implied by `mappings`.
///
/// For every mapping and every change under the mapping's real path, a new
/// change with the same status is emitted under the link path. The input
/// changes are left untouched; callers append the result to them.
pub fn remap_changes(
    changes: &[RawChange],
    mappings: &[SymlinkMapping],
) -> Vec<RawChange> {
    mappings
        .iter()
        .flat_map(|mapping| {
            changes.iter().filter_map(|change| mapping.remap(change))
        })
        .collect()
}
