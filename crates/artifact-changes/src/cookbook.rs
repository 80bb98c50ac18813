// Copyright 2026 The artifact-changes Authors

//! Grouping file changes into cookbook changes.

use crate::{
    ArtifactStatus, RawChange, SymlinkError, discover_symlinks, remap_changes,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use tracing::{debug, info};

/// File names that mark a directory as a cookbook.
const METADATA_DESCRIPTORS: [&str; 2] = ["metadata.rb", "metadata.json"];

/// A cookbook that changed.
///
/// The same cookbook name may appear twice in one result when a cookbook
/// moves between two cookbook directories: once as deleted from the old
/// directory and once as modified in the new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CookbookChange {
    name: String,
    cookbook_dir: Utf8PathBuf,
    status: ArtifactStatus,
}

impl CookbookChange {
    /// Returns the cookbook name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cookbook directory the cookbook was found in.
    pub fn cookbook_dir(&self) -> &Utf8Path {
        &self.cookbook_dir
    }

    /// Returns whether the cookbook should be uploaded or deleted.
    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    /// Groups `changes` into one change per `(cookbook_dir, cookbook)`.
    ///
    /// A path belongs to a cookbook if it has the shape
    /// `<cookbook_dir>/<name>/...`, matched against `cookbook_dirs` in order.
    /// Anything else, such as an `OWNERS` file directly inside a cookbook
    /// directory, is ignored.
    ///
    /// A cookbook is deleted if one of its metadata files (`metadata.rb` or
    /// `metadata.json`) was deleted and no metadata file in the same group was
    /// added or modified. Any other change means the cookbook must be
    /// re-uploaded.
    ///
    /// If `track_symlinks` is set, symlinks directly inside the cookbook
    /// directories under `repo_root` are discovered first, and changes under
    /// their targets are also attributed to the symlinks.
    pub fn find(
        changes: &[RawChange],
        cookbook_dirs: &[Utf8PathBuf],
        repo_root: &Utf8Path,
        track_symlinks: bool,
    ) -> Result<Vec<CookbookChange>, SymlinkError> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let linked = if track_symlinks {
            let mappings = discover_symlinks(repo_root, cookbook_dirs)?;
            remap_changes(changes, &mappings)
        } else {
            Vec::new()
        };

        let mut groups: Vec<CookbookGroup<'_>> = Vec::new();
        let mut group_index = HashMap::new();

        for change in changes.iter().chain(&linked) {
            let path = change.path().as_str();
            let Some(status) = change.status().artifact_status() else {
                debug!(path, status = %change.status(), "[cookbook] skipping");
                continue;
            };
            let Some(cookbook_path) = explode_path(path, cookbook_dirs) else {
                debug!(path, "[cookbook] not part of a cookbook");
                continue;
            };

            let key = (cookbook_path.cookbook_dir, cookbook_path.name);
            let index = *group_index.entry(key).or_insert_with(|| {
                groups.push(CookbookGroup::new(
                    cookbook_path.cookbook_dir,
                    cookbook_path.name,
                ));
                groups.len() - 1
            });
            groups[index].record(cookbook_path.rest, status);
        }

        Ok(groups.into_iter().map(CookbookGroup::finish).collect())
    }
}

/// A path split at its cookbook boundary.
struct CookbookPath<'a> {
    cookbook_dir: &'a Utf8Path,
    name: &'a str,
    /// The path inside the cookbook; may be empty.
    rest: &'a str,
}

fn explode_path<'a>(
    path: &'a str,
    cookbook_dirs: &'a [Utf8PathBuf],
) -> Option<CookbookPath<'a>> {
    cookbook_dirs.iter().find_map(|dir| {
        let (name, rest) = path
            .strip_prefix(dir.as_str())?
            .strip_prefix('/')?
            .split_once('/')?;
        if name.is_empty() {
            return None;
        }
        debug!(path, cookbook_dir = %dir, name, "[cookbook] matched");
        Some(CookbookPath { cookbook_dir: dir.as_path(), name, rest })
    })
}

/// The changes seen so far for one cookbook in one cookbook directory.
struct CookbookGroup<'a> {
    cookbook_dir: &'a Utf8Path,
    name: &'a str,
    metadata_deleted: bool,
    metadata_present: bool,
}

impl<'a> CookbookGroup<'a> {
    fn new(cookbook_dir: &'a Utf8Path, name: &'a str) -> Self {
        CookbookGroup {
            cookbook_dir,
            name,
            metadata_deleted: false,
            metadata_present: false,
        }
    }

    fn record(&mut self, rest: &str, status: ArtifactStatus) {
        if !METADATA_DESCRIPTORS.contains(&rest) {
            return;
        }
        match status {
            ArtifactStatus::Deleted => self.metadata_deleted = true,
            ArtifactStatus::Modified => self.metadata_present = true,
        }
    }

    fn finish(self) -> CookbookChange {
        let status = if self.metadata_deleted && !self.metadata_present {
            ArtifactStatus::Deleted
        } else {
            ArtifactStatus::Modified
        };
        info!(
            cookbook = self.name,
            cookbook_dir = %self.cookbook_dir,
            %status,
            "cookbook changed"
        );
        CookbookChange {
            name: self.name.to_owned(),
            cookbook_dir: self.cookbook_dir.to_owned(),
            status,
        }
    }
}
