// Copyright 2026 The artifact-changes Authors

//! Role changes: one file per role.

use crate::{ArtifactStatus, RawChange};
use camino::Utf8Path;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

/// A role file name relative to the role directory.
static ROLE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\.(?:rb|json)$").expect("role regex is valid")
});

/// A role that changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoleChange {
    name: String,
    status: ArtifactStatus,
}

impl RoleChange {
    /// Returns the role name.
    ///
    /// Roles stored in subdirectories of the role directory keep the
    /// subdirectory in their name (e.g. `base/web`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the role should be uploaded or deleted.
    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    /// Returns one change per `<role_dir>/<name>.rb` or
    /// `<role_dir>/<name>.json` file in `changes`, in input order.
    ///
    /// Other paths, and files that are untracked or ignored, are skipped.
    pub fn find(
        changes: &[RawChange],
        role_dir: &Utf8Path,
    ) -> Vec<RoleChange> {
        if changes.is_empty() {
            return Vec::new();
        }

        let prefix = role_dir.as_str().trim_end_matches('/');
        changes
            .iter()
            .filter_map(|change| {
                let path = change.path().as_str();
                debug!(path, role_dir = prefix, "[role] matching");
                let rest = path.strip_prefix(prefix)?.strip_prefix('/')?;
                let name = ROLE_FILE.captures(rest)?.get(1)?.as_str();
                let status = change.status().artifact_status()?;
                info!(role = name, %status, "role changed");
                Some(RoleChange { name: name.to_owned(), status })
            })
            .collect()
    }
}
