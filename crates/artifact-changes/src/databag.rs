// Copyright 2026 The artifact-changes Authors

//! Data bag item changes.

use crate::{ArtifactStatus, RawChange};
use camino::Utf8Path;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

/// A `<bag>/<item>.json` path relative to the data bag directory.
static DATABAG_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/]+)/([^/]+)\.json$").expect("databag regex is valid")
});

/// A data bag item that changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabagChange {
    name: String,
    item: String,
    status: ArtifactStatus,
}

impl DatabagChange {
    /// Returns the data bag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item name within the data bag.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Returns whether the item should be uploaded or deleted.
    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    /// Returns one change per `<databag_dir>/<bag>/<item>.json` file in
    /// `changes`, in input order.
    ///
    /// Files with another extension or at another depth are skipped, as are
    /// untracked and ignored files.
    pub fn find(
        changes: &[RawChange],
        databag_dir: &Utf8Path,
    ) -> Vec<DatabagChange> {
        if changes.is_empty() {
            return Vec::new();
        }

        let prefix = databag_dir.as_str().trim_end_matches('/');
        changes
            .iter()
            .filter_map(|change| {
                let path = change.path().as_str();
                debug!(path, databag_dir = prefix, "[databag] matching");
                let rest = path.strip_prefix(prefix)?.strip_prefix('/')?;
                let captures = DATABAG_ITEM.captures(rest)?;
                let status = change.status().artifact_status()?;
                let (name, item) = (&captures[1], &captures[2]);
                info!(databag = name, item, %status, "data bag item changed");
                Some(DatabagChange {
                    name: name.to_owned(),
                    item: item.to_owned(),
                    status,
                })
            })
            .collect()
    }
}
