// Copyright 2026 The artifact-changes Authors

//! File-level change records.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// The status of a single file as reported by a VCS.
///
/// Backends differ in how much detail they report. Git and Subversion only
/// produce [`Modified`](Self::Modified) and [`Deleted`](Self::Deleted), while
/// Mercurial reports the full set below. Artifact classification collapses
/// these into an [`ArtifactStatus`] via [`ChangeStatus::artifact_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    /// The file was added.
    Added,
    /// The file's contents or mode changed.
    Modified,
    /// The file was removed.
    Deleted,
    /// The file is tracked and unchanged.
    Clean,
    /// The file is tracked but was removed outside the VCS.
    Missing,
    /// The file is not tracked.
    Untracked,
    /// The file is ignored.
    Ignored,
}

impl ChangeStatus {
    /// Collapses a VCS status into the two states a deployment cares about.
    ///
    /// Returns `None` for files that are not part of the repository
    /// (untracked or ignored); those never produce an artifact change.
    pub fn artifact_status(self) -> Option<ArtifactStatus> {
        match self {
            ChangeStatus::Added
            | ChangeStatus::Modified
            | ChangeStatus::Clean => Some(ArtifactStatus::Modified),
            ChangeStatus::Deleted | ChangeStatus::Missing => {
                Some(ArtifactStatus::Deleted)
            }
            ChangeStatus::Untracked | ChangeStatus::Ignored => None,
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Deleted => "deleted",
            ChangeStatus::Clean => "clean",
            ChangeStatus::Missing => "missing",
            ChangeStatus::Untracked => "untracked",
            ChangeStatus::Ignored => "ignored",
        };
        f.write_str(s)
    }
}

/// What a deployment pipeline should do with an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactStatus {
    /// The artifact exists and must be (re-)uploaded.
    Modified,
    /// The artifact is gone and must be removed.
    Deleted,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::Modified => write!(f, "modified"),
            ArtifactStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// A single file-level change, with a path relative to the repository root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawChange {
    path: Utf8PathBuf,
    status: ChangeStatus,
}

impl RawChange {
    /// Creates a new `RawChange`.
    pub fn new(path: impl Into<Utf8PathBuf>, status: ChangeStatus) -> Self {
        RawChange { path: path.into(), status }
    }

    /// Returns the repository-relative path.
    ///
    /// Paths are kept verbatim, including any trailing `/`.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the status reported by the VCS.
    pub fn status(&self) -> ChangeStatus {
        self.status
    }
}

impl fmt::Display for RawChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.path)
    }
}
