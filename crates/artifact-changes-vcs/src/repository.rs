// Copyright 2026 The artifact-changes Authors

//! A checked-out repository that changesets can be loaded from.

use crate::{RepoError, Vcs, VcsDetectError};
use artifact_changes::{ChangeSource, Changeset, Locations, RawChange};
use camino::{Utf8Path, Utf8PathBuf};

/// A repository root together with the VCS that manages it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: Utf8PathBuf,
    vcs: Vcs,
}

impl Repository {
    /// Opens the repository at `root`, detecting its VCS with
    /// [`Vcs::detect`].
    pub fn open(root: impl Into<Utf8PathBuf>) -> Result<Self, VcsDetectError> {
        let root = root.into();
        let vcs = Vcs::detect(&root)?;
        Ok(Repository { root, vcs })
    }

    /// Uses `vcs` for the repository at `root`, skipping detection.
    pub fn with_vcs(root: impl Into<Utf8PathBuf>, vcs: Vcs) -> Self {
        Repository { root: root.into(), vcs }
    }

    /// Returns the repository root.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the VCS used for this repository.
    pub fn vcs(&self) -> &Vcs {
        &self.vcs
    }

    /// Loads the changeset between `start_ref` and `end_ref`.
    ///
    /// See [`Changeset::load`] for how missing references are treated.
    pub fn changeset(
        &self,
        start_ref: Option<&str>,
        end_ref: Option<&str>,
        locations: Locations,
    ) -> Result<Changeset, RepoError> {
        Changeset::load(self, start_ref, end_ref, locations)
    }

    /// Returns the revision the working copy is at, for use as the start
    /// reference of the next run.
    pub fn head_rev(&self) -> Result<String, RepoError> {
        Ok(self.vcs.head_rev(&self.root)?)
    }
}

impl ChangeSource for Repository {
    type Error = RepoError;

    fn repo_root(&self) -> &Utf8Path {
        &self.root
    }

    fn list_all_files(&self) -> Result<Vec<RawChange>, RepoError> {
        Ok(self.vcs.list_files(&self.root)?)
    }

    fn changes_between(
        &self,
        start_ref: &str,
        end_ref: Option<&str>,
    ) -> Result<Vec<RawChange>, RepoError> {
        self.vcs.diff(&self.root, start_ref, end_ref)
    }

    fn validate_ref(&self, reference: &str) -> Result<(), RepoError> {
        if self.vcs.ref_exists(&self.root, reference)? {
            Ok(())
        } else {
            Err(RepoError::UnknownRef {
                vcs_name: self.vcs.name(),
                reference: reference.to_owned(),
            })
        }
    }
}
