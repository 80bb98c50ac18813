// Copyright 2026 The artifact-changes Authors

//! The set of changes between two revisions, as artifacts.

use crate::{
    CookbookChange, DatabagChange, Locations, RawChange, RoleChange,
    SymlinkError,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

/// A repository that can report file changes.
///
/// [`Changeset::load`] depends only on this trait, so it can be backed by a
/// real VCS checkout or by fixed data in tests.
pub trait ChangeSource {
    /// The error returned by this source.
    type Error;

    /// Returns the repository root that reported paths are relative to.
    fn repo_root(&self) -> &Utf8Path;

    /// Returns every tracked file, each as a change to upload.
    fn list_all_files(&self) -> Result<Vec<RawChange>, Self::Error>;

    /// Returns the files changed between `start_ref` and `end_ref`.
    ///
    /// If `end_ref` is `None`, `start_ref` is compared against the working
    /// copy.
    fn changes_between(
        &self,
        start_ref: &str,
        end_ref: Option<&str>,
    ) -> Result<Vec<RawChange>, Self::Error>;

    /// Returns an error if `reference` does not name a revision.
    fn validate_ref(&self, reference: &str) -> Result<(), Self::Error>;
}

/// File changes in a repository, classified into cookbooks, roles and data
/// bags on demand.
#[derive(Clone, Debug)]
pub struct Changeset {
    repo_root: Utf8PathBuf,
    locations: Locations,
    changes: Vec<RawChange>,
}

impl Changeset {
    /// Creates a changeset from already-parsed changes.
    ///
    /// `repo_root` is only used to look for symlinks, when
    /// [`Locations::track_symlinks`] is set.
    pub fn new(
        repo_root: impl Into<Utf8PathBuf>,
        locations: Locations,
        changes: Vec<RawChange>,
    ) -> Self {
        Changeset { repo_root: repo_root.into(), locations, changes }
    }

    /// Loads a changeset from `source`.
    ///
    /// With a `start_ref`, both references are validated and the changes
    /// between them are loaded. Without one, every file in the repository is
    /// loaded, so that everything is uploaded; `end_ref` is ignored in that
    /// case.
    pub fn load<S: ChangeSource>(
        source: &S,
        start_ref: Option<&str>,
        end_ref: Option<&str>,
        locations: Locations,
    ) -> Result<Self, S::Error> {
        let changes = match start_ref {
            Some(start_ref) => {
                source.validate_ref(start_ref)?;
                if let Some(end_ref) = end_ref {
                    source.validate_ref(end_ref)?;
                }
                info!(
                    start_ref,
                    end_ref = end_ref.unwrap_or("working copy"),
                    "loading changes"
                );
                source.changes_between(start_ref, end_ref)?
            }
            None => {
                info!("no start revision, loading all files");
                source.list_all_files()?
            }
        };
        Ok(Changeset::new(source.repo_root(), locations, changes))
    }

    /// Returns the underlying file changes.
    pub fn changes(&self) -> &[RawChange] {
        &self.changes
    }

    /// Returns the locations used for classification.
    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Returns the changed cookbooks.
    ///
    /// Fails only if symlink tracking is enabled and the cookbook
    /// directories cannot be scanned.
    pub fn cookbooks(&self) -> Result<Vec<CookbookChange>, SymlinkError> {
        CookbookChange::find(
            &self.changes,
            self.locations.cookbook_dirs(),
            &self.repo_root,
            self.locations.track_symlinks(),
        )
    }

    /// Returns the changed roles.
    pub fn roles(&self) -> Vec<RoleChange> {
        RoleChange::find(&self.changes, self.locations.role_dir())
    }

    /// Returns the changed data bag items.
    pub fn databags(&self) -> Vec<DatabagChange> {
        DatabagChange::find(&self.changes, self.locations.databag_dir())
    }
}
