// Copyright 2026 The artifact-changes Authors

//! Git, Mercurial and Subversion backends for
//! [`artifact-changes`](artifact_changes).
//!
//! This crate runs the VCS binaries to list and diff files, and feeds their
//! output to the parsers in `artifact-changes`. Binaries are looked up on
//! `$PATH`, or taken from the `$GIT`, `$HG` and `$SVN` environment
//! variables.
//!
//! # Examples
//!
//! ```no_run
//! use artifact_changes::{ArtifactStatus, Locations};
//! use artifact_changes_vcs::Repository;
//!
//! let repo = Repository::open("/src/chef").expect("VCS detected");
//! let changeset = repo
//!     .changeset(Some("v1.0"), Some("HEAD"), Locations::default())
//!     .expect("changes loaded");
//!
//! for cookbook in changeset.cookbooks().expect("cookbook dirs readable") {
//!     match cookbook.status() {
//!         ArtifactStatus::Modified => println!("upload {}", cookbook.name()),
//!         ArtifactStatus::Deleted => println!("delete {}", cookbook.name()),
//!     }
//! }
//! ```

#![deny(missing_docs)]

mod errors;
mod repository;
mod vcs;

pub use artifact_changes::VcsName;
pub use errors::{CommandError, RepoError, VcsDetectError, VcsEnvError};
pub use repository::Repository;
pub use vcs::Vcs;
