// Copyright 2026 The artifact-changes Authors

//! Classify version control diffs into deployable artifact changes.
//!
//! A configuration repository holds *artifacts*: cookbooks (directories under
//! one or more cookbook roots), roles (single files under a role directory)
//! and data bag items (`<bag>/<item>.json` under a data bag directory). When
//! the repository moves from one revision to another, a deployment pipeline
//! needs to know exactly which artifacts to re-upload and which to delete.
//!
//! This crate turns the textual diff output of Git, Mercurial or Subversion
//! into [`RawChange`]s, and groups those into [`CookbookChange`]s,
//! [`RoleChange`]s and [`DatabagChange`]s, each either
//! [`ArtifactStatus::Modified`] or [`ArtifactStatus::Deleted`].
//!
//! The main entry point is [`Changeset`]. Running the VCS itself is left to
//! an implementation of [`ChangeSource`], such as the one in
//! [`artifact-changes-vcs`](https://crates.io/crates/artifact-changes-vcs).
//!
//! # Examples
//!
//! ```
//! use artifact_changes::{
//!     ArtifactStatus, Changeset, Locations, VcsName,
//! };
//! use camino::Utf8Path;
//!
//! let diff = "M\tcookbooks/apache/recipes/default.rb\n\
//!             D\troles/web.json\n";
//! let changes = VcsName::Git
//!     .parse_changes(diff, Utf8Path::new("/src/chef"))
//!     .unwrap();
//!
//! let changeset =
//!     Changeset::new("/src/chef", Locations::default(), changes);
//!
//! let cookbooks = changeset.cookbooks().unwrap();
//! assert_eq!(cookbooks[0].name(), "apache");
//! assert_eq!(cookbooks[0].status(), ArtifactStatus::Modified);
//!
//! let roles = changeset.roles();
//! assert_eq!(roles[0].name(), "web");
//! assert_eq!(roles[0].status(), ArtifactStatus::Deleted);
//! ```

#![deny(missing_docs)]

mod change;
mod changeset;
mod cookbook;
mod databag;
mod errors;
mod locations;
mod parse;
mod role;
mod symlink;

pub use change::{ArtifactStatus, ChangeStatus, RawChange};
pub use changeset::{ChangeSource, Changeset};
pub use cookbook::CookbookChange;
pub use databag::DatabagChange;
pub use errors::{ParseError, SymlinkError};
pub use locations::Locations;
pub use parse::{VcsName, parse_git_name_status_z};
pub use role::RoleChange;
pub use symlink::{SymlinkMapping, discover_symlinks, remap_changes};
