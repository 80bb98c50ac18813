// Copyright 2026 The artifact-changes Authors

//! Error types for diff parsing and symlink discovery.

use crate::VcsName;
use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// An error that occurs while parsing VCS diff or status output.
///
/// Parsing is all-or-nothing: a single unrecognized line fails the whole
/// parse, since skipping it could silently drop a deletion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A Git or Mercurial output line did not match the expected grammar.
    #[error("failed to parse {vcs_name} diff line: {line:?}")]
    MalformedDiffLine {
        /// The VCS whose grammar was being applied.
        vcs_name: VcsName,
        /// The offending line, verbatim.
        line: String,
    },

    /// A Subversion summary line did not match the expected grammar.
    ///
    /// Subversion separates the status columns from the path with spaces
    /// only, so paths that themselves contain whitespace cannot be told
    /// apart from malformed output and end up here.
    #[error(
        "failed to parse svn status line {line:?} \
         (paths containing spaces are not supported; \
         try a full upload instead)"
    )]
    MalformedStatusLine {
        /// The offending line, verbatim.
        line: String,
    },
}

impl ParseError {
    /// Returns the raw line that failed to parse.
    pub fn line(&self) -> &str {
        match self {
            ParseError::MalformedDiffLine { line, .. }
            | ParseError::MalformedStatusLine { line } => line,
        }
    }
}

/// An error that occurs while looking for symlinks in watched directories.
///
/// Individual broken symlinks are not errors: they are logged and skipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SymlinkError {
    /// The repository root could not be resolved to a real path.
    #[error("failed to resolve repository root {path}")]
    RepoRoot {
        /// The repository root that was provided.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A watched directory exists but could not be listed.
    #[error("failed to list watched directory {path}")]
    ReadDir {
        /// The directory being listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
