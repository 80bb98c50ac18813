// Copyright 2026 The artifact-changes Authors

//! Error types for running VCS commands against a repository.

use artifact_changes::{ParseError, VcsName};
use camino::Utf8PathBuf;
use std::{ffi::OsString, io};
use thiserror::Error;

/// An error from reading a VCS binary path from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VcsEnvError {
    /// The environment variable is set but is not valid UTF-8.
    #[error("${var} environment variable is not valid UTF-8: {value:?}")]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error that occurs during VCS detection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VcsDetectError {
    /// The provided repository root does not exist.
    #[error(
        "{repo_root} does not exist \
         (expected a repository root with .git, .hg or .svn)"
    )]
    PathNotFound {
        /// The path that was provided.
        repo_root: Utf8PathBuf,
    },

    /// The provided repository root is not a directory.
    #[error(
        "{repo_root} is not a directory \
         (expected a repository root with .git, .hg or .svn)"
    )]
    NotADirectory {
        /// The path that was provided.
        repo_root: Utf8PathBuf,
    },

    /// An I/O error occurred while probing the repository root.
    #[error("I/O error while checking for VCS at {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// None of `.git`, `.hg` or `.svn` was found at the repository root.
    #[error("no VCS found at {repo_root} (expected .git, .hg or .svn)")]
    NotFound {
        /// The repository root that was searched.
        repo_root: Utf8PathBuf,
    },

    /// A VCS environment variable is not valid UTF-8.
    #[error(transparent)]
    Env(#[from] VcsEnvError),
}

/// An error from running a VCS command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// Failed to spawn the VCS process.
    #[error("failed to run {vcs_name} at {binary_path:?} in {repo_root}")]
    SpawnFailed {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The path to the VCS executable.
        binary_path: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The VCS command exited unsuccessfully.
    #[error("`{vcs_name} {args}` failed ({exit_status}): {stderr}")]
    VcsFailed {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The arguments passed to the VCS, joined by spaces.
        args: String,
        /// A human-readable description of the exit status (e.g.,
        /// "exit status: 128" or "signal: 9").
        exit_status: String,
        /// The stderr output from the VCS.
        stderr: String,
    },

    /// The VCS command succeeded but its output could not be used.
    #[error("`{vcs_name} {args}` returned unexpected output: {stdout:?}")]
    UnexpectedOutput {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The arguments passed to the VCS, joined by spaces.
        args: String,
        /// The stdout content that could not be interpreted.
        stdout: String,
    },
}

/// An error from loading changes out of a repository.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepoError {
    /// A VCS command could not be run, or failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A start or end reference does not name a revision.
    #[error("{vcs_name} does not know revision {reference:?}")]
    UnknownRef {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The reference that failed to resolve.
        reference: String,
    },

    /// The VCS produced output that could not be parsed.
    #[error("could not parse {vcs_name} output")]
    MalformedOutput {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The parse failure, including the offending line.
        #[source]
        error: ParseError,
    },
}
