// Copyright 2026 The artifact-changes Authors

//! Version control system abstraction for listing and diffing files.

use crate::{CommandError, RepoError, VcsDetectError, VcsEnvError};
use artifact_changes::{
    ChangeStatus, RawChange, VcsName, parse_git_name_status_z,
};
use camino::Utf8Path;
use fs_err as fs;
use std::{
    io,
    process::{Command, Output},
};
use tracing::{debug, error, info};

/// Reads a VCS binary path from an environment variable, falling back
/// to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_vcs_env(
    var: &'static str,
    default: &str,
) -> Result<String, VcsEnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(VcsEnvError::NonUtf8 { var, value })
        }
    }
}

/// The version control system a repository is managed with.
///
/// Supports Git, Mercurial and Subversion. Use [`Vcs::git()`],
/// [`Vcs::hg()`], [`Vcs::svn()`], or [`Vcs::detect()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vcs(VcsKind);

#[derive(Debug, Clone, PartialEq, Eq)]
enum VcsKind {
    Git { binary: String },
    Hg { binary: String },
    Svn { binary: String },
}

impl Vcs {
    /// Creates a Git VCS using the `$GIT` environment variable or
    /// `"git"`.
    ///
    /// Returns an error if the `$GIT` environment variable is set
    /// but is not valid UTF-8.
    pub fn git() -> Result<Self, VcsEnvError> {
        let binary = read_vcs_env("GIT", "git")?;
        Ok(Vcs(VcsKind::Git { binary }))
    }

    /// Creates a Mercurial VCS using the `$HG` environment variable or
    /// `"hg"`.
    ///
    /// Returns an error if the `$HG` environment variable is set
    /// but is not valid UTF-8.
    pub fn hg() -> Result<Self, VcsEnvError> {
        let binary = read_vcs_env("HG", "hg")?;
        Ok(Vcs(VcsKind::Hg { binary }))
    }

    /// Creates a Subversion VCS using the `$SVN` environment variable or
    /// `"svn"`.
    ///
    /// Returns an error if the `$SVN` environment variable is set
    /// but is not valid UTF-8.
    pub fn svn() -> Result<Self, VcsEnvError> {
        let binary = read_vcs_env("SVN", "svn")?;
        Ok(Vcs(VcsKind::Svn { binary }))
    }

    /// Detects the appropriate VCS for a repository.
    ///
    /// `repo_root` must be the repository root (for Subversion, the root of
    /// the working copy). The first of `.git`, `.hg` and `.svn` that exists
    /// there decides. `.git` may be a file, as in worktrees and submodules.
    pub fn detect(repo_root: &Utf8Path) -> Result<Self, VcsDetectError> {
        // Use metadata() to distinguish "not a directory" from I/O
        // errors (e.g., permission denied).
        match fs::metadata(repo_root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(VcsDetectError::NotADirectory {
                    repo_root: repo_root.to_owned(),
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(VcsDetectError::PathNotFound {
                    repo_root: repo_root.to_owned(),
                });
            }
            Err(err) => {
                return Err(VcsDetectError::Io {
                    path: repo_root.to_owned(),
                    source: err,
                });
            }
        }

        let probes: [(&str, fn() -> Result<Vcs, VcsEnvError>); 3] =
            [(".git", Vcs::git), (".hg", Vcs::hg), (".svn", Vcs::svn)];
        for (marker, make) in probes {
            let path = repo_root.join(marker);
            match path.try_exists() {
                Ok(true) => {
                    let vcs = make()?;
                    debug!(%repo_root, vcs = %vcs.name(), "detected VCS");
                    return Ok(vcs);
                }
                Ok(false) => {}
                Err(source) => {
                    return Err(VcsDetectError::Io { path, source });
                }
            }
        }

        Err(VcsDetectError::NotFound { repo_root: repo_root.to_owned() })
    }

    /// Returns the path to the VCS binary.
    pub fn binary(&self) -> &str {
        match &self.0 {
            VcsKind::Git { binary }
            | VcsKind::Hg { binary }
            | VcsKind::Svn { binary } => binary,
        }
    }

    /// Returns the name of the VCS.
    pub fn name(&self) -> VcsName {
        match &self.0 {
            VcsKind::Git { .. } => VcsName::Git,
            VcsKind::Hg { .. } => VcsName::Hg,
            VcsKind::Svn { .. } => VcsName::Svn,
        }
    }

    /// Lists every file tracked in the repository, each reported as
    /// [`ChangeStatus::Added`].
    ///
    /// For Git, runs `git ls-files -z`. For Mercurial, runs `hg manifest`.
    /// For Subversion, runs `svn ls --depth infinity` and drops directory
    /// entries.
    pub fn list_files(
        &self,
        repo_root: &Utf8Path,
    ) -> Result<Vec<RawChange>, CommandError> {
        let files: Vec<RawChange> = match &self.0 {
            VcsKind::Git { .. } => {
                let stdout = self.output(repo_root, &["ls-files", "-z"])?;
                stdout
                    .split('\0')
                    .filter(|path| !path.is_empty())
                    .map(|path| RawChange::new(path, ChangeStatus::Added))
                    .collect()
            }
            VcsKind::Hg { .. } => {
                let stdout = self.output(repo_root, &["manifest"])?;
                stdout
                    .lines()
                    .filter(|path| !path.is_empty())
                    .map(|path| RawChange::new(path, ChangeStatus::Added))
                    .collect()
            }
            VcsKind::Svn { .. } => {
                let stdout =
                    self.output(repo_root, &["ls", "--depth", "infinity"])?;
                stdout
                    .lines()
                    .filter(|path| !path.is_empty() && !path.ends_with('/'))
                    .map(|path| RawChange::new(path, ChangeStatus::Added))
                    .collect()
            }
        };
        info!(vcs = %self.name(), count = files.len(), "listed all files");
        Ok(files)
    }

    /// Returns the changes between `start_ref` and `end_ref`, or between
    /// `start_ref` and the working copy if `end_ref` is `None`.
    ///
    /// For Git, runs `git diff --name-status -z`, so that paths are never
    /// quoted. For Mercurial, runs `hg status --rev`. For Subversion, runs
    /// `svn diff --summarize`.
    ///
    /// If the output cannot be parsed, every line of it is logged at error
    /// level before [`RepoError::MalformedOutput`] is returned.
    pub fn diff(
        &self,
        repo_root: &Utf8Path,
        start_ref: &str,
        end_ref: Option<&str>,
    ) -> Result<Vec<RawChange>, RepoError> {
        let range = end_ref.map(|end_ref| format!("{start_ref}:{end_ref}"));
        let mut args = Vec::new();
        match &self.0 {
            VcsKind::Git { .. } => {
                args.extend(["diff", "--name-status", "-z", start_ref]);
                args.extend(end_ref);
                // Keep revisions from being read as paths.
                args.push("--");
            }
            VcsKind::Hg { .. } => {
                args.extend(["status", "--rev", start_ref]);
                if let Some(end_ref) = end_ref {
                    args.extend(["--rev", end_ref]);
                }
            }
            VcsKind::Svn { .. } => {
                let revisions = range.as_deref().unwrap_or(start_ref);
                args.extend(["diff", "-r", revisions, "--summarize"]);
            }
        }

        let stdout = self.output(repo_root, &args)?;
        self.parse(&stdout, repo_root)
    }

    /// Returns whether `reference` names a revision in the repository.
    ///
    /// For Git, runs `git rev-parse --verify --quiet <ref>^{commit}`. For
    /// Mercurial, runs `hg log -r <ref>`. For Subversion, runs
    /// `svn info -r <ref>`. A non-zero exit means the reference is unknown.
    pub fn ref_exists(
        &self,
        repo_root: &Utf8Path,
        reference: &str,
    ) -> Result<bool, CommandError> {
        let output = match &self.0 {
            VcsKind::Git { .. } => {
                let commit = format!("{reference}^{{commit}}");
                self.run(
                    repo_root,
                    &["rev-parse", "--verify", "--quiet", &commit],
                )?
            }
            VcsKind::Hg { .. } => self.run(
                repo_root,
                &["log", "-r", reference, "--template", ""],
            )?,
            VcsKind::Svn { .. } => {
                self.run(repo_root, &["info", "-r", reference])?
            }
        };

        let exists = output.status.success();
        if !exists {
            debug!(
                vcs = %self.name(),
                reference,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "reference does not resolve"
            );
        }
        Ok(exists)
    }

    /// Returns the revision the working copy is at.
    ///
    /// For Git, runs `git rev-parse HEAD`. For Mercurial, runs
    /// `hg log -r . --template {node}`. For Subversion, runs
    /// `svn info --show-item last-changed-revision`.
    pub fn head_rev(
        &self,
        repo_root: &Utf8Path,
    ) -> Result<String, CommandError> {
        let args: &[&str] = match &self.0 {
            VcsKind::Git { .. } => &["rev-parse", "HEAD"],
            VcsKind::Hg { .. } => &["log", "-r", ".", "--template", "{node}"],
            VcsKind::Svn { .. } => {
                &["info", "--show-item", "last-changed-revision"]
            }
        };

        let stdout = self.output(repo_root, args)?;
        let rev = stdout.trim();
        if rev.is_empty() {
            return Err(CommandError::UnexpectedOutput {
                vcs_name: self.name(),
                args: args.join(" "),
                stdout,
            });
        }
        info!(vcs = %self.name(), rev, "resolved head revision");
        Ok(rev.to_owned())
    }

    fn parse(
        &self,
        stdout: &str,
        repo_root: &Utf8Path,
    ) -> Result<Vec<RawChange>, RepoError> {
        let vcs_name = self.name();
        let parsed = match &self.0 {
            VcsKind::Git { .. } => parse_git_name_status_z(stdout, repo_root),
            VcsKind::Hg { .. } | VcsKind::Svn { .. } => {
                vcs_name.parse_changes(stdout, repo_root)
            }
        };
        parsed.map_err(|error| {
            error!(vcs = %vcs_name, %error, "failed to parse diff output");
            for line in stdout.split(['\0', '\n']) {
                if !line.is_empty() {
                    error!(vcs = %vcs_name, line, "diff output");
                }
            }
            RepoError::MalformedOutput { vcs_name, error }
        })
    }

    /// Runs the VCS in `repo_root` and returns its stdout, failing on a
    /// non-zero exit.
    fn output(
        &self,
        repo_root: &Utf8Path,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let output = self.run(repo_root, args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = CommandError::VcsFailed {
                vcs_name: self.name(),
                args: args.join(" "),
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            };
            error!(%err, "VCS command failed");
            Err(err)
        }
    }

    /// Runs the VCS in `repo_root`, only failing if it cannot be spawned.
    fn run(
        &self,
        repo_root: &Utf8Path,
        args: &[&str],
    ) -> Result<Output, CommandError> {
        info!(vcs = %self.name(), %repo_root, ?args, "running VCS command");
        Command::new(self.binary())
            .current_dir(repo_root)
            .args(args)
            .output()
            .map_err(|source| {
                let err = CommandError::SpawnFailed {
                    vcs_name: self.name(),
                    binary_path: self.binary().to_string(),
                    repo_root: repo_root.to_owned(),
                    source,
                };
                error!(%err, "failed to spawn VCS");
                err
            })
    }
}
