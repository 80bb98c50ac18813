// Copyright 2026 The artifact-changes Authors

//! Parsers turning VCS diff and status output into [`RawChange`]s.

use crate::{ChangeStatus, ParseError, RawChange};
use camino::Utf8Path;
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// The name of a version control system.
///
/// Each VCS reports changes in its own textual format; the name selects the
/// grammar used by [`VcsName::parse_changes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum VcsName {
    /// Git, parsed from `git diff --name-status`.
    Git,
    /// Mercurial, parsed from `hg status --rev <a> --rev <b>`.
    Hg,
    /// Subversion, parsed from `svn diff --summarize`.
    Svn,
}

impl fmt::Display for VcsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsName::Git => write!(f, "git"),
            VcsName::Hg => write!(f, "hg"),
            VcsName::Svn => write!(f, "svn"),
        }
    }
}

impl VcsName {
    /// Parses the diff or status output of this VCS.
    ///
    /// `repo_root` is stripped from the front of every reported path, so the
    /// returned paths are always relative to the repository root. Output
    /// order follows input order; Git renames and type changes expand in
    /// place into a deletion followed by a modification.
    ///
    /// Blank lines are skipped. Any other line that does not match the
    /// grammar fails the whole parse.
    pub fn parse_changes(
        self,
        output: &str,
        repo_root: &Utf8Path,
    ) -> Result<Vec<RawChange>, ParseError> {
        match self {
            VcsName::Git => parse_git_name_status(output, repo_root),
            VcsName::Hg => parse_hg_status(output, repo_root),
            VcsName::Svn => parse_svn_summary(output, repo_root),
        }
    }
}

/// Parses `git diff --name-status` output.
///
/// Each line is a status code followed by one or two tab-separated paths.
/// See [`git_record`] for the codes. Paths that git has C-quoted (because
/// they contain non-ASCII bytes, quotes, backslashes or tabs) are rejected,
/// since their unquoted form cannot be recovered reliably. Use
/// [`parse_git_name_status_z`] on `-z` output to handle such paths.
fn parse_git_name_status(
    output: &str,
    repo_root: &Utf8Path,
) -> Result<Vec<RawChange>, ParseError> {
    let mut changes = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let malformed = || ParseError::MalformedDiffLine {
            vcs_name: VcsName::Git,
            line: line.to_owned(),
        };

        let (code, rest) = line.split_once('\t').ok_or_else(malformed)?;
        let paths: Vec<&str> = rest.split('\t').collect();
        if paths.iter().any(|path| path.starts_with('"')) {
            return Err(malformed());
        }
        let record =
            git_record(code, &paths, repo_root).ok_or_else(malformed)?;
        changes.extend(record);
    }

    Ok(changes)
}

/// Parses `git diff --name-status -z` output.
///
/// Every field is terminated by a NUL byte: the status code, then one path,
/// or two for copies and renames. Paths are taken verbatim, so names with
/// non-ASCII bytes, tabs or newlines come through unchanged.
///
/// The codes and the repository root handling are the same as for
/// [`VcsName::Git`] with [`VcsName::parse_changes`]. A record that is cut
/// short or carries an unknown code fails the whole parse; the error's line
/// is the record with its fields joined by tabs.
pub fn parse_git_name_status_z(
    output: &str,
    repo_root: &Utf8Path,
) -> Result<Vec<RawChange>, ParseError> {
    let mut changes = Vec::new();
    let mut fields = output.split('\0');

    while let Some(code) = fields.next() {
        // The final terminator leaves an empty field behind.
        if code.is_empty() {
            continue;
        }
        let path_count = if code.starts_with(['C', 'R']) { 2 } else { 1 };
        let paths: Vec<&str> = fields.by_ref().take(path_count).collect();

        let record = (paths.len() == path_count)
            .then(|| git_record(code, &paths, repo_root))
            .flatten();
        let Some(record) = record else {
            let mut line = code.to_owned();
            for path in &paths {
                line.push('\t');
                line.push_str(path);
            }
            return Err(ParseError::MalformedDiffLine {
                vcs_name: VcsName::Git,
                line,
            });
        };
        changes.extend(record);
    }

    Ok(changes)
}

/// Expands one git status record into changes, or returns `None` if the
/// record is malformed.
///
/// - `A`, `M` (optionally with a score): one path, modified.
/// - `D`: one path, deleted.
/// - `C<score>`: old and new path; only the new path counts, as modified.
/// - `R<score>`: old path deleted, new path modified.
/// - `T`: the path is deleted and then modified, since its type changed.
fn git_record(
    code: &str,
    paths: &[&str],
    repo_root: &Utf8Path,
) -> Option<Vec<RawChange>> {
    let paths: Vec<&str> =
        paths.iter().map(|path| strip_repo_root(path, repo_root)).collect();
    if paths.iter().any(|path| path.is_empty()) {
        return None;
    }

    let record = match paths.as_slice() {
        [path] if code == "D" => {
            vec![RawChange::new(*path, ChangeStatus::Deleted)]
        }
        [path] if code == "T" => vec![
            RawChange::new(*path, ChangeStatus::Deleted),
            RawChange::new(*path, ChangeStatus::Modified),
        ],
        [path] if is_scored(code, 'A') || is_scored(code, 'M') => {
            vec![RawChange::new(*path, ChangeStatus::Modified)]
        }
        [_, new] if is_scored(code, 'C') => {
            vec![RawChange::new(*new, ChangeStatus::Modified)]
        }
        [old, new] if is_scored(code, 'R') => vec![
            RawChange::new(*old, ChangeStatus::Deleted),
            RawChange::new(*new, ChangeStatus::Modified),
        ],
        _ => return None,
    };
    Some(record)
}

/// Returns true if `code` is `letter` followed by an optional numeric score
/// (e.g. `R`, `R100`).
fn is_scored(code: &str, letter: char) -> bool {
    code.strip_prefix(letter)
        .is_some_and(|score| score.bytes().all(|b| b.is_ascii_digit()))
}

/// Parses `hg status` output: a one-character code, a space, and the path.
///
/// Mercurial reports renames as an independent removal and addition, so no
/// pairing happens here.
fn parse_hg_status(
    output: &str,
    repo_root: &Utf8Path,
) -> Result<Vec<RawChange>, ParseError> {
    let mut changes = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let malformed = || ParseError::MalformedDiffLine {
            vcs_name: VcsName::Hg,
            line: line.to_owned(),
        };

        let (code, path) = line.split_once(' ').ok_or_else(malformed)?;
        let status = match code {
            "A" => ChangeStatus::Added,
            "M" => ChangeStatus::Modified,
            "R" => ChangeStatus::Deleted,
            "C" => ChangeStatus::Clean,
            "!" => ChangeStatus::Missing,
            "?" => ChangeStatus::Untracked,
            "I" => ChangeStatus::Ignored,
            _ => return Err(malformed()),
        };
        let path = strip_repo_root(path, repo_root);
        if path.is_empty() {
            return Err(malformed());
        }
        changes.push(RawChange::new(path, status));
    }

    Ok(changes)
}

/// An item status column, an optional property status column, whitespace,
/// and a path without whitespace.
static SVN_SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w ])\w?\s+(\S+)$").expect("svn summary regex is valid")
});

/// Parses `svn diff --summarize` output.
///
/// A leading `D` means the path was deleted; every other well-formed line is
/// a modification (including property-only changes, which start with a
/// space).
fn parse_svn_summary(
    output: &str,
    repo_root: &Utf8Path,
) -> Result<Vec<RawChange>, ParseError> {
    let mut changes = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let captures = SVN_SUMMARY_LINE.captures(line).ok_or_else(|| {
            ParseError::MalformedStatusLine { line: line.to_owned() }
        })?;

        let status = if &captures[1] == "D" {
            ChangeStatus::Deleted
        } else {
            ChangeStatus::Modified
        };
        let path = strip_repo_root(&captures[2], repo_root);
        changes.push(RawChange::new(path, status));
    }

    Ok(changes)
}

/// Strips a leading `<repo_root>/` from `path`, if present.
fn strip_repo_root<'a>(path: &'a str, repo_root: &Utf8Path) -> &'a str {
    let root = repo_root.as_str().trim_end_matches('/');
    if root.is_empty() {
        return path;
    }
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}
