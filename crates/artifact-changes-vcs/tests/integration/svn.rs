// Copyright 2026 The artifact-changes Authors

use crate::helpers::{
    check_available, cookbooks, databags, expected, roles, run, vcs_command,
    write_file, write_initial_tree,
};
use anyhow::Result;
use artifact_changes::{ArtifactStatus, Locations};
use artifact_changes_vcs::{RepoError, Repository, VcsName};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use std::process::Command;

/// Returns a `Command` for svn, respecting the `$SVN` environment variable.
fn svn_command() -> Command {
    let mut cmd = vcs_command("SVN", "svn");
    cmd.arg("--non-interactive");
    cmd
}

fn check_svn_available() -> Result<bool> {
    Ok(check_available("SVN", "svn", "SKIP_SVN_TESTS")?
        && check_available("SVNADMIN", "svnadmin", "SKIP_SVN_TESTS")?)
}

/// Commits the working copy, then updates it so that it is not left at
/// mixed revisions.
fn commit(wc: &Utf8Path, message: &str) -> Result<()> {
    run(svn_command().args(["commit", "-m", message]), wc)?;
    run(svn_command().arg("update"), wc)?;
    Ok(())
}

/// Sets up a repository and a working copy with two revisions:
///
/// 1. The initial tree.
/// 2. An apache recipe change, the mysql metadata removed, `roles/db.rb`
///    moved to `roles/database.rb`, and a new `users/bob` data bag item.
///
/// Returns (temp_dir, working_copy).
fn setup_svn_repo() -> Result<(Utf8TempDir, Utf8PathBuf)> {
    let temp = Utf8TempDir::with_prefix("artifact-changes-svn-")?;
    let server = temp.path().join("server");
    let wc = temp.path().join("wc");

    run(
        vcs_command("SVNADMIN", "svnadmin").arg("create").arg(&server),
        temp.path(),
    )?;
    run(
        svn_command()
            .arg("checkout")
            .arg(format!("file://{server}"))
            .arg(&wc),
        temp.path(),
    )?;

    write_initial_tree(&wc)?;
    run(svn_command().args(["add", "--force", "."]), &wc)?;
    commit(&wc, "Initial tree")?;

    write_file(
        &wc,
        "cookbooks/apache/recipes/default.rb",
        "package 'httpd'\nservice 'httpd'\n",
    )?;
    run(svn_command().args(["rm", "cookbooks/mysql/metadata.json"]), &wc)?;
    run(svn_command().args(["mv", "roles/db.rb", "roles/database.rb"]), &wc)?;
    write_file(&wc, "databags/users/bob.json", "{\"id\": \"bob\"}\n")?;
    run(svn_command().args(["add", "databags/users/bob.json"]), &wc)?;
    commit(&wc, "Rework cookbooks and roles")?;

    Ok((temp, wc))
}

#[test]
fn test_svn_changes_between_revisions() -> Result<()> {
    if !check_svn_available()? {
        return Ok(());
    }
    let (_temp, wc) = setup_svn_repo()?;
    let repo = Repository::open(&wc)?;
    assert_eq!(repo.vcs().name(), VcsName::Svn);
    assert_eq!(repo.head_rev()?, "2");

    let changeset =
        repo.changeset(Some("1"), Some("2"), Locations::default())?;
    assert_eq!(
        cookbooks(&changeset)?,
        expected(&[
            ("apache", ArtifactStatus::Modified),
            ("mysql", ArtifactStatus::Deleted),
        ]),
    );
    assert_eq!(
        roles(&changeset),
        expected(&[
            ("database", ArtifactStatus::Modified),
            ("db", ArtifactStatus::Deleted),
        ]),
    );
    assert_eq!(
        databags(&changeset),
        expected(&[("users/bob", ArtifactStatus::Modified)]),
    );

    Ok(())
}

#[test]
fn test_svn_full_listing_and_unknown_ref() -> Result<()> {
    if !check_svn_available()? {
        return Ok(());
    }
    let (_temp, wc) = setup_svn_repo()?;
    let repo = Repository::open(&wc)?;

    let changeset = repo.changeset(None, None, Locations::default())?;
    assert!(
        changeset
            .changes()
            .iter()
            .all(|change| !change.path().as_str().ends_with('/')),
        "directories are not listed"
    );
    assert_eq!(
        cookbooks(&changeset)?,
        expected(&[
            ("apache", ArtifactStatus::Modified),
            // Only the recipe is left, so nothing marks it deleted.
            ("mysql", ArtifactStatus::Modified),
        ]),
    );
    assert_eq!(
        roles(&changeset),
        expected(&[
            ("database", ArtifactStatus::Modified),
            ("web", ArtifactStatus::Modified),
        ]),
    );

    let err = repo
        .changeset(Some("1"), Some("99"), Locations::default())
        .unwrap_err();
    assert!(
        matches!(
            &err,
            RepoError::UnknownRef { reference, .. } if reference == "99"
        ),
        "unexpected error: {err:?}"
    );

    Ok(())
}
