// Copyright 2026 The artifact-changes Authors

use crate::helpers::{
    cookbooks, databags, expected, roles, run, vcs_command, write_file,
    write_initial_tree,
};
use anyhow::Result;
use artifact_changes::{ArtifactStatus, ChangeStatus, Locations};
use artifact_changes_vcs::{RepoError, Repository, VcsName};
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use std::{fs, process::Command};

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
fn git_command() -> Command {
    vcs_command("GIT", "git")
}

/// Initializes a git repository and configures the user.
fn init_git_repo(repo_root: &Utf8Path) -> Result<()> {
    run(git_command().args(["init"]), repo_root)?;
    run(
        git_command().args(["config", "user.email", "test@example.com"]),
        repo_root,
    )?;
    run(git_command().args(["config", "user.name", "Test User"]), repo_root)?;
    run(git_command().args(["config", "commit.gpgsign", "false"]), repo_root)?;
    Ok(())
}

/// Stages everything and commits it. Returns the commit hash.
fn commit_all(repo_root: &Utf8Path, message: &str) -> Result<String> {
    run(git_command().args(["add", "-A"]), repo_root)?;
    run(git_command().args(["commit", "-m", message]), repo_root)?;
    run(git_command().args(["rev-parse", "HEAD"]), repo_root)
}

/// Sets up a repository with two commits:
///
/// 1. The initial tree.
/// 2. An apache recipe change, the mysql cookbook removed, `roles/db.rb`
///    renamed to `roles/database.rb`, and a new `users/bob` data bag item.
///
/// Returns (temp_dir, first_commit, second_commit).
fn setup_git_repo() -> Result<(Utf8TempDir, String, String)> {
    let temp = Utf8TempDir::with_prefix("artifact-changes-git-")?;
    let repo_root = temp.path();

    init_git_repo(repo_root)?;
    write_initial_tree(repo_root)?;
    let first = commit_all(repo_root, "Initial tree")?;

    write_file(
        repo_root,
        "cookbooks/apache/recipes/default.rb",
        "package 'httpd'\nservice 'httpd' do\n  action :start\nend\n",
    )?;
    fs::remove_dir_all(repo_root.join("cookbooks/mysql"))?;
    fs::rename(
        repo_root.join("roles/db.rb"),
        repo_root.join("roles/database.rb"),
    )?;
    write_file(
        repo_root,
        "databags/users/bob.json",
        "{\"id\": \"bob\", \"groups\": [\"admin\", \"wheel\", \"ops\"]}\n",
    )?;
    let second = commit_all(repo_root, "Rework cookbooks and roles")?;

    Ok((temp, first, second))
}

#[test]
fn test_git_changes_between_commits() -> Result<()> {
    let (temp, first, second) = setup_git_repo()?;
    let repo = Repository::open(temp.path())?;
    assert_eq!(repo.vcs().name(), VcsName::Git);
    assert_eq!(repo.head_rev()?, second);

    let changeset = repo.changeset(
        Some(first.as_str()),
        Some(second.as_str()),
        Locations::default(),
    )?;

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
        "a rename is a deletion plus a modification"
    );
    assert_eq!(
        databags(&changeset),
        expected(&[("users/bob", ArtifactStatus::Modified)]),
    );

    Ok(())
}

#[test]
fn test_git_changes_against_working_copy() -> Result<()> {
    let (temp, _, second) = setup_git_repo()?;
    let repo = Repository::open(temp.path())?;

    write_file(
        temp.path(),
        "roles/web.json",
        "{\"name\": \"web\", \
         \"run_list\": [\"recipe[apache]\", \"recipe[ntp]\"]}\n",
    )?;

    let changeset =
        repo.changeset(Some(second.as_str()), None, Locations::default())?;
    assert_eq!(
        roles(&changeset),
        expected(&[("web", ArtifactStatus::Modified)]),
        "uncommitted edits are compared against the start revision"
    );
    assert!(cookbooks(&changeset)?.is_empty());
    assert!(databags(&changeset).is_empty());

    Ok(())
}

#[test]
fn test_git_full_listing_without_start_ref() -> Result<()> {
    let (temp, _, _) = setup_git_repo()?;
    let repo = Repository::open(temp.path())?;

    let changeset = repo.changeset(None, None, Locations::default())?;
    assert!(
        changeset
            .changes()
            .iter()
            .all(|change| change.status() == ChangeStatus::Added),
        "every listed file is reported as added"
    );
    assert!(
        changeset
            .changes()
            .iter()
            .any(|change| change.path().as_str() == "README.md"),
        "files outside artifact directories are listed too"
    );

    assert_eq!(
        cookbooks(&changeset)?,
        expected(&[("apache", ArtifactStatus::Modified)]),
    );
    assert_eq!(
        roles(&changeset),
        expected(&[
            ("database", ArtifactStatus::Modified),
            ("web", ArtifactStatus::Modified),
        ]),
    );
    assert_eq!(
        databags(&changeset),
        expected(&[
            ("users/alice", ArtifactStatus::Modified),
            ("users/bob", ArtifactStatus::Modified),
        ]),
    );

    Ok(())
}

#[test]
fn test_git_unknown_ref() -> Result<()> {
    let (temp, first, _) = setup_git_repo()?;
    let repo = Repository::open(temp.path())?;

    let err = repo
        .changeset(Some("no-such-branch"), None, Locations::default())
        .unwrap_err();
    match err {
        RepoError::UnknownRef { vcs_name, reference } => {
            assert_eq!(vcs_name, VcsName::Git);
            assert_eq!(reference, "no-such-branch");
        }
        other => panic!("expected UnknownRef, got {other:?}"),
    }

    let missing = "0000000000000000000000000000000000000000";
    let err = repo
        .changeset(Some(first.as_str()), Some(missing), Locations::default())
        .unwrap_err();
    assert!(
        matches!(
            &err,
            RepoError::UnknownRef { reference, .. } if reference == missing
        ),
        "the end reference is validated too: {err:?}"
    );

    Ok(())
}

#[test]
fn test_git_non_ascii_deletions() -> Result<()> {
    let temp = Utf8TempDir::with_prefix("artifact-changes-git-utf8-")?;
    let repo_root = temp.path();

    init_git_repo(repo_root)?;
    // Without -z, git would quote these paths.
    run(git_command().args(["config", "core.quotePath", "true"]), repo_root)?;
    write_initial_tree(repo_root)?;
    write_file(repo_root, "cookbooks/café/metadata.rb", "name 'café'\n")?;
    write_file(repo_root, "cookbooks/café/recipes/default.rb", "# café\n")?;
    write_file(repo_root, "roles/café.json", "{\"name\": \"café\"}\n")?;
    let first = commit_all(repo_root, "Add café")?;

    fs::remove_file(repo_root.join("cookbooks/café/metadata.rb"))?;
    fs::remove_file(repo_root.join("roles/café.json"))?;
    let second = commit_all(repo_root, "Remove café")?;

    let repo = Repository::open(repo_root)?;
    let changeset = repo.changeset(
        Some(first.as_str()),
        Some(second.as_str()),
        Locations::default(),
    )?;
    assert_eq!(
        cookbooks(&changeset)?,
        expected(&[("café", ArtifactStatus::Deleted)]),
    );
    assert_eq!(
        roles(&changeset),
        expected(&[("café", ArtifactStatus::Deleted)]),
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_git_symlinked_cookbook() -> Result<()> {
    use std::os::unix::fs::symlink;

    let temp = Utf8TempDir::with_prefix("artifact-changes-git-symlink-")?;
    let repo_root = temp.path();

    init_git_repo(repo_root)?;
    write_initial_tree(repo_root)?;
    write_file(repo_root, "shared/base/metadata.rb", "name 'base'\n")?;
    write_file(repo_root, "shared/base/recipes/default.rb", "# base\n")?;
    symlink("../shared/base", repo_root.join("cookbooks/base"))?;
    let first = commit_all(repo_root, "Add shared base cookbook")?;

    write_file(
        repo_root,
        "shared/base/recipes/default.rb",
        "# base\npackage 'ntp'\n",
    )?;
    let second = commit_all(repo_root, "Install ntp")?;

    let repo = Repository::open(repo_root)?;

    let untracked = repo.changeset(
        Some(first.as_str()),
        Some(second.as_str()),
        Locations::default(),
    )?;
    assert!(
        cookbooks(&untracked)?.is_empty(),
        "without symlink tracking the change is outside every cookbook dir"
    );

    let tracked = repo.changeset(
        Some(first.as_str()),
        Some(second.as_str()),
        Locations::default().with_symlink_tracking(true),
    )?;
    assert_eq!(
        cookbooks(&tracked)?,
        expected(&[("base", ArtifactStatus::Modified)]),
    );

    Ok(())
}
