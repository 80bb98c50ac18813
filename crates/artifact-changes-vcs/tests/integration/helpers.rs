// Copyright 2026 The artifact-changes Authors

//! Shared helpers for building fixture repositories.

use anyhow::{Result, anyhow};
use artifact_changes::{ArtifactStatus, Changeset};
use camino::Utf8Path;
use std::{fs, process::Command};

/// Returns a `Command` for `default`, respecting the `$var` environment
/// variable.
pub fn vcs_command(var: &str, default: &str) -> Command {
    let bin = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Command::new(bin)
}

/// Runs `cmd` in `dir`, failing if it exits unsuccessfully, and returns its
/// trimmed stdout.
pub fn run(cmd: &mut Command, dir: &Utf8Path) -> Result<String> {
    let output = cmd.current_dir(dir).output()?;
    if !output.status.success() {
        return Err(anyhow!(
            "{cmd:?} failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim(),
        ));
    }
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Returns `Ok(true)` if `binary --version` works, and `Ok(false)` if the
/// `skip_var` environment variable is set or the binary is not installed.
pub fn check_available(
    var: &str,
    default: &str,
    skip_var: &str,
) -> Result<bool> {
    if std::env::var(skip_var).is_ok() {
        return Ok(false);
    }

    match vcs_command(var, default).arg("--version").output() {
        Ok(o) if o.status.success() => Ok(true),
        Ok(o) => Err(anyhow!(
            "{default} --version failed ({}): {}. \
             Set {skip_var}=1 to skip these tests",
            o.status,
            String::from_utf8_lossy(&o.stderr).trim(),
        )),
        Err(e) => {
            eprintln!(
                "skipping: {default} not found ({e}); \
                 install it to run these tests"
            );
            Ok(false)
        }
    }
}

/// Writes `contents` to `rel_path` under `root`, creating parent
/// directories.
pub fn write_file(
    root: &Utf8Path,
    rel_path: &str,
    contents: &str,
) -> Result<()> {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(())
}

/// Writes the fixture every backend starts from: two cookbooks, two roles
/// and a data bag item.
pub fn write_initial_tree(root: &Utf8Path) -> Result<()> {
    write_file(root, "cookbooks/apache/metadata.rb", "name 'apache'\n")?;
    write_file(
        root,
        "cookbooks/apache/recipes/default.rb",
        "package 'httpd'\n",
    )?;
    write_file(
        root,
        "cookbooks/mysql/metadata.json",
        "{\"name\": \"mysql\", \"version\": \"1.0.0\"}\n",
    )?;
    write_file(
        root,
        "cookbooks/mysql/recipes/server.rb",
        "package 'mysql-server'\nservice 'mysqld'\n",
    )?;
    write_file(
        root,
        "roles/web.json",
        "{\"name\": \"web\", \"run_list\": [\"recipe[apache]\"]}\n",
    )?;
    write_file(root, "roles/db.rb", "name 'db'\nrun_list 'recipe[mysql]'\n")?;
    write_file(
        root,
        "databags/users/alice.json",
        "{\"id\": \"alice\", \"shell\": \"/bin/zsh\"}\n",
    )?;
    write_file(root, "README.md", "chef repository\n")?;
    Ok(())
}

/// Returns cookbook names and statuses, sorted by name.
pub fn cookbooks(
    changeset: &Changeset,
) -> Result<Vec<(String, ArtifactStatus)>> {
    let mut found: Vec<_> = changeset
        .cookbooks()?
        .into_iter()
        .map(|cookbook| (cookbook.name().to_owned(), cookbook.status()))
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// Returns role names and statuses, sorted by name.
pub fn roles(changeset: &Changeset) -> Vec<(String, ArtifactStatus)> {
    let mut found: Vec<_> = changeset
        .roles()
        .into_iter()
        .map(|role| (role.name().to_owned(), role.status()))
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

/// Returns `bag/item` names and statuses, sorted by name.
pub fn databags(changeset: &Changeset) -> Vec<(String, ArtifactStatus)> {
    let mut found: Vec<_> = changeset
        .databags()
        .into_iter()
        .map(|bag| (format!("{}/{}", bag.name(), bag.item()), bag.status()))
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

/// Builds an expected `(name, status)` list.
pub fn expected(
    items: &[(&str, ArtifactStatus)],
) -> Vec<(String, ArtifactStatus)> {
    items
        .iter()
        .map(|(name, status)| (name.to_string(), *status))
        .collect()
}
