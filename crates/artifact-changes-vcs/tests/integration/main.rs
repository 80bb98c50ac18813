// Copyright 2026 The artifact-changes Authors

//! Integration tests for artifact-changes-vcs, run against real
//! repositories.

mod git;
mod helpers;
mod svn;
