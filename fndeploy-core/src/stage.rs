// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Build directory staging.
//!
//! The build root is recreated empty once per run. Each staged function gets
//! `<build root>/<basename(source)>` holding its source tree plus any include
//! paths, copied with their relative parents preserved. A failed copy aborts
//! the run and leaves whatever was already staged in place.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{FunctionDefaults, FunctionSpec};
use crate::error::{DeployResult, StagingError};

/// Default build root, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = ".build";

/// Owns the build root for the duration of a run.
#[derive(Debug, Clone)]
pub struct BuildStager {
    /// Directory that relative sources and include paths are resolved against.
    workdir: PathBuf,
    /// Build root as written on the deploy command line.
    build_dir: PathBuf,
}

impl BuildStager {
    pub fn new(workdir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            build_dir: build_dir.into(),
        }
    }

    /// Build root as passed to the deploy command (relative to the workdir).
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Absolute (or workdir-joined) location of the build root.
    pub fn build_root(&self) -> PathBuf {
        self.workdir.join(&self.build_dir)
    }

    /// Remove any previous build root and create it empty.
    pub fn prepare(&self) -> DeployResult<PathBuf> {
        let root = self.build_root();

        if root.exists() {
            fs::remove_dir_all(&root).map_err(|e| StagingError::io("remove", &root, e))?;
        }
        fs::create_dir_all(&root).map_err(|e| StagingError::io("create", &root, e))?;

        tracing::debug!(build_root = %root.display(), "Created build folder");

        Ok(root)
    }

    /// Stage one function and return its build subdirectory.
    pub fn stage(
        &self,
        spec: &FunctionSpec,
        defaults: &FunctionDefaults,
    ) -> DeployResult<PathBuf> {
        let source = self.workdir.join(&spec.source);
        if !source.exists() {
            return Err(StagingError::SourceNotFound { path: source }.into());
        }
        if !source.is_dir() {
            return Err(StagingError::NotADirectory { path: source }.into());
        }

        let dest = self.build_root().join(function_dir_name(&spec.source)?);

        copy_tree(&source, &dest)?;

        for file in &defaults.include_files {
            self.copy_file_with_parents(file, &dest)?;
        }

        for dir in &spec.include_dirs {
            self.sync_with_parents(dir, &dest)?;
        }

        for file in &spec.include_files {
            self.copy_file_with_parents(file, &dest)?;
        }

        tracing::info!(
            function = %spec.name,
            dest = %dest.display(),
            "Compiled function directory"
        );

        Ok(dest)
    }

    /// Like `cp --parents <file> <dest>`.
    fn copy_file_with_parents(&self, file: &Path, dest: &Path) -> DeployResult<()> {
        let src = self.workdir.join(file);
        if !src.exists() {
            return Err(StagingError::SourceNotFound { path: src }.into());
        }
        if !src.is_file() {
            return Err(StagingError::NotAFile { path: src }.into());
        }

        let target = dest.join(relative_parents(file));
        copy_file(&src, &target)
    }

    /// Like `rsync -aR <path> <dest>`: merges into the destination and never
    /// deletes what is already there. A `/./` in `path` marks where the
    /// relative part starts.
    fn sync_with_parents(&self, path: &Path, dest: &Path) -> DeployResult<()> {
        let src = self.workdir.join(path);
        if !src.exists() {
            return Err(StagingError::SourceNotFound { path: src }.into());
        }

        let target = dest.join(rsync_relative(path));
        if src.is_dir() {
            copy_tree(&src, &target)
        } else {
            copy_file(&src, &target)
        }
    }
}

/// Name of the function's build subdirectory.
pub fn function_dir_name(source: &Path) -> Result<&OsStr, StagingError> {
    source.file_name().ok_or_else(|| StagingError::NoBasename {
        path: source.to_path_buf(),
    })
}

/// Strip root, prefix and `.` components so the path can be re-rooted.
fn relative_parents(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// Relative part of an `rsync -R` source: whatever follows the first `/./`,
/// or the whole path without one.
fn rsync_relative(path: &Path) -> PathBuf {
    let marked = path
        .to_str()
        .and_then(|s| s.split_once("/./"))
        .map(|(_, rest)| Path::new(rest));
    relative_parents(marked.unwrap_or(path))
}

/// Recursively copy `src` into `dst`, merging with existing content.
fn copy_tree(src: &Path, dst: &Path) -> DeployResult<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| StagingError::Walk {
            path: src.to_path_buf(),
            message: e.to_string(),
        })?;

        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| StagingError::Walk {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| StagingError::io("create", &target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> DeployResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| StagingError::io("create", parent, e))?;
    }
    fs::copy(src, dst).map_err(|e| StagingError::io("copy", src, e))?;

    tracing::trace!(src = %src.display(), dst = %dst.display(), "Copied file");

    Ok(())
}
