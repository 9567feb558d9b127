//! Directory walk that writes one barrel per asset directory

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::barrel::Barrel;
use crate::error::{Result, ScaffoldError};

pub const DEFAULT_INDEX_NAME: &str = "index.js";

/// Outcome of a scaffold run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Barrels created or changed.
    pub written: Vec<PathBuf>,
    /// Barrels already up to date.
    pub unchanged: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// Writes a barrel into every directory below `root` that holds files.
#[derive(Clone, Debug)]
pub struct ScaffoldGenerator {
    root: PathBuf,
    index_name: String,
    include_root: bool,
}

impl ScaffoldGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            include_root: false,
        }
    }

    /// File name of the generated barrel.
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Also write a barrel for the files directly in `root`.
    pub fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    pub fn run(&self) -> Result<ScaffoldReport> {
        info!("Scaffolding barrels under {}", self.root.display());

        let mut report = ScaffoldReport::default();
        let dirs = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in dirs {
            let entry = entry.map_err(|err| walk_error(&self.root, err))?;
            if !entry.file_type().is_dir() || (entry.depth() == 0 && !self.include_root) {
                continue;
            }
            self.scaffold_dir(entry.path(), &mut report)?;
        }

        info!(
            "Scaffolded {} barrels ({} written, {} unchanged)",
            report.total(),
            report.written.len(),
            report.unchanged.len()
        );
        Ok(report)
    }

    /// Render the barrel for `dir`, writing it only if its content changed.
    fn scaffold_dir(&self, dir: &Path, report: &mut ScaffoldReport) -> Result<()> {
        let barrel = Barrel::from_files(dir, self.files(dir)?)?;
        if barrel.is_empty() {
            debug!("No files in {}, skipping", dir.display());
            return Ok(());
        }

        let content = barrel.render();
        let index = dir.join(&self.index_name);
        if fs::read_to_string(&index).is_ok_and(|existing| existing == content) {
            debug!("{} is up to date", index.display());
            report.unchanged.push(index);
            return Ok(());
        }

        fs::write(&index, content).map_err(|source| ScaffoldError::Write {
            path: index.clone(),
            source,
        })?;
        debug!("Wrote {}", index.display());
        report.written.push(index);
        Ok(())
    }

    /// Visible files directly in `dir` (the barrel itself excluded), sorted.
    ///
    /// Symlinks to files count as files; symlinked directories are never
    /// entered.
    fn files(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| walk_error(dir, err))?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                debug!("Skipping non UTF-8 entry in {}", dir.display());
                continue;
            };
            if name != self.index_name {
                files.push(name.to_string());
            }
        }
        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn walk_error(dir: &Path, err: walkdir::Error) -> ScaffoldError {
    ScaffoldError::Read {
        path: err.path().unwrap_or(dir).to_path_buf(),
        source: err.into(),
    }
}
