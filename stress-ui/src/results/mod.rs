//! Run directory access layer
//!
//! A run is a directory directly under the results root that holds both
//! `environment.json` and `output.jsonl`. Run directories are written by the
//! stress-test producer; nothing here creates, modifies or deletes them.
//!
//! All functions are blocking. HTTP handlers call them through
//! [`crate::api::blocking`].

use chrono::NaiveDateTime;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use stress_common::{Error, Result};
use tracing::{debug, warn};

mod output;

pub use output::{
    is_malformed_record, malformed_record, parse_output, OutputSummary, PARSE_ERROR_MARKER,
};

/// Metadata document required in every run directory
pub const ENVIRONMENT_FILE: &str = "environment.json";
/// Record log required in every run directory
pub const OUTPUT_FILE: &str = "output.jsonl";

/// Read-only view over the results root
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of all valid runs, newest first (reverse lexicographic)
    ///
    /// A missing root is not an error: there are simply no runs yet.
    pub fn list_runs(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            debug!("Results root {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!("Skipping non UTF-8 entry {:?}", raw);
                    continue;
                }
            };

            if is_run_dir(&entry.path()) {
                runs.push(name);
            } else {
                debug!("Skipping {}: not a run directory", name);
            }
        }

        runs.sort_unstable_by(|a, b| b.cmp(a));
        Ok(runs)
    }

    /// Validate a run identifier and return its directory
    ///
    /// Fails with [`Error::NotFound`] unless `run_id` is a single path
    /// component naming a run directory directly under the root.
    pub fn resolve_run(&self, run_id: &str) -> Result<RunDir> {
        if !is_valid_run_id(run_id) {
            debug!("Rejected run id {:?}", run_id);
            return Err(run_not_found(run_id));
        }

        let path = self.root.join(run_id);
        if !is_run_dir(&path) {
            return Err(run_not_found(run_id));
        }

        Ok(RunDir {
            id: run_id.to_string(),
            path,
        })
    }
}

/// A run directory that passed [`RunStore::resolve_run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    id: String,
    path: PathBuf,
}

impl RunDir {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse `environment.json` as a single JSON document
    pub fn read_environment(&self) -> Result<Value> {
        let path = self.path.join(ENVIRONMENT_FILE);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(format!("{} does not exist", ENVIRONMENT_FILE)),
            _ => Error::Io(e),
        })?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Parse(format!("{} parse failed: {}", ENVIRONMENT_FILE, e)))
    }

    /// Read every non-blank line of `output.jsonl`
    ///
    /// Lines that are not valid JSON come back as sentinel records (see
    /// [`malformed_record`]), so the result always has one entry per
    /// non-blank line, in file order.
    pub fn read_output(&self) -> Result<Vec<Value>> {
        let path = self.path.join(OUTPUT_FILE);
        let file = fs::File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(format!("{} does not exist", OUTPUT_FILE)),
            _ => Error::Io(e),
        })?;

        let rows = parse_output(std::io::BufReader::new(file))?;

        let malformed = rows.iter().filter(|row| is_malformed_record(row)).count();
        if malformed > 0 {
            warn!(
                "{}/{}: {} of {} lines are not valid JSON",
                self.id,
                OUTPUT_FILE,
                malformed,
                rows.len()
            );
        }

        Ok(rows)
    }

    /// Names of regular files in the run directory, ascending
    pub fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                files.push(name);
            }
        }

        files.sort_unstable();
        Ok(files)
    }

    /// Start time encoded in the run name, if it has one
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        run_started_at(&self.id)
    }
}

/// Both required files present as regular files
pub fn is_run_dir(path: &Path) -> bool {
    path.is_dir() && path.join(ENVIRONMENT_FILE).is_file() && path.join(OUTPUT_FILE).is_file()
}

/// Run ids must be exactly one normal path component
///
/// Rejects empty ids, `.`, `..`, and anything containing a separator.
pub fn is_valid_run_id(run_id: &str) -> bool {
    let mut components = Path::new(run_id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name == OsStr::new(run_id),
        _ => false,
    }
}

/// Parse a leading `YYYYMMDD_HHMMSS` stamp from a run name
pub fn run_started_at(run_id: &str) -> Option<NaiveDateTime> {
    let stamp = run_id.get(..15)?;
    NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").ok()
}

fn run_not_found(run_id: &str) -> Error {
    Error::NotFound(format!("Run not found: {}", run_id))
}
