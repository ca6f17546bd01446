//! Saving falsified runs so they can be replayed.
//!
//! A [`FailureRecord`] keeps the seed and trial count of the run that failed
//! alongside the `Debug` text of its cases. Because every run is a pure
//! function of those two numbers, [`FailureRecord::replay_parameters`] brings
//! back the exact same failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::RunParameters;
use crate::error::ConfigError;
use crate::property::Falsified;
use crate::rng::RandomState;

/// A saved property failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Name of the falsified property
    pub name: String,
    /// Seed of the run's starting state
    pub seed: i64,
    /// Trial budget of the run
    pub trials: usize,
    /// `Debug` text of the failing case
    pub failed_case: String,
    /// Trials that passed before the failure
    pub successes: usize,
    /// `Debug` text of the last passing case
    pub last_success_case: Option<String>,
    /// Assertion messages of the failing trial
    pub errors: Vec<String>,
}

impl FailureRecord {
    /// Capture a failure together with the parameters that produced it
    pub fn from_falsified<A: fmt::Debug>(
        falsified: &Falsified<A>,
        params: &RunParameters,
    ) -> Self {
        Self {
            name: falsified.name.clone(),
            seed: params.state.seed(),
            trials: params.trials,
            failed_case: format!("{:?}", falsified.failed_case),
            successes: falsified.successes,
            last_success_case: falsified
                .last_success_case
                .as_ref()
                .map(|case| format!("{:?}", case)),
            errors: falsified
                .errors
                .messages()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Parameters that reproduce the recorded run
    pub fn replay_parameters(&self) -> Result<RunParameters, ConfigError> {
        RunParameters::new(self.trials, RandomState::new(self.seed))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Directory of failure records, one subdirectory per property
pub struct FailureSnapshot {
    root_dir: PathBuf,
}

impl FailureSnapshot {
    /// Open (creating if needed) a snapshot directory
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let root_dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Directory holding the records of property `name`, always a direct
    /// child of the snapshot root
    fn property_dir(&self, name: &str) -> PathBuf {
        self.root_dir.join(directory_name(name))
    }

    /// Write `record` under its property name; one file per seed
    pub fn save(&self, record: &FailureRecord) -> io::Result<PathBuf> {
        let dir = self.property_dir(&record.name);
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("failure_seed_{}.json", record.seed));
        let json = record
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = File::create(&path)?;
        file.write_all(json.as_bytes())?;
        Ok(path)
    }

    /// Every readable record saved for `name`, ordered by seed
    pub fn load(&self, name: &str) -> io::Result<Vec<FailureRecord>> {
        let dir = self.property_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let mut contents = String::new();
            File::open(&path)?.read_to_string(&mut contents)?;
            match FailureRecord::from_json(&contents) {
                Ok(record) if record.name == name => records.push(record),
                Ok(_) => {}
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping unreadable failure record"
                ),
            }
        }
        records.sort_by_key(|record| record.seed);
        Ok(records)
    }

    /// Remove every record saved for `name`
    pub fn clear(&self, name: &str) -> io::Result<()> {
        let dir = self.property_dir(name);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Encode a property name as a single path component.
///
/// ASCII alphanumerics, `-` and `_` are kept and every other byte becomes
/// `%XX`, so separators and `.` never reach the filesystem and distinct names
/// map to distinct directories. The empty name becomes `%`.
fn directory_name(name: &str) -> String {
    if name.is_empty() {
        return "%".to_string();
    }
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
