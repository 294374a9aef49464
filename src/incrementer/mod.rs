use anyhow::Result;
use log::{debug, error, info};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::arguments::{LineEnding, ReplaceMode};
use crate::context::{PipelineContext, SharedValue};

pub mod coercion;
pub mod document;

use coercion::{KEY_ASSIGNMENT, ValueCoercion};
use document::{PropertiesDocument, VersionCodeLine};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncrementError {
    #[error("No VERSION_CODE variable found in '{}', please ensure file contains 'VERSION_CODE=0' declaration", .path.display())]
    MissingKey { path: PathBuf },
    #[error("VERSION_CODE value is not a non-negative integer: '{line}'")]
    MalformedValue { line: String },
    #[error("VERSION_CODE {value} cannot be incremented any further")]
    Overflow { value: String },
}

/// The integer build number stored under `VERSION_CODE`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionCode(pub u64);

impl VersionCode {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Result<VersionCode, IncrementError> {
        self.0
            .checked_add(1)
            .map(VersionCode)
            .ok_or_else(|| IncrementError::Overflow {
                value: self.0.to_string(),
            })
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IncrementOptions {
    pub replace_mode: ReplaceMode,
    pub line_ending: LineEnding,
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementOutcome {
    /// Full file text after the rewrite
    pub contents: String,
    pub version_code: VersionCode,
    /// Matched lines as they were before the rewrite
    pub matched: Vec<VersionCodeLine>,
}

#[derive(Debug, Clone, Default)]
pub struct VersionCodeIncrementer {
    options: IncrementOptions,
}

impl VersionCodeIncrementer {
    pub fn new(options: IncrementOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IncrementOptions {
        &self.options
    }

    /// Increments `VERSION_CODE` in the file at `path` and writes the file back.
    ///
    /// The file is left untouched when no line declares the version code or a
    /// value cannot be read. The write itself is a plain overwrite.
    pub fn increment(&self, path: impl AsRef<Path>) -> Result<VersionCode> {
        let path = path.as_ref();
        debug!("Reading version properties: '{}'", path.display());
        let contents = std::fs::read_to_string(path)?;

        let Some(outcome) = self.apply(&contents)? else {
            error!(
                "VERSION_CODE not found in '{}', please ensure file contains 'VERSION_CODE=0' declaration",
                path.display()
            );
            return Err(Self::missing_key(path).into());
        };

        std::fs::write(path, &outcome.contents)?;
        debug!("Wrote '{}'", path.display());
        Ok(outcome.version_code)
    }

    /// Rewrites every `VERSION_CODE` line of `contents` in memory.
    ///
    /// Returns `None` when no line declares the version code.
    pub fn apply(&self, contents: &str) -> Result<Option<IncrementOutcome>> {
        let coercion = ValueCoercion::new(self.options.strict)?;
        let original = PropertiesDocument::parse(contents);
        let mut document = original.clone();
        let mut text = contents.to_string();
        let mut matched = vec![];
        let mut version_code = None;

        for index in original.version_code_indices() {
            let raw = &original.lines()[index];
            let current = coercion.parse_line(raw)?;
            let next = current.next()?;
            let replacement = format!(
                "{KEY_ASSIGNMENT}{next}{}",
                self.options.line_ending.terminator_for(raw)
            );
            debug!("Incrementing version code on line {} from {} -> {}", index + 1, current, next);

            match self.options.replace_mode {
                ReplaceMode::Position => {
                    document.replace_line(index, replacement);
                }
                ReplaceMode::Content => text = text.replace(raw.as_str(), &replacement),
            }

            matched.push(VersionCodeLine {
                index,
                raw: raw.clone(),
                value: current,
            });
            version_code = Some(next);
        }

        let Some(version_code) = version_code else {
            return Ok(None);
        };
        let contents = match self.options.replace_mode {
            ReplaceMode::Position => document.render(),
            ReplaceMode::Content => text,
        };

        Ok(Some(IncrementOutcome {
            contents,
            version_code,
            matched,
        }))
    }

    /// Reads the value currently declared by the last `VERSION_CODE` line without writing.
    pub fn current(&self, path: impl AsRef<Path>) -> Result<VersionCode> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let coercion = ValueCoercion::new(self.options.strict)?;
        let document = PropertiesDocument::parse(&contents);

        let mut current = None;
        for index in document.version_code_indices() {
            current = Some(coercion.parse_line(&document.lines()[index])?);
        }
        Ok(current.ok_or_else(|| Self::missing_key(path))?)
    }

    fn missing_key(path: &Path) -> IncrementError {
        IncrementError::MissingKey {
            path: path.to_path_buf(),
        }
    }

    /// Runs the increment as a pipeline step, publishing the new value to `context`.
    pub fn run(&self, path: impl AsRef<Path>, context: &mut PipelineContext) -> Result<VersionCode> {
        let version_code = self.increment(path)?;
        info!("Android version code incremented to {}", version_code);
        context.set(SharedValue::AndroidVersionCode, version_code);
        Ok(version_code)
    }
}
