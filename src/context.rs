use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::incrementer::VersionCode;

/// Well-known outputs a step can hand to later pipeline steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SharedValue {
    AndroidVersionCode,
}

impl SharedValue {
    pub fn key(self) -> &'static str {
        match self {
            SharedValue::AndroidVersionCode => "ANDROID_VERSION_CODE",
        }
    }
}

impl fmt::Display for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outputs collected from pipeline steps, owned and passed around by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineContext {
    values: BTreeMap<SharedValue, String>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: SharedValue, value: impl fmt::Display) {
        self.values.insert(key, value.to_string());
    }

    pub fn get(&self, key: SharedValue) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn version_code(&self) -> Option<VersionCode> {
        self.get(SharedValue::AndroidVersionCode)?
            .parse()
            .ok()
            .map(VersionCode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SharedValue, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the outputs as `KEY=value` lines for shell or CI output files.
    pub fn render_env(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }

    /// Appends the rendered outputs to `path`, creating the file if needed.
    pub fn append_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file {:?}", path))?;
        file.write_all(self.render_env().as_bytes())?;
        debug!("Appended pipeline outputs to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let context = PipelineContext::new();
        assert!(context.is_empty());
        assert_eq!(context.get(SharedValue::AndroidVersionCode), None);
        assert_eq!(context.version_code(), None);
        assert_eq!(context.render_env(), "");
    }

    #[test]
    fn test_set_and_get() {
        let mut context = PipelineContext::new();
        context.set(SharedValue::AndroidVersionCode, VersionCode(57));
        assert_eq!(context.get(SharedValue::AndroidVersionCode), Some("57"));
        assert_eq!(context.version_code(), Some(VersionCode(57)));
    }

    #[test]
    fn test_set_overwrites() {
        let mut context = PipelineContext::new();
        context.set(SharedValue::AndroidVersionCode, 1);
        context.set(SharedValue::AndroidVersionCode, 2);
        assert_eq!(context.iter().count(), 1);
        assert_eq!(context.version_code(), Some(VersionCode(2)));
    }

    #[test]
    fn test_render_env() {
        let mut context = PipelineContext::new();
        context.set(SharedValue::AndroidVersionCode, VersionCode(8));
        assert_eq!(context.render_env(), "ANDROID_VERSION_CODE=8\n");
    }

    #[test]
    fn test_key_names() {
        assert_eq!(SharedValue::AndroidVersionCode.key(), "ANDROID_VERSION_CODE");
        assert_eq!(SharedValue::AndroidVersionCode.to_string(), "ANDROID_VERSION_CODE");
    }
}
