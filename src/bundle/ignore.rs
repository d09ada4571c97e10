use crate::config::settings::BundleConfig;
use serde::{Deserialize, Serialize};

/// Folder holding local copies of the templating types the server can supply itself.
pub const BUNDLED_TYPES_DIR: &str = "templating-types";

/// How an ignore entry is compared against a relative path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain `starts_with` on the path string, so `push.py` also hides `push.pyc`.
    #[default]
    Prefix,
    /// Entry must equal the path or a leading run of whole segments.
    Segment,
}

#[derive(Debug, Clone)]
pub struct IgnoreSet {
    entries: Vec<String>,
    mode: MatchMode,
}

impl IgnoreSet {
    pub fn new<I, S>(entries: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            entries: Vec::new(),
            mode,
        };
        for entry in entries {
            set.push(entry.as_ref());
        }
        set
    }

    /// Ignore set for a push: the configured entries plus the bundled-types folder when enabled.
    pub fn for_bundle(config: &BundleConfig, use_bundled_types: bool) -> Self {
        let mut set = Self::new(&config.ignore, config.matching);
        if use_bundled_types {
            set.push(BUNDLED_TYPES_DIR);
        }
        set
    }

    pub fn push(&mut self, entry: &str) {
        let mut entry = normalize_path(entry);
        if self.mode == MatchMode::Segment {
            entry = entry.trim_end_matches('/').to_string();
        }
        // An empty prefix would swallow the whole tree.
        if entry.is_empty() {
            return;
        }
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| match self.mode {
            MatchMode::Prefix => path.starts_with(entry.as_str()),
            MatchMode::Segment => matches_segments(path, entry),
        })
    }
}

fn matches_segments(path: &str, entry: &str) -> bool {
    match path.strip_prefix(entry) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Bundle keys always use forward slashes.
pub fn normalize_path(raw: &str) -> String {
    raw.replace('\\', "/")
}
