use super::ignore::{normalize_path, IgnoreSet};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Relative path -> file text.
pub type Bundle = BTreeMap<String, String>;

/// Walk `root` and collect every regular file the ignore set lets through.
///
/// Ignored directories are not entered. Every path below one shares its
/// prefix, so the result matches testing each path on its own.
pub fn collect_bundle(root: &Path, ignore: &IgnoreSet) -> Result<Bundle> {
    let mut bundle = Bundle::new();
    walk_dir(root, root, ignore, &mut bundle)?;
    debug!("Bundled {} files from {}", bundle.len(), root.display());
    Ok(bundle)
}

fn walk_dir(root: &Path, dir: &Path, ignore: &IgnoreSet, bundle: &mut Bundle) -> Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(rel) => normalize_path(&rel.to_string_lossy()),
            Err(_) => continue,
        };

        if ignore.is_ignored(&relative) {
            debug!("Skipping {}", relative);
            continue;
        }

        info!("{}", relative);

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_dir(root, &path, ignore, bundle)?;
        } else if file_type.is_file() || (file_type.is_symlink() && points_to_file(&path)) {
            bundle.insert(relative, read_text(&path)?);
        }
    }

    Ok(())
}

// Symlinked directories are left alone; dangling links count as non-files.
fn points_to_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Read a file as text, replacing invalid UTF-8 and folding `\r\n` / `\r` into `\n`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    if text.contains('\r') {
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Ok(text.into_owned())
    }
}
