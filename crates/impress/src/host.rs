//! Post-build integration with the host's output directory.
//!
//! The host writes folders whose names start with a private prefix (`_static`,
//! `_images`, ...). Some web servers refuse to serve such names, so after a
//! build they are moved to their unprefixed names and links to them are
//! rewritten with [`public_uri`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::config::HostConfig;

/// Folder whose nested repositories are removed before relocation.
const STATIC_DIR: &str = "static";
const GIT_DIR: &str = ".git";

/// The name a private URI is served under.
///
/// URIs that do not start with `prefix` are returned unchanged.
pub fn public_uri<'a>(uri: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return uri;
    }
    uri.strip_prefix(prefix).unwrap_or(uri)
}

/// Move every private folder directly under `outdir` to its public name.
///
/// Folders listed in [`HostConfig::keep_private`] stay where they are, as
/// does a folder named exactly the prefix. An existing folder at the target
/// is replaced. Returns the new paths, sorted.
///
/// # Errors
///
/// Returns the first I/O error; folders moved before it stay moved.
pub fn relocate_private_dirs(outdir: &Path, config: &HostConfig) -> io::Result<Vec<PathBuf>> {
    let prefix = config.private_prefix();
    if prefix.is_empty() {
        return Ok(Vec::new());
    }

    let mut private = Vec::new();
    for entry in fs::read_dir(outdir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !entry.file_type()?.is_dir() || !name.starts_with(prefix) {
            continue;
        }
        if public_uri(&name, prefix).is_empty() {
            debug!(dir = name; "Skipping folder without a public name");
            continue;
        }
        if config.keep_private().iter().any(|kept| *kept == name) {
            debug!(dir = name; "Keeping private folder");
            continue;
        }
        private.push(name);
    }
    private.sort();

    let mut moved = Vec::with_capacity(private.len());
    for name in private {
        let source = outdir.join(&name);
        let target = outdir.join(public_uri(&name, prefix));

        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        }
        if name == format!("{prefix}{STATIC_DIR}") {
            remove_nested_repositories(&source)?;
        }

        fs::rename(&source, &target)?;
        info!(from = name, to = target.display().to_string(); "Relocated private folder");
        moved.push(target);
    }
    Ok(moved)
}

/// Remove `*/.git` folders one level below `dir`.
fn remove_nested_repositories(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let repository = entry?.path().join(GIT_DIR);
        if repository.is_dir() {
            debug!(path = repository.display().to_string(); "Removing nested repository");
            fs::remove_dir_all(&repository)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_public_uri() {
        assert_eq!(public_uri("_static/app.css", "_"), "static/app.css");
        assert_eq!(public_uri("images/a.png", "_"), "images/a.png");
        assert_eq!(public_uri("_static", ""), "_static");
    }

    #[test]
    fn test_relocates_private_folders() {
        let out = tempfile::tempdir().unwrap();
        touch(&out.path().join("_images/a.png"));
        touch(&out.path().join("_modules/index.html"));
        touch(&out.path().join("_notes.txt"));
        touch(&out.path().join("images/stale.png"));

        let moved = relocate_private_dirs(out.path(), &HostConfig::default()).unwrap();

        assert_eq!(moved, [out.path().join("images")]);
        assert!(out.path().join("images/a.png").is_file());
        assert!(!out.path().join("images/stale.png").exists());
        assert!(out.path().join("_modules/index.html").is_file());
        assert!(out.path().join("_notes.txt").is_file());
        assert!(!out.path().join("_images").exists());
    }

    #[test]
    fn test_bare_prefix_folder_is_left_alone() {
        let out = tempfile::tempdir().unwrap();
        touch(&out.path().join("index.html"));
        fs::create_dir(out.path().join("_")).unwrap();

        let moved = relocate_private_dirs(out.path(), &HostConfig::default()).unwrap();

        assert!(moved.is_empty());
        assert!(out.path().join("index.html").is_file());
        assert!(out.path().join("_").is_dir());
    }

    #[test]
    fn test_static_drops_nested_repositories() {
        let out = tempfile::tempdir().unwrap();
        touch(&out.path().join("_static/impress.js/impress.js"));
        touch(&out.path().join("_static/impress.js/.git/HEAD"));
        touch(&out.path().join("_static/theme.css"));

        relocate_private_dirs(out.path(), &HostConfig::default()).unwrap();

        assert!(out.path().join("static/impress.js/impress.js").is_file());
        assert!(!out.path().join("static/impress.js/.git").exists());
        assert!(out.path().join("static/theme.css").is_file());
    }
}
