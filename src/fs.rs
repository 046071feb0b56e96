//! Filesystem access used by the loader and writer

use crate::error::{IfacesError, IfacesResult};
use glob::{MatchOptions, Pattern};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Read a file and return its lines
pub fn read_lines(path: &Path) -> IfacesResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| IfacesError::io(path, e))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Names of regular files in `dir` matching `pattern`, sorted
pub fn list_regular_files(dir: &Path, pattern: &Regex) -> IfacesResult<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IfacesError::io(dir, e))?;
    let mut names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| IfacesError::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!("Skipping non UTF-8 entry in {}", dir.display());
            continue;
        };

        if !pattern.is_match(name) {
            debug!("Skipping {} in {}", name, dir.display());
            continue;
        }

        // Follows symlinks, like a plain stat
        if entry.path().is_file() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Regular files matching the shell glob `pattern`, resolved against `base`
/// and sorted.
///
/// `*` and `?` never match a `/` or a leading dot, so hidden files only
/// show up when the pattern spells the dot out.
pub fn glob_regular_files(base: &Path, pattern: &str) -> IfacesResult<Vec<PathBuf>> {
    let escaped_base = PathBuf::from(Pattern::escape(&base.to_string_lossy()));
    let full = escaped_base.join(pattern);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let matches = glob::glob_with(&full.to_string_lossy(), options).map_err(|e| {
        IfacesError::parse(base, format!("invalid glob '{}': {}", pattern, e.msg))
    })?;

    let mut files = Vec::new();
    for entry in matches {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            IfacesError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping {}, not a regular file", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Symlink-free form of `path`, or `path` itself when it cannot be resolved
pub fn canonical_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn copy_file(src: &Path, dst: &Path) -> IfacesResult<()> {
    std::fs::copy(src, dst).map_err(|e| IfacesError::io(dst, e))?;
    Ok(())
}

/// Write `content`, creating missing parent directories
pub fn write_file(path: &Path, content: &str) -> IfacesResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| IfacesError::io(parent, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| IfacesError::io(path, e))
}

/// Join `path` onto `base` unless it is already absolute, then drop `.` and
/// `..` components lexically.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Directory part of a path, `/` for a bare root
pub fn dirname(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            resolve_path(Path::new("/etc/network"), Path::new("interfaces.d/eth0")),
            PathBuf::from("/etc/network/interfaces.d/eth0")
        );
        assert_eq!(
            resolve_path(Path::new("/etc/network"), Path::new("/srv/ifaces")),
            PathBuf::from("/srv/ifaces")
        );
        assert_eq!(
            resolve_path(Path::new("/etc/network/sub"), Path::new("../x/./y")),
            PathBuf::from("/etc/network/x/y")
        );
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname(Path::new("/etc/network/interfaces")), PathBuf::from("/etc/network"));
        assert_eq!(dirname(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_list_regular_files_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b"), "").unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::write(dir.path().join("c.conf"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let pattern = Regex::new("^[a-z]+$").unwrap();
        let names = list_regular_files(dir.path(), &pattern).unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_glob_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b.cfg"), "").unwrap();
        fs::write(dir.path().join("sub/a.cfg"), "").unwrap();
        fs::write(dir.path().join("sub/.hidden.cfg"), "").unwrap();
        fs::write(dir.path().join("sub/deeper/c.cfg"), "").unwrap();

        let files = glob_regular_files(dir.path(), "*/*.cfg").unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("sub/a.cfg"), dir.path().join("sub/b.cfg")]
        );

        let hidden = glob_regular_files(dir.path(), "sub/.*").unwrap();
        assert_eq!(hidden, vec![dir.path().join("sub/.hidden.cfg")]);
    }

    #[test]
    fn test_glob_regular_files_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("eth0.d")).unwrap();
        fs::write(dir.path().join("eth1.cfg"), "").unwrap();

        let files = glob_regular_files(dir.path(), "eth*").unwrap();
        assert_eq!(files, vec![dir.path().join("eth1.cfg")]);
    }

    #[test]
    fn test_canonical_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real/interfaces"), "").unwrap();

        let dotted = dir.path().join("real/../real/interfaces");
        assert_eq!(
            canonical_path(&dotted),
            fs::canonicalize(dir.path().join("real/interfaces")).unwrap()
        );

        let missing = dir.path().join("missing/interfaces");
        assert_eq!(canonical_path(&missing), missing);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines(Path::new("/nonexistent/ifaces/file")).unwrap_err();
        assert!(matches!(err, IfacesError::Io { .. }));
    }
}
