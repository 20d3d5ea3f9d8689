//! Executable lookup on `PATH`-style directory lists.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over directory entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in candidate_names(tool) {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![format!("{tool}.exe"), format!("{tool}.bat"), tool.to_string()]
}

#[cfg(not(windows))]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// True if `program` is a bare name that should be looked up on a path list.
pub fn is_bare_name(program: &str) -> bool {
    let path = Path::new(program);
    path.components().count() == 1 && path.file_name() == Some(OsStr::new(program))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Build a PATH value with `dirs` prepended to the current system PATH.
pub fn prepend_to_system_path(dirs: &[PathBuf]) -> Option<String> {
    std::env::join_paths(prepend_paths(dirs, parse_system_path()))
        .ok()
        .and_then(|joined| joined.into_string().ok())
}

/// `dirs` followed by the entries of `existing` not already listed.
fn prepend_paths(dirs: &[PathBuf], existing: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = Vec::with_capacity(dirs.len() + existing.len());
    for entry in dirs.iter().cloned().chain(existing) {
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use tempfile::TempDir;

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn virtualenv_scripts_shadow_later_dirs() {
        let temp = TempDir::new().unwrap();
        let venv_bin = temp.path().join("virtualenv/bin");
        let system_bin = temp.path().join("usr/bin");
        script(&system_bin, "sphinx-build", 0o755);
        let ours = script(&venv_bin, "sphinx-build", 0o755);

        let found = resolve_tool_path("sphinx-build", &[venv_bin, system_bin]);
        assert_eq!(found, Some(ours));
    }

    #[cfg(unix)]
    #[test]
    fn unusable_scripts_fall_through() {
        let temp = TempDir::new().unwrap();
        let venv_bin = temp.path().join("virtualenv/bin");
        let system_bin = temp.path().join("usr/bin");
        script(&venv_bin, "pip", 0o644);
        std::fs::create_dir_all(venv_bin.join("doxygen")).unwrap();
        let pip = script(&system_bin, "pip", 0o755);

        let dirs = [venv_bin, system_bin];
        assert_eq!(resolve_tool_path("pip", &dirs), Some(pip));
        assert_eq!(resolve_tool_path("doxygen", &dirs), None);
        assert_eq!(resolve_tool_path("lessc", &[]), None);
    }

    #[cfg(not(windows))]
    #[test]
    fn candidates_are_the_bare_name() {
        assert_eq!(candidate_names("lessc"), vec!["lessc"]);
    }

    #[cfg(windows)]
    #[test]
    fn candidates_try_windows_extensions_first() {
        assert_eq!(
            candidate_names("lessc"),
            vec!["lessc.exe", "lessc.bat", "lessc"]
        );
    }

    #[test]
    fn bare_names() {
        assert!(is_bare_name("sphinx-build"));
        assert!(!is_bare_name("./sphinx-build"));
        assert!(!is_bare_name("/usr/bin/doxygen"));
        assert!(!is_bare_name("venv/bin/pip"));
        assert!(!is_bare_name(""));
    }

    #[test]
    fn prepended_dirs_are_not_repeated() {
        let venv = PathBuf::from("/work/virtualenv/bin");
        let existing = vec![
            PathBuf::from("/usr/bin"),
            venv.clone(),
            PathBuf::from("/bin"),
            PathBuf::from("/usr/bin"),
        ];

        let entries = prepend_paths(std::slice::from_ref(&venv), existing);
        assert_eq!(
            entries,
            vec![venv, PathBuf::from("/usr/bin"), PathBuf::from("/bin")]
        );
    }

    #[test]
    fn prepend_puts_dirs_first() {
        let dir = PathBuf::from("/opt/docsmith-test/bin");
        let path = prepend_to_system_path(std::slice::from_ref(&dir)).unwrap();
        let entries: Vec<PathBuf> = std::env::split_paths(&path).collect();
        assert_eq!(entries.first(), Some(&dir));
    }
}
