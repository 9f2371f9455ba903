//! Formatting helpers for log messages
//!
//! Each helper styles a value for terminal output with ANSI sequences via
//! `colored`, which leaves the text plain when coloring is disabled.
//!
//! ```
//! use logger_plugin::helper;
//!
//! colored::control::set_override(true);
//! assert_eq!(helper::number(42), "\u{1b}[36m42\u{1b}[0m");
//! assert_eq!(helper::string("x"), "\u{1b}[32m`x`\u{1b}[0m");
//! ```

use colored::Colorize;
use std::fmt::Display;
use std::path::{Component, Path, PathBuf};

/// Underlined path of `dir` relative to `from` (the current directory by default)
pub fn path(dir: impl AsRef<Path>, from: Option<&Path>) -> String {
    let cwd = std::env::current_dir().unwrap_or_default();
    let from = from.unwrap_or(&cwd);
    let relative = relative_path(dir.as_ref(), from, &cwd);
    relative.display().to_string().underline().to_string()
}

/// Underlined base name of `file`
pub fn file(file: impl AsRef<Path>) -> String {
    file.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
        .underline()
        .to_string()
}

/// Cyan rendering of `n`
pub fn number(n: impl Display) -> String {
    n.to_string().cyan().to_string()
}

/// Backtick-quoted, green rendering of `s`
pub fn string(s: impl Display) -> String {
    format!("`{}`", s).green().to_string()
}

/// The helpers as a value, for callers that hold a facade rather than the module
#[derive(Debug, Default, Clone, Copy)]
pub struct Helper;

impl Helper {
    pub fn path(&self, dir: impl AsRef<Path>, from: Option<&Path>) -> String {
        path(dir, from)
    }

    pub fn file(&self, file: impl AsRef<Path>) -> String {
        self::file(file)
    }

    pub fn number(&self, n: impl Display) -> String {
        number(n)
    }

    pub fn string(&self, s: impl Display) -> String {
        string(s)
    }
}

/// Lexically resolve `path` against `cwd`, dropping `.` and folding `..`
fn resolve(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Path leading from `from` to `to`; empty when both resolve to the same place
pub fn relative_path(to: &Path, from: &Path, cwd: &Path) -> PathBuf {
    let to = resolve(to, cwd);
    let from = resolve(from, cwd);

    let to_parts: Vec<Component<'_>> = to.components().collect();
    let from_parts: Vec<Component<'_>> = from.components().collect();
    let common = to_parts
        .iter()
        .zip(&from_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let cwd = Path::new("/work");
        let rel = |to: &str, from: &str| relative_path(Path::new(to), Path::new(from), cwd);

        assert_eq!(rel("/work/src/lib.rs", "/work"), PathBuf::from("src/lib.rs"));
        assert_eq!(rel("/work", "/work/src/core"), PathBuf::from("../.."));
        assert_eq!(rel("/data/logs", "/work/src"), PathBuf::from("../../data/logs"));
        assert_eq!(rel("/work", "/work"), PathBuf::new());
        assert_eq!(rel("logs/./app/../x", "."), PathBuf::from("logs/x"));
        assert_eq!(rel("/a", "/.."), PathBuf::from("a"));
    }

    #[test]
    fn test_styles() {
        colored::control::set_override(true);

        assert_eq!(number(42), "\u{1b}[36m42\u{1b}[0m");
        assert_eq!(number(1.5), "\u{1b}[36m1.5\u{1b}[0m");
        assert_eq!(string("x"), "\u{1b}[32m`x`\u{1b}[0m");
        assert_eq!(file("/var/log/app.log"), "\u{1b}[4mapp.log\u{1b}[0m");
        assert_eq!(
            path("/var/log/app.log", Some(Path::new("/var"))),
            "\u{1b}[4mlog/app.log\u{1b}[0m"
        );
    }

    #[test]
    fn test_helper_value_delegates() {
        colored::control::set_override(true);
        let helper = Helper;
        assert_eq!(helper.number(7), number(7));
        assert_eq!(helper.string("name"), string("name"));
        assert_eq!(helper.file("dir/file.txt"), file("file.txt"));
    }
}
