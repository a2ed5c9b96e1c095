//! Lexical path cleaning.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// Drops `.` segments, resolves `..` against the preceding segment and
/// collapses duplicate separators. A `..` that would climb above the root is
/// discarded; in a relative path it is kept.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut prefix: Option<Component<'_>> = None;
    let mut rooted = false;
    let mut stack: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) => prefix = Some(component),
            Component::RootDir => {
                rooted = true;
                stack.clear();
            }
            Component::CurDir => {}
            Component::ParentDir => match stack.last() {
                Some(Component::Normal(_)) => {
                    stack.pop();
                }
                _ if rooted => {}
                _ => stack.push(component),
            },
            Component::Normal(_) => stack.push(component),
        }
    }

    let mut result = PathBuf::new();
    if let Some(p) = prefix {
        result.push(p.as_os_str());
    }
    if rooted {
        result.push(Component::RootDir.as_os_str());
    }
    for c in stack {
        result.push(c.as_os_str());
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}
