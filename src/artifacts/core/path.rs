//! Archive paths are absolute, `/`-separated strings (`/`, `/a`, `/a/b.txt`).
//!
//! Input paths may use `\` as a separator, omit the leading slash or carry
//! empty segments; [`normalize`] folds all of those into the canonical form.
//! A trailing separator is how the commit/revert backend learns that a path
//! names a directory, see [`split_dir_marker`].

pub const ROOT: &str = "/";

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|segment| !segment.is_empty())
}

pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Parent of a normalized path; the root has none.
pub fn parent(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }

    match path.rfind('/') {
        Some(0) => Some(ROOT),
        Some(index) => Some(&path[..index]),
        None => Some(ROOT),
    }
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// True when `path` equals `ancestor` or lies below it at a segment boundary.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT || path == ancestor {
        return true;
    }

    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Splits a committable path into its normalized form and whether it was
/// marked as a directory with a trailing separator.
pub fn split_dir_marker(path: &str) -> (String, bool) {
    let is_dir = path.len() > 1 && (path.ends_with('/') || path.ends_with('\\'));
    (normalize(path), is_dir)
}

/// Rewrites `path` from below `from` to below `to`.
pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        return Some(to.to_string());
    }

    let rest = path.strip_prefix(from)?.strip_prefix('/')?;
    Some(join(to, rest))
}
