//! Path helpers. Paths are `/`-rooted strings; `/` is the root.

/// Normalize a user-supplied path: trimmed, leading `/`, no trailing `/`,
/// empty segments collapsed.
pub fn sanitize(raw: &str) -> String {
    let segments: Vec<&str> = segments(raw).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Non-empty segments of a path.
pub fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.trim().split('/').filter(|s| !s.is_empty())
}

/// Path of `name` inside the directory at `parent`.
pub fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Directory part of a sanitized path. The root's parent is the root.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Final segment of a sanitized path. Empty for the root.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
