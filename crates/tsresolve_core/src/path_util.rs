//! Workspace-relative path helpers.
//!
//! Every path handled by the engine is a `/`-separated string relative to the
//! workspace root (or to a config directory). These helpers keep such strings
//! in the canonical form produced by [`normalize`]: no trailing slash, no
//! leading `./`, no redundant `.`/`..` segments, and `"."` for the empty path.

use path_clean::clean;

/// Lexically normalizes a relative path. The empty string becomes `"."`.
pub fn normalize(p: &str) -> String {
    if p.is_empty() {
        return ".".to_string();
    }
    let cleaned = clean(p).to_string_lossy().replace('\\', "/");
    if cleaned.is_empty() { ".".to_string() } else { cleaned }
}

/// Joins `rel` onto `base` and normalizes the result. Absolute `rel` values
/// replace `base` entirely.
pub fn join(base: &str, rel: &str) -> String {
    if rel.starts_with('/') || base.is_empty() || base == "." {
        return normalize(rel);
    }
    if rel.is_empty() || rel == "." {
        return normalize(base);
    }
    normalize(&format!("{base}/{rel}"))
}

/// Directory portion of `p`, `"."` when `p` has no parent.
pub fn dirname(p: &str) -> String {
    let p = normalize(p);
    match p.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => p[..idx].to_string(),
        None => ".".to_string(),
    }
}

/// Final segment of `p`.
pub fn basename(p: &str) -> String {
    let p = normalize(p);
    match p.rfind('/') {
        Some(idx) => p[idx + 1..].to_string(),
        None => p,
    }
}

/// Whether a module specifier or extends value is written relative to the
/// referencing file (`./x`, `../x`, `.` or `..`).
pub fn is_relative_path(p: &str) -> bool {
    p == "." || p == ".." || p.starts_with("./") || p.starts_with("../")
}

/// If the segments of `prefix` are a proper leading prefix of the segments of
/// `p`, returns the remaining part of `p`. Matching is segment-wise, so
/// `src-other/x.ts` does not start with `src`.
pub fn strip_segment_prefix<'a>(p: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix == "." {
        return None;
    }
    p.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}
