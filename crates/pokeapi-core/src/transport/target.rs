//! Request target resolution and header merging.

/// True for fully-qualified `http://` or `https://` URLs.
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// `path` verbatim when absolute, otherwise `base_url + path`.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        path.to_string()
    } else {
        format!("{base_url}{path}")
    }
}

/// Merge header lists; names in `overrides` replace matching defaults
/// (case-insensitive) and keep their own spelling.
pub fn merge_headers(
    defaults: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();
    for (name, value) in overrides {
        // last one wins within the overrides too
        merged.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        merged.push((name.clone(), value.clone()));
    }
    merged
}
