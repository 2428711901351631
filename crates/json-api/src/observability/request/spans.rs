//! HTTP span helpers.

/// `METHOD /path` with numeric ids and promotion codes collapsed, so that
/// one route yields one span name.
pub(super) fn route_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        normalised.push('/');

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else if matches!(previous, "promotion-codes" | "campaigns") && !segment.is_empty() {
            normalised.push_str("{name}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}
