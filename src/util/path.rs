/// Percent-encodes every segment of `path`, keeping the separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Prepends the adapter prefix. The result has no leading or trailing slash
/// so it can be resolved against the WebDAV root.
pub fn apply_path_prefix(prefix: Option<&str>, path: &str) -> String {
    let path = path.trim_matches('/');

    match prefix.map(|p| p.trim_matches('/')) {
        Some(p) if !p.is_empty() => {
            if path.is_empty() {
                p.to_string()
            } else {
                format!("{}/{}", p, path)
            }
        }
        _ => path.to_string(),
    }
}

/// Inverse of `apply_path_prefix` for paths coming back from the server.
pub fn remove_path_prefix(prefix: Option<&str>, location: &str) -> String {
    let location = location.trim_matches('/');

    match prefix.map(|p| p.trim_matches('/')) {
        Some(p) if !p.is_empty() => {
            if location == p {
                String::new()
            } else {
                location
                    .strip_prefix(p)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .unwrap_or(location)
                    .to_string()
            }
        }
        _ => location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_segments() {
        assert_eq!(encode_path("docs/q1 report.pdf"), "docs/q1%20report.pdf");
        assert_eq!(encode_path("/a#b/c?d"), "/a%23b/c%3Fd");
        assert_eq!(encode_path(""), "");
    }

    #[test]
    fn applies_prefix() {
        assert_eq!(apply_path_prefix(None, "/docs/a.txt"), "docs/a.txt");
        assert_eq!(apply_path_prefix(Some("team/"), "docs/a.txt"), "team/docs/a.txt");
        assert_eq!(apply_path_prefix(Some("/team"), "/"), "team");
        assert_eq!(apply_path_prefix(Some("team"), "/docs/"), "team/docs");
        assert_eq!(apply_path_prefix(Some(""), "a.txt"), "a.txt");
    }

    #[test]
    fn removes_prefix() {
        assert_eq!(remove_path_prefix(Some("team"), "/team/docs/a.txt/"), "docs/a.txt");
        assert_eq!(remove_path_prefix(Some("team"), "team"), "");
        assert_eq!(remove_path_prefix(Some("team"), "teamwork/a.txt"), "teamwork/a.txt");
        assert_eq!(remove_path_prefix(None, "/a/b"), "a/b");
    }
}
