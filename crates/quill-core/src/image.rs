//! Featured-image URL policy.
//!
//! A new image URL is accepted when its path carries a known image
//! extension, or when it is served from a trusted host. An absent URL is
//! always acceptable (the column is nullable). Rejection is non-fatal to
//! the surrounding update: the stored value is simply left alone.

const VALID_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
const TRUSTED_HOSTS: [&str; 2] = ["images.unsplash.com", "plus.unsplash.com"];

/// Allow-list policy for featured-image URLs.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    trusted_hosts: Vec<String>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            trusted_hosts: TRUSTED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ImagePolicy {
    pub fn new(trusted_hosts: Vec<String>) -> Self {
        Self { trusted_hosts }
    }

    /// Whether `url` may be stored as a featured image.
    pub fn is_valid(&self, url: Option<&str>) -> bool {
        let Some(url) = url else {
            return true;
        };
        if url.is_empty() {
            return true;
        }

        let (host, path) = split_url(url);

        let path_lower = path.to_ascii_lowercase();
        if VALID_EXTENSIONS
            .iter()
            .any(|ext| path_lower.ends_with(&format!(".{ext}")))
        {
            return true;
        }

        self.trusted_hosts.iter().any(|h| h == host)
    }
}

/// Split a URL into (host, path). Scheme and query string are discarded;
/// a scheme-less input is treated as having no host.
fn split_url(url: &str) -> (&str, &str) {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => return ("", url.split('?').next().unwrap_or(url)),
    };

    let rest = rest.split('?').next().unwrap_or(rest);
    match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_url_is_valid() {
        let policy = ImagePolicy::default();
        assert!(policy.is_valid(None));
        assert!(policy.is_valid(Some("")));
    }

    #[test]
    fn image_extension_is_valid_on_any_host() {
        let policy = ImagePolicy::default();
        assert!(policy.is_valid(Some("https://example.com/pic.jpg")));
        assert!(policy.is_valid(Some("https://example.com/a/b/photo.PNG")));
        assert!(policy.is_valid(Some("https://example.com/anim.gif")));
    }

    #[test]
    fn trusted_host_is_valid_without_extension() {
        let policy = ImagePolicy::default();
        assert!(policy.is_valid(Some("https://images.unsplash.com/photo-12345")));
        assert!(policy.is_valid(Some("https://plus.unsplash.com/premium?w=800")));
    }

    #[test]
    fn untrusted_host_without_extension_is_rejected() {
        let policy = ImagePolicy::default();
        assert!(!policy.is_valid(Some("https://example.com/not-an-image")));
        assert!(!policy.is_valid(Some("https://picsum.photos/200/300")));
    }

    #[test]
    fn query_string_does_not_hide_extension() {
        let policy = ImagePolicy::default();
        assert!(policy.is_valid(Some("https://example.com/pic.jpeg?w=200&h=100")));
    }
}
