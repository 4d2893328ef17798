use url::Url;

/// Host and explicit port; `None` for URLs without a host (`data:`, `mailto:`).
///
/// `Url` drops a port equal to its scheme's default, so `http://example.com:80`
/// and `https://example.com` both compare as `example.com` with no port.
fn origin_host(url: &Url) -> Option<(&str, Option<u16>)> {
    url.host_str().map(|host| (host, url.port()))
}

/// Whether `resource_url`, resolved against `page_url`, lives on the page's host.
///
/// Anything that fails to resolve is treated as external and left alone.
pub fn is_local(resource_url: &str, page_url: &Url) -> bool {
    match page_url.join(resource_url) {
        Ok(resolved) => is_local_url(&resolved, page_url),
        Err(_) => false,
    }
}

pub fn is_local_url(resolved: &Url, page_url: &Url) -> bool {
    match (origin_host(resolved), origin_host(page_url)) {
        (Some(resource), Some(page)) => resource == page,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_references_are_local() {
        let page = Url::parse("https://example.com/blog/post").unwrap();
        assert!(is_local("/image.png", &page));
        assert!(is_local("style.css", &page));
        assert!(is_local("../script.js", &page));
        assert!(is_local("https://example.com/other.css", &page));
    }

    #[test]
    fn test_other_hosts_are_external() {
        let page = Url::parse("https://example.com/page").unwrap();
        assert!(!is_local("https://cdn.example.com/app.js", &page));
        assert!(!is_local("//cdn.example.com/app.js", &page));
        assert!(!is_local("https://example.org/image.png", &page));
    }

    #[test]
    fn test_port_is_part_of_the_host() {
        let page = Url::parse("http://localhost:8080/page").unwrap();
        assert!(is_local("/a.png", &page));
        assert!(!is_local("http://localhost:9090/a.png", &page));

        let page = Url::parse("http://example.com/").unwrap();
        assert!(is_local("http://example.com:80/a.png", &page));
        assert!(!is_local("http://example.com:8080/a.png", &page));
    }

    #[test]
    fn test_scheme_is_not_part_of_the_host() {
        let page = Url::parse("http://example.com/page").unwrap();
        assert!(is_local("https://example.com/a.png", &page));
        assert!(is_local("https://example.com:443/a.png", &page));

        let page = Url::parse("https://example.com/page").unwrap();
        assert!(is_local("http://example.com/a.png", &page));
        assert!(is_local("//example.com/a.png", &page));
    }

    #[test]
    fn test_hostless_and_malformed_references_are_external() {
        let page = Url::parse("https://example.com/page").unwrap();
        assert!(!is_local("data:image/png;base64,AAAA", &page));
        assert!(!is_local("mailto:someone@example.com", &page));
        assert!(!is_local("http://[::1", &page));
    }
}
