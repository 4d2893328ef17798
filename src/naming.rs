//! Deterministic, filesystem-safe names derived from URLs.
//!
//! Every character outside `[A-Za-z0-9]` becomes a hyphen, so distinct URLs
//! can collapse onto the same name (`/a-b` and `/a_b`). That is accepted;
//! the page and resource names only need to be stable across runs.

use url::Url;

const DOCUMENT_EXTENSION: &str = "html";
const RESOURCES_DIR_SUFFIX: &str = "_files";

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Host, port, path and query of `url`, without scheme or fragment.
fn without_scheme(url: &Url, path: &str) -> String {
    let mut out = String::new();
    if let Some(host) = url.host_str() {
        out.push_str(host);
    }
    if let Some(port) = url.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(path);
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    out
}

/// `https://example.com/page` → `example-com-page`.
pub fn derive_base_name(url: &Url) -> String {
    let path = match url.path() {
        "/" => "",
        path => path,
    };
    sanitize(&without_scheme(url, path))
}

pub fn derive_document_file_name(url: &Url) -> String {
    format!("{}.{}", derive_base_name(url), DOCUMENT_EXTENSION)
}

pub fn derive_resources_dir_name(url: &Url) -> String {
    format!("{}{}", derive_base_name(url), RESOURCES_DIR_SUFFIX)
}

/// Splits the final path segment into stem and extension.
///
/// Returns `None` for the extension when the segment has no dot, ends with a
/// dot, or the extension contains anything other than ASCII alphanumerics.
fn split_extension(path: &str) -> (&str, Option<&str>) {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let segment = &path[segment_start..];
    match segment.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &segment[dot + 1..];
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                (&path[..segment_start + dot], Some(ext))
            } else {
                (path, None)
            }
        }
        _ => (path, None),
    }
}

/// Local file name for a resource referenced from the page at `base_url`.
///
/// The extension of the final path segment is moved past the derived base
/// name (`/assets/app.css` → `example-com-assets-app.css`). Paths without an
/// extension, including `/` and the empty path, get `.html`.
pub fn derive_resource_file_name(resource_url: &str, base_url: &Url) -> Result<String, url::ParseError> {
    let resolved = base_url.join(resource_url)?;
    Ok(resource_file_name(&resolved))
}

/// Same as [`derive_resource_file_name`] for an already resolved URL.
pub fn resource_file_name(resolved: &Url) -> String {
    let (stem, ext) = split_extension(resolved.path());
    let stem = if stem == "/" { "" } else { stem };
    let base = sanitize(&without_scheme(resolved, stem));
    format!("{}.{}", base, ext.unwrap_or(DOCUMENT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_base_name_replaces_non_alphanumerics() {
        assert_eq!(derive_base_name(&url("https://example.com/page")), "example-com-page");
        assert_eq!(
            derive_base_name(&url("http://ru.hexlet.io/courses?lang=en")),
            "ru-hexlet-io-courses-lang-en"
        );
        assert_eq!(derive_base_name(&url("http://localhost:8080/a_b")), "localhost-8080-a-b");
    }

    #[test]
    fn test_base_name_ignores_root_slash_and_fragment() {
        assert_eq!(derive_base_name(&url("https://example.com")), "example-com");
        assert_eq!(derive_base_name(&url("https://example.com/")), "example-com");
        assert_eq!(derive_base_name(&url("https://example.com/page#top")), "example-com-page");
    }

    #[test]
    fn test_document_and_dir_names() {
        let page = url("https://example.com/page");
        assert_eq!(derive_document_file_name(&page), "example-com-page.html");
        assert_eq!(derive_resources_dir_name(&page), "example-com-page_files");
        assert_eq!(derive_document_file_name(&page), derive_document_file_name(&page));
    }

    #[test]
    fn test_resource_names_keep_extension() {
        let page = url("https://example.com/page");
        let cases = [
            ("/image.png", "example-com-image.png"),
            ("/assets/app.css", "example-com-assets-app.css"),
            ("script.js", "example-com-script.js"),
            ("/app.js?v=2", "example-com-app-v-2.js"),
            ("/archive.tar.gz", "example-com-archive-tar.gz"),
            ("https://example.com/courses", "example-com-courses.html"),
            ("/", "example-com.html"),
            ("/dir/", "example-com-dir-.html"),
            ("/weird.ext!", "example-com-weird-ext-.html"),
            ("/.hidden", "example-com--hidden.html"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                derive_resource_file_name(input, &page).unwrap(),
                expected,
                "Failed for input: {}",
                input
            );
        }
    }

    #[test]
    fn test_resource_names_resolve_relative_paths() {
        let page = url("https://example.com/blog/post");
        assert_eq!(
            derive_resource_file_name("../img/a.jpg", &page).unwrap(),
            "example-com-img-a.jpg"
        );
        assert_eq!(
            derive_resource_file_name("b.jpg", &page).unwrap(),
            "example-com-blog-b.jpg"
        );
    }

    #[test]
    fn test_malformed_resource_url_is_an_error() {
        let page = url("https://example.com/page");
        assert!(derive_resource_file_name("http://[::1", &page).is_err());
    }
}
