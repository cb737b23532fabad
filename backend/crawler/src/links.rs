use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extensions of resources that are not HTML pages.
const SKIPPED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "tif", "tiff", "pdf", "doc", "docx",
    "xls", "xlsx", "ppt", "pptx", "zip", "rar", "gz", "tgz", "7z", "tar", "mp3", "mp4", "wav",
    "ogg", "webm", "avi", "mov", "css", "js", "json", "xml", "txt", "woff", "woff2", "ttf", "eot",
];

/// Absolute URLs of every anchor, without fragments, in document order.
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHORS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|href| base.join(href).ok())
        .map(|mut url| {
            url.set_fragment(None);
            url
        })
        .collect()
}

/// Whether a link is an HTML page on the same site as `start`.
pub fn is_crawlable(link: &Url, start: &Url) -> bool {
    if !matches!(link.scheme(), "http" | "https") {
        return false;
    }
    if link.host_str() != start.host_str() || link.port_or_known_default() != start.port_or_known_default() {
        return false;
    }
    let last_segment = link
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match last_segment.rsplit_once('.') {
        Some((_, extension)) => !SKIPPED_EXTENSIONS.contains(&extension),
        None => true,
    }
}
