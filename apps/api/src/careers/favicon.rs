use reqwest::Url;

pub const DEFAULT_FAVICON: &str = "/favicon.ico";

/// Favicon for a job link, served by Google's favicon service keyed on the
/// link's host. Links that don't parse, or have no host, get the local icon.
pub fn favicon_url(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| format!("https://www.google.com/s2/favicons?domain={host}&sz=64"))
        .unwrap_or_else(|| DEFAULT_FAVICON.to_string())
}
