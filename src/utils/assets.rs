//! Maps possibly-relative stored asset paths to absolute URLs.

/// Paths the backend stores verbatim that are served by the app itself, not
/// the asset host.
const LOCAL_ASSETS: &[&str] = &["/logo.png"];

/// Absolute URLs and known local assets pass through untouched; anything
/// else is joined onto `base_url` with exactly one slash at the seam.
pub fn resolve_asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if LOCAL_ASSETS.contains(&path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
