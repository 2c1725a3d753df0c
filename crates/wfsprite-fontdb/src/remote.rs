//! Web font stylesheets given in place of a family name
//!
//! `https://fonts.googleapis.com/css2?family=Roboto+Mono:wght@400` names the
//! family `Roboto Mono`. The stylesheet's first `url(...)` source is downloaded
//! and added to the font database; any failure leaves only the family name.

use wfsprite_core::error::{FontLoadError, Result};

/// Whether a family field is really a stylesheet URL
pub fn is_remote(family: &str) -> bool {
    let family = family.trim();
    family.starts_with("http://") || family.starts_with("https://")
}

/// Family named by the `family=` query value, up to `&` or `:`, `+` read as space
pub fn family_from_url(url: &str) -> Option<String> {
    let start = url.find("family=")? + "family=".len();
    let rest = &url[start..];
    let end = rest.find(['&', ':']).unwrap_or(rest.len());
    let family = rest[..end].replace('+', " ").replace("%20", " ");
    let family = family.trim();
    if family.is_empty() {
        None
    } else {
        Some(family.to_string())
    }
}

/// First `url(...)` source in a stylesheet, quotes stripped
pub fn first_font_url(css: &str) -> Option<String> {
    let start = css.find("url(")? + "url(".len();
    let rest = &css[start..];
    let end = rest.find(')')?;
    let url = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Download the stylesheet and its first font source
#[cfg(feature = "remote")]
pub fn fetch_font(stylesheet_url: &str) -> Result<Vec<u8>> {
    let css = get_bytes(stylesheet_url)?;
    let css = String::from_utf8_lossy(&css);
    let font_url = first_font_url(&css).ok_or_else(|| {
        FontLoadError::Remote(format!("no font source in stylesheet {stylesheet_url}"))
    })?;
    log::debug!("Fetching font source {font_url}");
    get_bytes(&font_url)
}

#[cfg(feature = "remote")]
fn get_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| FontLoadError::Remote(format!("failed to fetch {url}: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FontLoadError::Remote(format!("HTTP {status} for {url}")).into());
    }
    let bytes = response
        .bytes()
        .map_err(|e| FontLoadError::Remote(format!("failed to read {url}: {e}")))?;
    Ok(bytes.to_vec())
}

/// Without the `remote` feature nothing is downloaded
#[cfg(not(feature = "remote"))]
pub fn fetch_font(stylesheet_url: &str) -> Result<Vec<u8>> {
    Err(FontLoadError::Remote(format!("built without network support: {stylesheet_url}")).into())
}
