//! Scanlink Web - Embedded scanner page
//!
//! This crate embeds the phone-side scanner page into the binary and renders
//! it with the session token injected.

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets/"]
pub struct Assets;

/// Placeholder replaced with the session token at render time
pub const TOKEN_PLACEHOLDER: &str = "__SCANLINK_TOKEN__";

/// Render the scanner page for the given session token
///
/// Tokens are URL-safe base64, so plain substitution cannot break out of the
/// surrounding script string. Returns `None` if the asset is missing from the
/// build.
pub fn scanner_page(token: &str) -> Option<String> {
    let asset = Assets::get("scanner.html")?;
    let html = String::from_utf8_lossy(&asset.data);
    Some(html.replace(TOKEN_PLACEHOLDER, token))
}
