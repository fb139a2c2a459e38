//! Static file resolution for the browser editor.

use std::fs;
use std::path::Path;

use kiln_common::safe_join;

/// Resolves a request path to file bytes and a `Content-Type` value.
///
/// The query string and fragment are stripped, percent escapes are
/// decoded, and the remainder is joined under `site_root` with the same
/// confinement rule the compile workspace uses, so `..` segments and
/// absolute paths can never read outside the site. `/` serves
/// `index.html`. Returns `None` for anything that does not resolve to a
/// readable file.
pub fn load_asset(site_root: &Path, url_path: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = url_path
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or(url_path);
    let decoded = percent_decode(path);
    let trimmed = decoded.trim_start_matches('/');
    let relative = if trimmed.is_empty() { "index.html" } else { trimmed };
    let full = safe_join(site_root, relative)?;
    let bytes = fs::read(&full).ok()?;
    Some((bytes, content_type_for(&full)))
}

/// Maps a file extension to its `Content-Type`.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript",
        "css" => "text/css",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Decodes `%XX` escapes, leaving malformed escapes untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
