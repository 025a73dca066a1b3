//! Magnet link assembly for stream listings.
//!
//! No validation happens here: whatever hash and names the listing provides
//! are passed through, only percent-encoded.

const DISPLAY_NAME_SEPARATOR: char = '👤';

/// Builds `magnet:?xt=urn:btih:<hash>[&dn=<name>]{&tr=<tracker>}`.
///
/// `encoded_display_name` must already be percent-encoded (see
/// [`encode_display_name`]); trackers are encoded here.
pub fn build_magnet_link<S: AsRef<str>>(
    info_hash: &str,
    encoded_display_name: &str,
    trackers: &[S],
) -> String {
    let mut magnet = format!("magnet:?xt=urn:btih:{info_hash}");
    if !encoded_display_name.is_empty() {
        magnet.push_str("&dn=");
        magnet.push_str(encoded_display_name);
    }
    for tracker in trackers {
        magnet.push_str("&tr=");
        magnet.push_str(&urlencoding::encode(tracker.as_ref()));
    }
    magnet
}

/// Stream titles put uploader details after a 👤 marker; keep what precedes it.
pub fn extract_display_name(title: &str) -> &str {
    title
        .split(DISPLAY_NAME_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
}

/// Percent-encodes everything except `A-Za-z0-9-._~`.
pub fn encode_display_name(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// One tracker per line; blank lines and `#` comments are skipped.
pub fn parse_tracker_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
