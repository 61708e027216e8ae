use super::CipherMap;

/// Substitute every mapped character of `text` with its code.
///
/// The text is uppercased first, so `"hi"` and `"HI"` encode identically. Characters
/// with no entry in the map are copied through unchanged.
pub fn encode(text: &str, map: &CipherMap) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars().flat_map(char::to_uppercase) {
        match map.get(c) {
            Some(code) => out.push_str(code),
            None => out.push(c),
        }
    }
    out
}
