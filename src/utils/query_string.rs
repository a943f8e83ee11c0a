use std::collections::HashMap;

/// Parse a URL query string (with or without the leading `?`) into a map.
///
/// Later duplicates win. `+` is treated as a space before percent-decoding.
pub fn parse_query_string(raw: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let raw = raw.trim().trim_start_matches('?');
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let key_enc = parts.next().unwrap_or("").replace('+', " ");
        let val_enc = parts.next().unwrap_or("").replace('+', " ");
        let key = urlencoding::decode(&key_enc)
            .map(|s| s.into_owned())
            .unwrap_or(key_enc);
        let val = urlencoding::decode(&val_enc)
            .map(|s| s.into_owned())
            .unwrap_or(val_enc);
        map.insert(key, val);
    }
    map
}
