const UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];

/// Render a byte count with a binary unit, rounded to two decimals.
///
/// ```
/// use lcm::utils::readable_bytes;
///
/// assert_eq!(readable_bytes(0), "0 bytes");
/// assert_eq!(readable_bytes(1536), "1.5 KB");
/// assert_eq!(readable_bytes(2 * 1024 * 1024), "2 MB");
/// ```
pub fn readable_bytes(num: u64) -> String {
    let mut value = num as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        return format!("{} {}", num, UNITS[0]);
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
