//! Human-readable byte counts for logs and status output.

const UNITS: [char; 3] = ['K', 'M', 'G'];

/// Render `n` bytes with binary (1024) scaling: `"500B"`, `"9.8K"`, `"100.1M"`.
///
/// Counts below 1024 print as an integer with a `B` suffix. Larger counts
/// print with one decimal digit in K, M or G; G is the ceiling, so very large
/// counts print as a large number of gigabytes.
pub fn format_byte_count(n: u64) -> String {
    if n < 1024 {
        return format!("{}B", n);
    }
    let mut value = n as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_outputs() {
        let cases: &[(u64, &str)] = &[
            (500, "500B"),
            (1024, "1.0K"),
            (10000, "9.8K"),
            (1024 * 1024 + 1, "1.0M"),
            (100 * 1024 * 1024 + 99999, "100.1M"),
        ];
        for &(n, expected) in cases {
            assert_eq!(format_byte_count(n), expected, "input {}", n);
        }
    }

    #[test]
    fn test_unit_thresholds() {
        assert_eq!(format_byte_count(0), "0B");
        assert_eq!(format_byte_count(1023), "1023B");
        assert_eq!(format_byte_count(1024 * 1024 - 1), "1024.0K");
        assert_eq!(format_byte_count(1024 * 1024), "1.0M");
        assert_eq!(format_byte_count(1024 * 1024 * 1024), "1.0G");
    }

    #[test]
    fn test_gigabytes_are_the_ceiling() {
        assert_eq!(format_byte_count(1024u64.pow(4)), "1024.0G");
        assert!(format_byte_count(u64::MAX).ends_with('G'));
    }
}
