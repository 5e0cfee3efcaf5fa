#![no_main]
use libfuzzer_sys::fuzz_target;
use shield_common::format_byte_count;

/// Fuzz the byte count formatter.
///
/// Tests:
/// - sub-KiB counts print as "<n>B"
/// - larger counts carry exactly one decimal digit and a K/M/G suffix
fuzz_target!(|n: u64| {
    let s = format_byte_count(n);
    if n < 1024 {
        assert_eq!(s, format!("{}B", n));
        return;
    }
    let (number, unit) = s.split_at(s.len() - 1);
    assert!(matches!(unit, "K" | "M" | "G"), "bad unit in {}", s);
    let (_, frac) = number.split_once('.').expect("missing decimal point");
    assert_eq!(frac.len(), 1, "expected one decimal digit in {}", s);
    assert!(number.parse::<f64>().is_ok());
});
