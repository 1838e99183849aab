//! Human-readable byte sizes using binary (1024-based) units.

const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Render `bytes` as e.g. `512 B`, `1 MiB` or `1.500 GiB`.
///
/// Whole values drop the fraction; anything else keeps three decimals.
pub fn byte_unit(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut scaled = bytes as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    if scaled.fract() == 0.0 {
        format!("{:.0} {}", scaled, UNITS[unit])
    } else {
        format!("{:.3} {}", scaled, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_are_bytes() {
        assert_eq!(byte_unit(0), "0 B");
        assert_eq!(byte_unit(1023), "1023 B");
    }

    #[test]
    fn test_whole_units_have_no_fraction() {
        assert_eq!(byte_unit(1024), "1 KiB");
        assert_eq!(byte_unit(1_048_576), "1 MiB");
        assert_eq!(byte_unit(3 << 40), "3 TiB");
    }

    #[test]
    fn test_fractional_units_keep_three_decimals() {
        assert_eq!(byte_unit(1536), "1.500 KiB");
        assert_eq!(byte_unit(3 << 29), "1.500 GiB");
    }

    #[test]
    fn test_largest_unit_is_exbibyte() {
        assert_eq!(byte_unit(1 << 60), "1 EiB");
        assert_eq!(byte_unit(u64::MAX), "16 EiB");
    }
}
