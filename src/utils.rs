const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn gib_to_bytes(gib: i32) -> f64 {
    f64::from(gib) * GIB
}

pub fn bytes_to_gib(bytes: f64) -> f64 {
    bytes / GIB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gib_to_bytes() {
        assert_eq!(gib_to_bytes(0), 0.0);
        assert_eq!(gib_to_bytes(1), 1_073_741_824.0);
        assert_eq!(gib_to_bytes(100), 107_374_182_400.0);
    }

    #[test]
    fn test_bytes_to_gib_round_trip() {
        assert_eq!(bytes_to_gib(gib_to_bytes(25)), 25.0);
        assert!((bytes_to_gib(1_500_000_000.0) - 1.396983).abs() < 1e-5);
    }
}
