/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// Injective on `u32 x u32` without overflowing `u64`.
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing_szudzik(a: u32, b: u32) -> u64 {
    let (a, b) = (a as u64, b as u64);
    if a < b {
        b * b + a
    } else {
        a * a + a + b
    }
}

/// Pairing function for two `u32` values.
pub fn pairing2(a: u32, b: u32) -> u64 {
    pairing_szudzik(a, b)
}

/// Mixes `value` into the running hash `state`.
///
/// Unlike the pairing functions this is not injective, it only spreads bits,
/// and it never overflows.
pub fn mix(state: u64, value: u64) -> u64 {
    (state.rotate_left(5) ^ value).wrapping_mul(0x517c_c1b7_2722_0a95)
}

/// Mixes every value of a sequence into `state`, in order.
pub fn mix_all(state: u64, values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(state, mix)
}

pub trait MyHash {
    /// Bucket hash; equal values must hash equally.
    fn hash(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_szudzik() {
        // a\b  0  1  2  3  4
        // ------------------
        // 0    0  1  4  9 16
        // 1    2  3  5 10 17
        // 2    6  7  8 11 18
        // 3   12 13 14 15 19
        // 4   20 21 22 23 24
        assert_eq!(pairing_szudzik(0, 0), 0);
        assert_eq!(pairing_szudzik(0, 1), 1);
        assert_eq!(pairing_szudzik(1, 0), 2);
        assert_eq!(pairing_szudzik(1, 1), 3);
        assert_eq!(pairing_szudzik(0, 2), 4);
        assert_eq!(pairing_szudzik(1, 2), 5);
        assert_eq!(pairing_szudzik(2, 0), 6);
        assert_eq!(pairing_szudzik(2, 1), 7);
        assert_eq!(pairing_szudzik(2, 2), 8);
        assert_eq!(pairing_szudzik(0, 4), 16);
        assert_eq!(pairing_szudzik(4, 0), 20);
        assert_eq!(pairing_szudzik(4, 4), 24);
    }

    #[test]
    fn test_szudzik_no_overflow() {
        let max = u32::MAX;
        assert_eq!(pairing_szudzik(max, max), u64::MAX);
        assert!(pairing_szudzik(max - 1, max) < pairing_szudzik(max, 0));
    }

    #[test]
    fn test_mix_order_sensitive() {
        assert_ne!(mix_all(0, [1, 2]), mix_all(0, [2, 1]));
        assert_eq!(mix_all(7, [1, 2, 3]), mix(mix(mix(7, 1), 2), 3));
    }
}
