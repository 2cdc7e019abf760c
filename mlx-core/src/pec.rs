//! SMBus Packet Error Code
//!
//! CRC-8 with polynomial 0x07 (x^8 + x^2 + x + 1), seed 0, no reflection and
//! no output XOR. The MLX90614 checks it on every frame it receives and
//! appends it to every frame it sends.
//!
//! The code covers every byte on the wire in order, including the address
//! bytes with their R/W bit. For a word read that is:
//!
//! ```text
//! addr|W  command  addr|R  data_lo  data_hi  → PEC
//! ```

/// PEC polynomial
pub const POLYNOMIAL: u8 = 0x07;

/// Fold one byte into a running PEC
pub const fn pec_step(accumulator: u8, next_byte: u8) -> u8 {
    let mut data = accumulator ^ next_byte;
    let mut i = 0;
    while i < 8 {
        data = if data & 0x80 != 0 {
            (data << 1) ^ POLYNOMIAL
        } else {
            data << 1
        };
        i += 1;
    }
    data
}

/// PEC of a complete byte sequence
pub fn pec(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &b| pec_step(acc, b))
}

/// Running PEC accumulator
///
/// Lets a frame be checksummed in wire order without first collecting it
/// into a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pec(u8);

impl Pec {
    /// Start a new code (seed 0)
    pub const fn new() -> Self {
        Self(0)
    }

    /// Fold in one byte
    #[must_use]
    pub const fn update(self, byte: u8) -> Self {
        Self(pec_step(self.0, byte))
    }

    /// Fold in a run of bytes
    #[must_use]
    pub fn update_slice(self, bytes: &[u8]) -> Self {
        Self(bytes.iter().fold(self.0, |acc, &b| pec_step(acc, b)))
    }

    /// Current code
    pub const fn value(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_datasheet_read_example() {
        // Read of RAM 0x07 from slave 0x5A returning 0x3AD2
        let frame = [0xB4, 0x07, 0xB5, 0xD2, 0x3A];
        assert_eq!(pec(&frame), 0x30);
    }

    #[test]
    fn test_leading_zero_does_not_change_code() {
        let folded = pec_step(pec_step(0, 0x00), 0xB4);
        assert_eq!(folded, pec(&[0xB4]));
        assert_eq!(folded, 0x05);
    }

    #[test]
    fn test_single_bytes() {
        assert_eq!(pec_step(0, 0x00), 0x00);
        assert_eq!(pec_step(0, 0x01), 0x07);
        assert_eq!(pec_step(0, 0x80), 0x89);
        assert_eq!(pec_step(0, 0xFF), 0xF3);
    }

    #[test]
    fn test_accumulator_matches_slice() {
        let frame = [0xB4, 0x07, 0xB5, 0xD2, 0x3A];
        let code = Pec::new()
            .update(0xB4)
            .update(0x07)
            .update_slice(&frame[2..]);
        assert_eq!(code.value(), pec(&frame));
    }

    #[test]
    fn test_const_evaluation() {
        const CODE: u8 = pec_step(pec_step(0, 0xB4), 0x60);
        assert_eq!(CODE, pec(&[0xB4, 0x60]));
    }

    proptest! {
        #[test]
        fn prop_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            prop_assert_eq!(pec(&bytes), pec(&bytes));
            prop_assert_eq!(Pec::new().update_slice(&bytes).value(), pec(&bytes));
        }

        #[test]
        fn prop_appending_code_checks_to_zero(
            bytes in proptest::collection::vec(any::<u8>(), 0..32)
        ) {
            let code = pec(&bytes);
            let checked = Pec::new().update_slice(&bytes).update(code).value();
            prop_assert_eq!(checked, 0);
        }

        #[test]
        fn prop_single_bit_flip_detected(
            bytes in proptest::collection::vec(any::<u8>(), 1..16),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut corrupted = bytes.clone();
            let i = index.index(bytes.len());
            corrupted[i] ^= 1 << bit;
            prop_assert_ne!(pec(&bytes), pec(&corrupted));
        }
    }
}
