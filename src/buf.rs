use generic_array::{ArrayLength, GenericArray};

/// Little-endian reads at fixed offsets of an encoded record. The offsets
/// come from the record layouts and always lie inside
/// [`Message::EncodedLen`](crate::Message::EncodedLen).
pub(crate) trait Buf {
    fn u8_at(&self, at: usize) -> u8;

    fn i32_at(&self, at: usize) -> i32;

    /// Extract a packed field from the 16-bit little-endian window starting
    /// at byte `at`. The field is `bit_len` bits wide and starts
    /// `bit_offset` bits into the window, so it may straddle a byte
    /// boundary.
    fn bits_at(&self, at: usize, bit_offset: u32, bit_len: u32) -> u16;
}

impl<N: ArrayLength> Buf for GenericArray<u8, N> {
    #[inline]
    fn u8_at(&self, at: usize) -> u8 {
        self[at]
    }

    #[inline]
    fn i32_at(&self, at: usize) -> i32 {
        i32::from_le_bytes([self[at], self[at + 1], self[at + 2], self[at + 3]])
    }

    #[inline]
    fn bits_at(&self, at: usize, bit_offset: u32, bit_len: u32) -> u16 {
        debug_assert!(bit_offset < 16, "bit offset must fall inside the window");
        debug_assert!(bit_len <= 16, "a window holds at most 16 bits");

        let window = u32::from(u16::from_le_bytes([self[at], self[at + 1]]));
        let mask = (1u32 << bit_len) - 1;
        ((window >> bit_offset) & mask) as u16
    }
}

#[cfg(test)]
mod tests {
    use generic_array::GenericArray;

    use super::Buf;

    #[test]
    fn fixed_offset_reads() {
        let buf = GenericArray::from_array([0x10, 0x78, 0x56, 0x34, 0x12, 0xff]);

        assert_eq!(buf.u8_at(0), 0x10);
        assert_eq!(buf.i32_at(1), 0x1234_5678);
        assert_eq!(buf.u8_at(5), 0xff);
    }

    #[test]
    fn i32_is_signed() {
        let buf = GenericArray::from_array([0xff, 0xff, 0xff, 0xff]);
        assert_eq!(buf.i32_at(0), -1);
    }

    #[test]
    fn bits_span_byte_boundary() {
        let buf = GenericArray::from_array([0b1010_0000, 0b0000_0001]);
        assert_eq!(buf.bits_at(0, 4, 9), 0b1_1010);

        // 11 set bits starting at bit 5 of the window
        let buf = GenericArray::from_array([0b1110_0000, 0xff]);
        assert_eq!(buf.bits_at(0, 5, 11), 0x7ff);
        assert_eq!(buf.bits_at(0, 5, 3), 0b111);
        assert_eq!(buf.bits_at(0, 0, 5), 0);
    }

    #[test]
    fn full_width_window() {
        let buf = GenericArray::from_array([0x00, 0x34, 0x12]);
        assert_eq!(buf.bits_at(1, 0, 16), 0x1234);
    }
}
