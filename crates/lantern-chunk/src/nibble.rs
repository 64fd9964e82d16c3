use lantern_blocks::MAX_LIGHT;

/// Densely packed 4-bit values, two per byte (low nibble = even index).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NibbleArray {
    data: Vec<u8>,
    len: usize,
}

impl NibbleArray {
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0; len.div_ceil(2)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> u8 {
        let byte = self.data[idx >> 1];
        if idx & 1 == 0 { byte & 0x0F } else { byte >> 4 }
    }

    /// Stores `value` and returns what was there.
    ///
    /// Panics if `value` does not fit in four bits.
    #[inline]
    pub fn set(&mut self, idx: usize, value: u8) -> u8 {
        assert!(value <= MAX_LIGHT, "nibble value {value} out of range");
        let old = self.get(idx);
        let byte = &mut self.data[idx >> 1];
        *byte = if idx & 1 == 0 {
            (*byte & 0xF0) | value
        } else {
            (*byte & 0x0F) | (value << 4)
        };
        old
    }

    pub fn fill(&mut self, value: u8) {
        assert!(value <= MAX_LIGHT, "nibble value {value} out of range");
        self.data.fill(value | (value << 4));
    }
}
