//! Run configuration.

/// Default exclusive upper bound for synthesized integers.
pub const DEFAULT_INT_BOUND: i64 = 1_000_000;

/// Default length of synthesized strings.
pub const DEFAULT_STRING_LEN: usize = 3;

/// Default length of synthesized byte buffers.
pub const DEFAULT_BUFFER_LEN: usize = 4;

/// Default number of elements in synthesized arrays.
pub const DEFAULT_ARRAY_LEN: usize = 2;

/// Knobs for value synthesis.
///
/// The defaults produce small, strictly non-negative values, which is all the
/// round trip check needs.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthConfig {
    /// RNG seed.  `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Exclusive upper bound for 32 and 64 bit integers.
    pub int_bound: i64,

    /// Length of synthesized strings.
    pub string_len: usize,

    /// Length of synthesized byte buffers.
    pub buffer_len: usize,

    /// Number of elements in synthesized arrays.
    pub array_len: usize,
}

impl SynthConfig {
    /// Uses a fixed seed, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the integer bound.  Clamped to `1..=i32::MAX` so every
    /// integer width can honor it.
    pub fn with_int_bound(mut self, bound: i64) -> Self {
        self.int_bound = bound.clamp(1, i32::MAX as i64);
        self
    }

    /// Overrides the string length.
    pub fn with_string_len(mut self, len: usize) -> Self {
        self.string_len = len;
        self
    }

    /// Overrides the byte buffer length.
    pub fn with_buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = len;
        self
    }

    /// Overrides the array length.
    pub fn with_array_len(mut self, len: usize) -> Self {
        self.array_len = len;
        self
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: None,
            int_bound: DEFAULT_INT_BOUND,
            string_len: DEFAULT_STRING_LEN,
            buffer_len: DEFAULT_BUFFER_LEN,
            array_len: DEFAULT_ARRAY_LEN,
        }
    }
}
