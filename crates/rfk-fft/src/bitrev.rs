use std::sync::{Arc, OnceLock};

use rfk_core::config::MAX_FAST_BITS;
use rfk_core::error::{FftError, try_zeroed};

static SHARED: OnceLock<Arc<BitReversalTable>> = OnceLock::new();

/// Precomputed bit-reversal permutations for every width `1..=max_bits`.
///
/// All widths live in one flat vector; width `b` starts at `2^b - 2`.
/// Immutable after construction, shared by `Arc`.
///
/// # Example
/// ```
/// use rfk_fft::bitrev::BitReversalTable;
/// let table = BitReversalTable::build(4);
/// assert_eq!(table.lookup(0b0001, 4), 0b1000);
/// assert_eq!(table.lookup(0b0110, 3), 0b011);
/// ```
#[derive(Debug)]
pub struct BitReversalTable {
    max_bits: u32,
    entries: Vec<u32>,
}

impl BitReversalTable {
    /// Build the table up to `max_bits` (clamped to `1..=20`).
    ///
    /// # Panics
    /// Panics if the table cannot be allocated. Use [`Self::try_build`] to
    /// get an error instead.
    #[must_use]
    pub fn build(max_bits: u32) -> Self {
        match Self::try_build(max_bits) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    /// Build the table up to `max_bits` (clamped to `1..=20`).
    ///
    /// # Errors
    /// Returns [`FftError::Allocation`] if the entries cannot be allocated.
    pub fn try_build(max_bits: u32) -> Result<Self, FftError> {
        let max_bits = max_bits.clamp(1, 20);
        let total = (1usize << (max_bits + 1)) - 2;
        let mut entries: Vec<u32> = try_zeroed(total, "bit-reversal table")?;

        for bits in 1..=max_bits {
            let offset = Self::offset(bits);
            let len = 1usize << bits;
            for (i, slot) in entries[offset..offset + len].iter_mut().enumerate() {
                *slot = reverse_bits(i, bits) as u32;
            }
        }

        log::debug!("Table de bit-reversal construite : {max_bits} bits, {total} entrées");
        Ok(Self { max_bits, entries })
    }

    /// Process-wide table with [`MAX_FAST_BITS`] widths, built on first use.
    ///
    /// # Errors
    /// Returns [`FftError::Allocation`] if the first build cannot allocate.
    /// The cell stays empty, so a later call retries.
    pub fn shared() -> Result<Arc<Self>, FftError> {
        Self::cached(&SHARED, || Self::try_build(MAX_FAST_BITS))
    }

    fn cached(
        cell: &OnceLock<Arc<Self>>,
        build: impl FnOnce() -> Result<Self, FftError>,
    ) -> Result<Arc<Self>, FftError> {
        if let Some(table) = cell.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(build()?);
        // Course possible : le premier `set` gagne, les autres lisent sa table.
        Ok(Arc::clone(cell.get_or_init(|| table)))
    }

    /// Widest permutation served from the table.
    #[inline]
    #[must_use]
    pub fn max_bits(&self) -> u32 {
        self.max_bits
    }

    /// `index` reversed over `num_bits` bits.
    ///
    /// O(1) up to [`Self::max_bits`], O(num_bits) beyond. `index` must be
    /// below `2^num_bits`.
    #[inline(always)]
    #[must_use]
    pub fn lookup(&self, index: usize, num_bits: u32) -> usize {
        if num_bits == 0 {
            return 0;
        }
        if num_bits <= self.max_bits {
            self.entries[Self::offset(num_bits) + index] as usize
        } else {
            reverse_bits(index, num_bits)
        }
    }

    #[inline(always)]
    fn offset(bits: u32) -> usize {
        (1usize << bits) - 2
    }
}

/// Reverse the low `num_bits` bits of `index` by peeling them off one by one.
///
/// # Example
/// ```
/// use rfk_fft::bitrev::reverse_bits;
/// assert_eq!(reverse_bits(0b1101, 4), 0b1011);
/// assert_eq!(reverse_bits(1, 16), 1 << 15);
/// ```
#[inline]
#[must_use]
pub fn reverse_bits(mut index: usize, num_bits: u32) -> usize {
    let mut rev = 0;
    for _ in 0..num_bits {
        rev = (rev << 1) | (index & 1);
        index >>= 1;
    }
    rev
}
