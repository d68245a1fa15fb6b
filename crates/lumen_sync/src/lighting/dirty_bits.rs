//! Dirty bits for light synchronization
//!
//! Each bit names one category of light state that must be re-read from the
//! scene source. The caller owns the set and hands it to a sync pass by
//! mutable reference; the pass always leaves it `CLEAN`.

bitflags::bitflags! {
    /// Categories of light state that need recomputation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyBits: u32 {
        /// Nothing to do
        const CLEAN         = 0;
        /// World transform changed
        const TRANSFORM     = 1 << 0;
        /// Light parameters (color, intensity, texture, ...) changed
        const PARAMS        = 1 << 1;
        /// Shadow parameters changed
        const SHADOW_PARAMS = 1 << 2;
        /// Shadow collection changed
        const COLLECTION    = 1 << 3;
        /// Every category
        const ALL_DIRTY = Self::TRANSFORM.bits()
            | Self::PARAMS.bits()
            | Self::SHADOW_PARAMS.bits()
            | Self::COLLECTION.bits();
    }
}

impl DirtyBits {
    /// True when no category is flagged
    pub fn is_clean(self) -> bool {
        self.is_empty()
    }
}
