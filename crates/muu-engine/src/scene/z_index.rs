/// Z-ordering key for draw items. Higher values appear on top.
///
/// The named layers mirror the page stacking: hero and content at the
/// bottom, then the overlay menu, the sticky header (which carries the
/// hamburger button), and the boot loader above everything.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const HERO: ZIndex = ZIndex(0);
    pub const HERO_OVERLAY: ZIndex = ZIndex(10);
    pub const CONTENT: ZIndex = ZIndex(20);
    pub const MENU: ZIndex = ZIndex(80);
    pub const HEADER: ZIndex = ZIndex(90);
    pub const LOADER: ZIndex = ZIndex(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// Same layer, nudged up by `by`.
    #[inline]
    pub const fn above(self, by: i32) -> Self {
        Self(self.0 + by)
    }
}
