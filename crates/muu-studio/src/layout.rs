//! Page geometry.
//!
//! Everything below the header is laid out in page coordinates (y grows
//! down the document); [`PageLayout::to_screen`] applies the scroll offset.
//! The header is sticky and always sits at the top of the window.

use muu_engine::coords::{Rect, Vec2, Viewport};
use muu_hero::panel::{FallbackPanel, text_width};

pub const HEADER_HEIGHT: f32 = 64.0;
pub const MAX_CONTENT_WIDTH: f32 = 1280.0;
pub const GUTTER: f32 = 16.0;
/// Width at which the page switches to its wide layout.
pub const WIDE_BREAKPOINT: f32 = 640.0;

pub const MENU_BUTTON_SIZE: f32 = 40.0;
pub const MENU_BAR_WIDTH: f32 = 32.0;
pub const MENU_BAR_HEIGHT: f32 = 2.0;
/// Distance between the two bar centres when closed.
pub const MENU_BAR_SPACING: f32 = 10.0;

pub const CARD_GAP: f32 = 24.0;
pub const CARD_PADDING: f32 = 24.0;
pub const CARD_RADIUS: f32 = 16.0;
pub const CARD_TITLE_EM: f32 = 20.0;
pub const CARD_BODY_EM: f32 = 16.0;

const CARDS_PAD_Y: f32 = 80.0;
const FOOTER_PAD_Y: f32 = 40.0;
const FOOTER_LINE: f32 = 24.0;

const MENU_ITEM_SPACING: f32 = 32.0;

/// Hero section vertical padding for a viewport width.
fn hero_pad_y(width: f32) -> f32 {
    if width >= WIDE_BREAKPOINT { 96.0 } else { 64.0 }
}

/// Font size of the menu entries.
pub fn menu_item_em(viewport: Viewport) -> f32 {
    if viewport.width >= WIDE_BREAKPOINT { 48.0 } else { 30.0 }
}

/// Headline font size.
pub fn headline_em(viewport: Viewport) -> f32 {
    if viewport.width >= WIDE_BREAKPOINT { 72.0 } else { 48.0 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,

    /// Screen space.
    pub header: Rect,
    pub brand: Rect,
    pub menu_button: Rect,

    /// Page space from here on.
    pub hero: Rect,
    pub cards_section: Rect,
    pub cards: Vec<Rect>,
    pub footer: Rect,

    /// Document height including the header.
    pub content_height: f32,
}

impl PageLayout {
    pub fn compute(viewport: Viewport, brand: &str, card_count: usize) -> Self {
        let vw = viewport.width.max(0.0);
        let column_w = vw.min(MAX_CONTENT_WIDTH);
        let column_x = (vw - column_w) * 0.5;
        let inner_x = column_x + GUTTER;
        let inner_w = (column_w - 2.0 * GUTTER).max(0.0);

        let header = Rect::new(0.0, 0.0, vw, HEADER_HEIGHT);
        let brand_w = text_width(brand, 16.0);
        let brand = Rect::new(inner_x, (HEADER_HEIGHT - 24.0) * 0.5, brand_w, 24.0);
        let menu_button = Rect::new(
            inner_x + inner_w - MENU_BUTTON_SIZE,
            (HEADER_HEIGHT - MENU_BUTTON_SIZE) * 0.5,
            MENU_BUTTON_SIZE,
            MENU_BUTTON_SIZE,
        );

        let mut y = HEADER_HEIGHT;

        let pad = hero_pad_y(vw);
        let hero = Rect::new(inner_x, y + pad, inner_w, FallbackPanel::height_for(viewport));
        y = hero.max().y + pad;

        let columns = if vw >= WIDE_BREAKPOINT { 3 } else { 1 };
        let card_w = if columns > 1 {
            ((inner_w - CARD_GAP * (columns - 1) as f32) / columns as f32).max(0.0)
        } else {
            inner_w
        };
        let card_h = card_height();
        let cards_top = y + CARDS_PAD_Y;
        let cards: Vec<Rect> = (0..card_count)
            .map(|i| {
                let col = i % columns;
                let row = i / columns;
                Rect::new(
                    inner_x + col as f32 * (card_w + CARD_GAP),
                    cards_top + row as f32 * (card_h + CARD_GAP),
                    card_w,
                    card_h,
                )
            })
            .collect();
        let rows = card_count.div_ceil(columns);
        let grid_h = if rows == 0 {
            0.0
        } else {
            rows as f32 * card_h + (rows - 1) as f32 * CARD_GAP
        };
        let cards_section = Rect::new(column_x, y, column_w, grid_h + 2.0 * CARDS_PAD_Y);
        y = cards_section.max().y;

        let footer = Rect::new(0.0, y, vw, FOOTER_LINE + 2.0 * FOOTER_PAD_Y);
        y = footer.max().y;

        Self {
            viewport,
            header,
            brand,
            menu_button,
            hero,
            cards_section,
            cards,
            footer,
            content_height: y,
        }
    }

    /// Largest scroll offset that still keeps the window covered.
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.height).max(0.0)
    }

    #[inline]
    pub fn to_screen(&self, rect: Rect, scroll: f32) -> Rect {
        rect.translate(Vec2::new(0.0, -scroll))
    }

    /// Index of the card under screen point `p`. The header covers content.
    pub fn card_at(&self, p: Vec2, scroll: f32) -> Option<usize> {
        if self.header.contains(p) {
            return None;
        }
        self.cards
            .iter()
            .position(|c| self.to_screen(*c, scroll).contains(p))
    }

    /// Scroll offset that brings section `id` just under the header.
    pub fn anchor_offset(&self, id: &str, cards_anchor: &str) -> Option<f32> {
        (id == cards_anchor)
            .then(|| (self.cards_section.origin.y - HEADER_HEIGHT).clamp(0.0, self.max_scroll()))
    }

    /// Entry rects of the open menu, centred in the window (screen space).
    pub fn menu_items<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<Rect> {
        let em = menu_item_em(self.viewport);
        let widths: Vec<f32> = labels.into_iter().map(|l| text_width(l, em)).collect();
        let n = widths.len();
        if n == 0 {
            return Vec::new();
        }
        let total = n as f32 * em + (n - 1) as f32 * MENU_ITEM_SPACING;
        let cx = self.viewport.width * 0.5;
        let mut y = (self.viewport.height - total) * 0.5;
        widths
            .into_iter()
            .map(|w| {
                let r = Rect::new(cx - w * 0.5, y, w, em);
                y += em + MENU_ITEM_SPACING;
                r
            })
            .collect()
    }
}

/// Title line, gap and one description line inside the card padding.
fn card_height() -> f32 {
    CARD_PADDING * 2.0 + CARD_TITLE_EM * 1.4 + 8.0 + CARD_BODY_EM * 1.5
}

/// Vertical scroll position of the page.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Scroll {
    offset: f32,
}

impl Scroll {
    #[inline]
    pub fn offset(self) -> f32 {
        self.offset
    }

    pub fn scroll_by(&mut self, dy: f32, max: f32) {
        if dy.is_finite() {
            self.offset = (self.offset + dy).clamp(0.0, max.max(0.0));
        }
    }

    pub fn scroll_to(&mut self, y: f32, max: f32) {
        if y.is_finite() {
            self.offset = y.clamp(0.0, max.max(0.0));
        }
    }

    /// Re-clamps after a resize.
    pub fn clamp(&mut self, max: f32) {
        self.offset = self.offset.clamp(0.0, max.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> PageLayout {
        PageLayout::compute(Viewport::new(1600.0, 900.0), "muu.studio", 3)
    }

    fn narrow() -> PageLayout {
        PageLayout::compute(Viewport::new(400.0, 800.0), "muu.studio", 3)
    }

    // ── sections ──────────────────────────────────────────────────────────

    #[test]
    fn content_column_is_capped_and_centred() {
        let l = wide();
        assert_eq!(l.hero.origin.x, 160.0 + GUTTER);
        assert_eq!(l.hero.size.x, MAX_CONTENT_WIDTH - 2.0 * GUTTER);
        assert_eq!(l.hero.size.y, 720.0);
        assert_eq!(l.hero.origin.y, HEADER_HEIGHT + 96.0);
    }

    #[test]
    fn wide_cards_share_a_row() {
        let l = wide();
        assert_eq!(l.cards.len(), 3);
        assert!(l.cards.iter().all(|c| c.origin.y == l.cards[0].origin.y));
        assert_eq!(l.cards[1].origin.x - l.cards[0].max().x, CARD_GAP);
    }

    #[test]
    fn narrow_cards_stack() {
        let l = narrow();
        assert!(l.cards.iter().all(|c| c.origin.x == l.cards[0].origin.x));
        assert_eq!(l.cards[1].origin.y - l.cards[0].max().y, CARD_GAP);
        assert_eq!(l.hero.origin.y, HEADER_HEIGHT + 64.0);
    }

    #[test]
    fn footer_ends_the_document() {
        let l = wide();
        assert_eq!(l.footer.max().y, l.content_height);
        assert!(l.footer.origin.y >= l.cards_section.max().y);
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn card_hit_follows_scroll() {
        let l = wide();
        let c = l.cards[1].center();
        assert_eq!(l.card_at(c, 0.0), Some(1));
        assert_eq!(l.card_at(c - Vec2::new(0.0, 100.0), 100.0), Some(1));
        assert_eq!(l.card_at(c, 100.0), None);
    }

    #[test]
    fn header_covers_cards() {
        let l = wide();
        let top = l.cards[0].origin.y;
        // Scroll the first card under the header.
        let p = Vec2::new(l.cards[0].center().x, 10.0);
        assert_eq!(l.card_at(p, top), None);
    }

    #[test]
    fn menu_items_are_centred_column() {
        let l = wide();
        let items = l.menu_items(["ab", "abcd"]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].center().x, 800.0);
        assert_eq!(items[1].origin.y - items[0].max().y, 32.0);
    }

    #[test]
    fn anchors_resolve_only_known_sections() {
        let l = narrow();
        assert!(l.anchor_offset("product", "product").is_some());
        assert_eq!(l.anchor_offset("contact", "product"), None);
    }

    // ── scroll ────────────────────────────────────────────────────────────

    #[test]
    fn scroll_is_clamped() {
        let mut s = Scroll::default();
        s.scroll_by(-50.0, 300.0);
        assert_eq!(s.offset(), 0.0);
        s.scroll_by(500.0, 300.0);
        assert_eq!(s.offset(), 300.0);
        s.clamp(120.0);
        assert_eq!(s.offset(), 120.0);
        s.scroll_by(f32::NAN, 300.0);
        assert_eq!(s.offset(), 120.0);
    }
}
