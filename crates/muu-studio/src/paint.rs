//! Records the page into a [`DrawList`].
//!
//! Text is drawn as rounded bars sized to the copy; glyphs are not
//! rasterised.

use muu_engine::coords::{Rect, Vec2, Viewport};
use muu_engine::paint::Color;
use muu_engine::scene::{Border, DrawList, QuadCmd, ZIndex};
use muu_hero::panel::text_width;
use muu_hero::{Overlay, OverlayLine, View};

use crate::boot::BootGate;
use crate::content::Content;
use crate::layout::{
    self, CARD_BODY_EM, CARD_PADDING, CARD_RADIUS, CARD_TITLE_EM, MENU_BAR_HEIGHT,
    MENU_BAR_SPACING, MENU_BAR_WIDTH, PageLayout,
};
use crate::menu::{BarPose, MenuState};

const LOADER_TRACK: Vec2 = Vec2::new(256.0, 4.0);

fn white(a: f32) -> Color {
    Color::from_srgba(255, 255, 255, a)
}

#[derive(Copy, Clone)]
struct Text<'a> {
    text: &'a str,
    em: f32,
    color: Color,
}

impl<'a> Text<'a> {
    fn new(text: &'a str, em: f32, color: Color) -> Self {
        Self { text, em, color }
    }

    fn width(self) -> f32 {
        text_width(self.text, self.em)
    }
}

/// A line of copy starting at `left`, vertically centred on `mid_y`.
/// The bar is clipped to `max_width`.
fn push_text(list: &mut DrawList, z: ZIndex, left: f32, mid_y: f32, max_width: f32, t: Text<'_>) {
    let w = t.width().min(max_width);
    if w <= 0.0 {
        return;
    }
    let bar = Rect::new(left, mid_y - t.em * 0.3, w, t.em * 0.6);
    list.push_quad(z, QuadCmd::new(bar, t.color).rounded(t.em * 0.3));
}

fn push_text_centred(list: &mut DrawList, z: ZIndex, center: Vec2, t: Text<'_>) {
    let w = t.width();
    push_text(list, z, center.x - w * 0.5, center.y, w, t);
}

/// Headline and tagline stacked over the hero.
pub fn hero_overlay(content: &Content, viewport: Viewport) -> Overlay {
    let em = layout::headline_em(viewport);
    let mut lines: Vec<OverlayLine> = content
        .headline
        .iter()
        .map(|l| OverlayLine::new(l.as_str(), em, Color::WHITE))
        .collect();
    lines.push(OverlayLine::new(content.tagline.as_str(), 16.0, white(0.7)));
    Overlay::new(lines)
}

/// First-visit loader. Opaque; covers everything below it.
pub fn loader(list: &mut DrawList, viewport: Viewport, gate: &BootGate, brand: &str) {
    let z = ZIndex::LOADER;
    list.push_solid_rect(z, Rect::new(0.0, 0.0, viewport.width, viewport.height), Color::BLACK);

    // Brand (32) + gap (24) + track (4) + gap (12) + status line (20).
    let stack_h = 92.0;
    let cx = viewport.width * 0.5;
    let top = (viewport.height - stack_h) * 0.5;

    push_text_centred(list, z.above(1), Vec2::new(cx, top + 16.0), Text::new(brand, 24.0, white(0.9)));

    let track = Rect::new(cx - LOADER_TRACK.x * 0.5, top + 56.0, LOADER_TRACK.x, LOADER_TRACK.y);
    list.push_quad(z.above(1), QuadCmd::new(track, white(0.1)).rounded(2.0));

    // The bar slides through the track and is clipped at both ends.
    let bar_w = track.size.x / 3.0;
    let x0 = track.origin.x + gate.marquee_offset() * bar_w;
    let left = x0.max(track.origin.x);
    let right = (x0 + bar_w).min(track.max().x);
    if right > left {
        list.push_solid_rect(
            z.above(2),
            Rect::new(left, track.origin.y, right - left, track.size.y),
            Color::WHITE,
        );
    }

    push_text_centred(
        list,
        z.above(1),
        Vec2::new(cx, top + 82.0),
        Text::new("Initializing…", 14.0, white(0.6)),
    );
}

fn menu_bar(list: &mut DrawList, z: ZIndex, center: Vec2, pose: BarPose) {
    let rect = Rect::from_center(
        center + Vec2::new(0.0, pose.dy),
        Vec2::new(MENU_BAR_WIDTH, MENU_BAR_HEIGHT),
    );
    list.push_quad(z, QuadCmd::new(rect, Color::WHITE).rounded(1.0).rotated(pose.rotation));
}

/// Sticky header with the brand and the hamburger button.
pub fn header(list: &mut DrawList, page: &PageLayout, menu: &MenuState, brand: &str) {
    let z = ZIndex::HEADER;
    let h = page.header;
    list.push_solid_rect(z, h, Color::BLACK.with_opacity(0.7));
    list.push_solid_rect(
        z.above(1),
        Rect::new(h.origin.x, h.max().y - 1.0, h.size.x, 1.0),
        white(0.1),
    );

    push_text(
        list,
        z.above(1),
        page.brand.origin.x,
        page.brand.center().y,
        page.brand.size.x,
        Text::new(brand, 16.0, Color::WHITE),
    );

    let c = page.menu_button.center();
    let half = MENU_BAR_SPACING * 0.5;
    menu_bar(list, z.above(2), c - Vec2::new(0.0, half), menu.top_bar());
    menu_bar(list, z.above(2), c + Vec2::new(0.0, half), menu.bottom_bar());
}

/// Full-screen menu overlay. `items` comes from [`PageLayout::menu_items`].
pub fn menu(
    list: &mut DrawList,
    viewport: Viewport,
    menu: &MenuState,
    content: &Content,
    items: &[Rect],
    hovered: Option<usize>,
) {
    if !menu.is_visible() {
        return;
    }
    let z = ZIndex::MENU;
    let k = menu.opacity();
    list.push_solid_rect(
        z,
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        Color::BLACK.with_opacity(0.9 * k),
    );

    let em = layout::menu_item_em(viewport);
    for (i, (item, rect)) in content.nav.iter().zip(items).enumerate() {
        let a = if hovered == Some(i) { 0.7 } else { 1.0 };
        push_text(
            list,
            z.above(1),
            rect.origin.x,
            rect.center().y,
            rect.size.x,
            Text::new(&item.label, em, white(a * k)),
        );
    }
}

/// Hero branch: the static panel is recorded here; the animated scene is
/// drawn by the hero renderer and only its overlay lands in the list.
pub fn hero(list: &mut DrawList, view: &View<'_>, region: Rect) {
    match view {
        View::Static { panel, overlay } => {
            panel.paint(region, list, ZIndex::HERO);
            if let Some(o) = overlay {
                o.paint(region, list, ZIndex::HERO_OVERLAY);
            }
        }
        View::Animated { overlay, .. } => {
            if let Some(o) = overlay {
                o.paint(region, list, ZIndex::HERO_OVERLAY);
            }
        }
        View::Unmounted => {}
    }
}

/// Promo cards in screen space.
pub fn cards(list: &mut DrawList, page: &PageLayout, scroll: f32, content: &Content, hovered: Option<usize>) {
    let z = ZIndex::CONTENT;
    for (i, (card, rect)) in content.cards.iter().zip(&page.cards).enumerate() {
        let r = page.to_screen(*rect, scroll);
        if r.max().y < 0.0 || r.origin.y > page.viewport.height {
            continue;
        }
        let fill = if hovered == Some(i) { white(0.07) } else { white(0.05) };
        list.push_quad(
            z,
            QuadCmd::new(r, fill)
                .rounded(CARD_RADIUS)
                .bordered(Border::new(1.0, white(0.1))),
        );

        let inner = r.inset(CARD_PADDING);
        let title_mid = inner.origin.y + CARD_TITLE_EM * 0.7;
        push_text(
            list,
            z.above(1),
            inner.origin.x,
            title_mid,
            inner.size.x,
            Text::new(&card.title, CARD_TITLE_EM, Color::WHITE),
        );
        let body_mid = inner.origin.y + CARD_TITLE_EM * 1.4 + 8.0 + CARD_BODY_EM * 0.75;
        push_text(
            list,
            z.above(1),
            inner.origin.x,
            body_mid,
            inner.size.x,
            Text::new(&card.description, CARD_BODY_EM, white(0.7)),
        );
    }
}

pub fn footer(list: &mut DrawList, page: &PageLayout, scroll: f32, content: &Content) {
    let r = page.to_screen(page.footer, scroll);
    if r.origin.y > page.viewport.height {
        return;
    }
    let z = ZIndex::CONTENT;
    list.push_solid_rect(z, Rect::new(r.origin.x, r.origin.y, r.size.x, 1.0), white(0.1));
    push_text_centred(
        list,
        z.above(1),
        r.center(),
        Text::new(&content.copyright, 16.0, white(0.5)),
    );
}
