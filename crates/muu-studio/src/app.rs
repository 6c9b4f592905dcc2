//! The landing page as an engine [`App`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use muu_engine::coords::{Rect, Vec2, Viewport};
use muu_engine::core::{App, AppControl, FrameCtx, FrameStatus};
use muu_engine::input::{InputFrame, InputState, Key};
use muu_engine::paint::Color;
use muu_engine::render::QuadRenderer;
use muu_engine::scene::DrawList;
use muu_engine::window::CursorIcon;
use muu_hero::gpu::HeroRenderer;
use muu_hero::{CapabilityHost, Hero, HeroConfig, HeroError, RenderDecision, View};
use winit::window::WindowId;

use crate::boot::{BootGate, LoaderTiming};
use crate::content::{Content, LinkTarget};
use crate::layout::{self, PageLayout, Scroll};
use crate::links::{self, LinkOpener};
use crate::menu::{MenuEvent, MenuState};
use crate::paint;
use crate::session::SessionStore;

pub struct StudioApp {
    content: Content,

    hero: Hero,
    hero_gpu: Option<HeroRenderer>,
    host: Box<dyn CapabilityHost>,
    /// Set by the hero's readiness callback.
    hero_ready: Rc<Cell<bool>>,
    /// Frame clock reading when the hero started animating.
    hero_epoch: Option<f64>,
    overlay_em: f32,

    gate: BootGate,
    /// Frame clock reading when the gate opened.
    boot_epoch: Option<f64>,

    menu: MenuState,
    scroll: Scroll,
    opener: Box<dyn LinkOpener>,
    cursor: CursorIcon,

    quads: QuadRenderer,
    list: DrawList,
}

impl StudioApp {
    pub fn new(
        hero_config: HeroConfig,
        timing: LoaderTiming,
        content: Content,
        session: &mut dyn SessionStore,
        host: Box<dyn CapabilityHost>,
        opener: Box<dyn LinkOpener>,
    ) -> Result<Self, HeroError> {
        let mut hero = Hero::new(hero_config)?;
        let hero_ready = Rc::new(Cell::new(false));
        let flag = Rc::clone(&hero_ready);
        hero.on_ready(move || flag.set(true));

        content.log_summary();

        Ok(Self {
            content,
            hero,
            hero_gpu: None,
            host,
            hero_ready,
            hero_epoch: None,
            overlay_em: 0.0,
            gate: BootGate::start(session, timing),
            boot_epoch: None,
            menu: MenuState::default(),
            scroll: Scroll::default(),
            opener,
            cursor: CursorIcon::Default,
            quads: QuadRenderer::new(),
            list: DrawList::new(),
        })
    }

    fn layout(&self, viewport: Viewport) -> PageLayout {
        PageLayout::compute(viewport, &self.content.brand, self.content.cards.len())
    }

    /// Decides the hero branch and, when capable, builds its renderer.
    fn mount_hero(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.hero.resolve(self.host.as_mut()) != RenderDecision::Capable {
            return;
        }
        self.hero_gpu = self.hero.construct(|_scene, geometry| {
            let mut renderer = HeroRenderer::new(device, format);
            renderer.prime(device, geometry);
            Ok(renderer)
        });
    }

    /// Rebuilds the overlay when the type scale changes with the width.
    fn sync_overlay(&mut self, viewport: Viewport) {
        let em = layout::headline_em(viewport);
        if em != self.overlay_em {
            self.overlay_em = em;
            self.hero
                .set_overlay(Some(paint::hero_overlay(&self.content, viewport)));
        }
    }

    /// Steps the hero. The ring angle follows wall-clock time since mount,
    /// so it stays on pace after a stall that clamps `dt`.
    fn advance_hero(&mut self, dt: f32, elapsed: f64) {
        let epoch = *self.hero_epoch.get_or_insert(elapsed);
        self.hero.advance(dt, (elapsed - epoch).max(0.0));
    }

    fn advance_boot(&mut self, elapsed: f64) {
        if !self.gate.is_booting() {
            return;
        }
        if self.hero_ready.get() {
            self.gate.hero_ready();
        }
        let epoch = *self.boot_epoch.get_or_insert(elapsed);
        self.gate
            .update(Duration::from_secs_f64((elapsed - epoch).max(0.0)));
    }

    /// Applies this frame's input. Returns the cursor the window should show.
    fn handle_input(&mut self, page: &PageLayout, input: &InputState, frame: &InputFrame) -> CursorIcon {
        if self.gate.is_booting() {
            return CursorIcon::Progress;
        }

        if frame.key_pressed(Key::Escape) {
            self.menu.handle(MenuEvent::Escape);
        }

        for &p in &frame.clicks {
            self.click(page, p);
        }

        // Scrolling is locked while the menu covers the page.
        if !self.menu.is_open() {
            self.scroll.scroll_by(frame.scroll.y, page.max_scroll());
        }
        self.scroll.clamp(page.max_scroll());

        match input.pointer_pos {
            Some(p) if self.hovers_target(page, p) => CursorIcon::Pointer,
            _ => CursorIcon::Default,
        }
    }

    fn menu_items(&self, page: &PageLayout) -> Vec<Rect> {
        page.menu_items(self.content.nav.iter().map(|n| n.label.as_str()))
    }

    fn click(&mut self, page: &PageLayout, p: Vec2) {
        if page.menu_button.contains(p) {
            self.menu.handle(MenuEvent::ButtonClick);
            return;
        }

        if self.menu.is_open() {
            let item = self.menu_items(page).iter().position(|r| r.contains(p));
            if let Some(i) = self.menu.handle(MenuEvent::Click { item }) {
                let target = self.content.nav[i].target.clone();
                log::info!("menu: {} -> {target}", self.content.nav[i].label);
                self.follow(page, &target);
            }
            return;
        }

        if let Some(i) = page.card_at(p, self.scroll.offset()) {
            let target = LinkTarget::parse(&self.content.cards[i].href);
            log::info!("card: {} -> {target}", self.content.cards[i].title);
            self.follow(page, &target);
        }
    }

    fn follow(&mut self, page: &PageLayout, target: &LinkTarget) {
        match target {
            LinkTarget::External(url) => links::follow(self.opener.as_mut(), url),
            LinkTarget::Anchor(id) => match page.anchor_offset(id, &self.content.cards_anchor) {
                Some(y) => self.scroll.scroll_to(y, page.max_scroll()),
                None => log::info!("no section for #{id} on this page"),
            },
        }
    }

    fn hovers_target(&self, page: &PageLayout, p: Vec2) -> bool {
        if page.menu_button.contains(p) {
            return true;
        }
        if self.menu.is_open() {
            return self.menu_items(page).iter().any(|r| r.contains(p));
        }
        page.card_at(p, self.scroll.offset()).is_some()
    }

    fn record(&mut self, page: &PageLayout, pointer: Option<Vec2>) -> Rect {
        self.list.clear();
        let scroll = self.scroll.offset();
        let hero_region = page.to_screen(page.hero, scroll);

        paint::hero(&mut self.list, &self.hero.view(), hero_region);

        let menu_open = self.menu.is_open();
        let hovered_card = pointer.filter(|_| !menu_open).and_then(|p| page.card_at(p, scroll));
        paint::cards(&mut self.list, page, scroll, &self.content, hovered_card);
        paint::footer(&mut self.list, page, scroll, &self.content);

        let items = self.menu_items(page);
        let hovered_item = pointer.and_then(|p| items.iter().position(|r| r.contains(p)));
        paint::menu(&mut self.list, page.viewport, &self.menu, &self.content, &items, hovered_item);
        paint::header(&mut self.list, page, &self.menu, &self.content.brand);

        if self.gate.is_booting() {
            paint::loader(&mut self.list, page.viewport, &self.gate, &self.content.brand);
        }
        hero_region
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.hero.decision() == RenderDecision::Untested {
            let format = ctx.gpu.surface_format();
            self.mount_hero(ctx.gpu.device(), format);
        }

        let viewport = ctx.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }
        let page = self.layout(viewport);
        self.sync_overlay(viewport);

        let cursor = self.handle_input(&page, ctx.input, ctx.input_frame);
        if cursor != self.cursor {
            self.cursor = cursor;
            ctx.window.set_cursor(cursor);
        }

        let dt = ctx.time.dt;
        self.advance_boot(ctx.time.elapsed);
        self.menu.update(dt);
        self.advance_hero(dt, ctx.time.elapsed);

        if ctx.gpu.is_lost() {
            self.hero.context_lost("graphics device lost");
        }

        let hero_region = self.record(&page, ctx.input.pointer_pos);

        let status = {
            let view = self.hero.view();
            let hero_gpu = &mut self.hero_gpu;
            let quads = &mut self.quads;
            let list = &mut self.list;
            ctx.render(Color::BLACK, |rctx, target| {
                if let (View::Animated { scene, geometry, .. }, Some(renderer)) = (&view, hero_gpu.as_mut()) {
                    renderer.render(rctx, target, hero_region, scene, geometry);
                }
                quads.render(rctx, target, list);
            })
        };

        match status {
            FrameStatus::Presented => self.hero.frame_presented(),
            FrameStatus::Skipped => {}
            FrameStatus::Lost => self.hero.context_lost("surface lost"),
            FrameStatus::Fatal => {
                log::error!("unrecoverable surface error; exiting");
                return AppControl::Exit;
            }
        }

        AppControl::Continue
    }

    fn on_window_closing(&mut self, _window_id: WindowId) {
        self.hero.unmount();
        self.hero_gpu = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;

    use muu_engine::input::{ButtonState, InputEvent, MouseButton};
    use muu_hero::HeroState;

    use super::*;
    use crate::session::{MemorySession, VISITED_KEY};

    struct NoGpu;

    impl CapabilityHost for NoGpu {
        fn prefers_reduced_motion(&self) -> bool {
            false
        }
        fn probe(&mut self) -> Result<(), HeroError> {
            Err(HeroError::ProbeFailed("no adapter".into()))
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl LinkOpener for Recorder {
        fn open(&mut self, url: &str) -> io::Result<()> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

    fn app(visited: bool) -> (StudioApp, Recorder) {
        let mut session = MemorySession::default();
        if visited {
            session.set(VISITED_KEY, "true").unwrap();
        }
        let rec = Recorder::default();
        let app = StudioApp::new(
            HeroConfig { particle_count: 16, ..HeroConfig::default() },
            LoaderTiming::default(),
            Content::landing(2026),
            &mut session,
            Box::new(NoGpu),
            Box::new(rec.clone()),
        )
        .unwrap();
        (app, rec)
    }

    fn click_at(app: &mut StudioApp, p: Vec2) -> CursorIcon {
        let page = app.layout(VIEWPORT);
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(p));
        for s in [ButtonState::Pressed, ButtonState::Released] {
            state.apply_event(&mut frame, InputEvent::PointerButton { button: MouseButton::Left, state: s });
        }
        app.handle_input(&page, &state, &frame)
    }

    fn idle(app: &mut StudioApp, frame: &InputFrame) {
        let page = app.layout(VIEWPORT);
        app.handle_input(&page, &InputState::default(), frame);
    }

    // ── boot ──────────────────────────────────────────────────────────────

    #[test]
    fn input_is_ignored_while_booting() {
        let (mut app, _) = app(false);
        assert!(app.gate.is_booting());
        let button = app.layout(VIEWPORT).menu_button.center();
        assert_eq!(click_at(&mut app, button), CursorIcon::Progress);
        assert!(!app.menu.is_open());
    }

    #[test]
    fn static_hero_leaves_the_loader_to_the_safety_timer() {
        let (mut app, _) = app(false);
        assert_eq!(app.hero.resolve(app.host.as_mut()), RenderDecision::Incapable);
        assert_eq!(app.hero.state(), HeroState::Static);

        app.advance_boot(10.0);
        app.advance_boot(13.9);
        assert!(app.gate.is_booting());
        app.advance_boot(14.0);
        assert!(!app.gate.is_booting());
    }

    #[test]
    fn ready_flag_closes_loader_after_minimum() {
        let (mut app, _) = app(false);
        app.advance_boot(0.0);
        app.hero_ready.set(true);
        app.advance_boot(0.2);
        assert!(app.gate.is_booting());
        app.advance_boot(0.5);
        assert!(!app.gate.is_booting());
    }

    // ── menu and links ────────────────────────────────────────────────────

    #[test]
    fn button_toggles_menu_and_escape_closes() {
        let (mut app, _) = app(true);
        let button = app.layout(VIEWPORT).menu_button.center();
        assert_eq!(click_at(&mut app, button), CursorIcon::Pointer);
        assert!(app.menu.is_open());

        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::Escape);
        idle(&mut app, &frame);
        assert!(!app.menu.is_open());
    }

    #[test]
    fn menu_entry_opens_card_url() {
        let (mut app, rec) = app(true);
        let page = app.layout(VIEWPORT);
        click_at(&mut app, page.menu_button.center());
        let first = app.menu_items(&page)[0].center();
        click_at(&mut app, first);
        assert!(!app.menu.is_open());
        assert_eq!(*rec.0.borrow(), vec![app.content.cards[0].href.clone()]);
    }

    #[test]
    fn anchor_entry_without_section_only_closes() {
        let (mut app, rec) = app(true);
        let page = app.layout(VIEWPORT);
        click_at(&mut app, page.menu_button.center());
        let contact = app.menu_items(&page)[2].center();
        click_at(&mut app, contact);
        assert!(!app.menu.is_open());
        assert!(rec.0.borrow().is_empty());
    }

    #[test]
    fn background_click_closes_menu() {
        let (mut app, _) = app(true);
        let page = app.layout(VIEWPORT);
        click_at(&mut app, page.menu_button.center());
        click_at(&mut app, Vec2::new(5.0, VIEWPORT.height - 5.0));
        assert!(!app.menu.is_open());
    }

    #[test]
    fn card_click_opens_href() {
        let (mut app, rec) = app(true);
        let page = app.layout(VIEWPORT);

        let mut frame = InputFrame::default();
        frame.scroll = Vec2::new(0.0, page.max_scroll());
        idle(&mut app, &frame);

        let card = page.to_screen(page.cards[2], app.scroll.offset()).center();
        assert_eq!(click_at(&mut app, card), CursorIcon::Pointer);
        assert_eq!(*rec.0.borrow(), vec![app.content.cards[2].href.clone()]);
    }

    // ── scroll ────────────────────────────────────────────────────────────

    #[test]
    fn scroll_is_locked_while_menu_open() {
        let (mut app, _) = app(true);
        let page = app.layout(VIEWPORT);
        click_at(&mut app, page.menu_button.center());

        let mut frame = InputFrame::default();
        frame.scroll = Vec2::new(0.0, 200.0);
        idle(&mut app, &frame);
        assert_eq!(app.scroll.offset(), 0.0);

        app.menu.close();
        idle(&mut app, &frame);
        assert_eq!(app.scroll.offset(), 200.0);
    }

    #[test]
    fn closing_the_window_unmounts_the_hero() {
        let (mut app, _) = app(true);
        app.on_window_closing(WindowId::dummy());
        assert_eq!(app.hero.state(), HeroState::Unmounted);
    }

    // ── hero timing ───────────────────────────────────────────────────────

    struct Gpu;

    impl CapabilityHost for Gpu {
        fn prefers_reduced_motion(&self) -> bool {
            false
        }
        fn probe(&mut self) -> Result<(), HeroError> {
            Ok(())
        }
    }

    #[test]
    fn hero_time_is_measured_from_first_advance() {
        let (mut app, _) = app(true);
        app.hero.resolve(&mut Gpu);
        assert!(app.hero.construct(|_, _| Ok(())).is_some());

        app.advance_hero(0.016, 3.0);
        assert_eq!(app.hero.scene().map(|s| s.elapsed()), Some(0.0));

        // A 6 s stall: dt is clamped by the clock, elapsed is not.
        app.advance_hero(0.25, 9.0);
        let scene = app.hero.scene().unwrap();
        assert_eq!(scene.elapsed(), 6.0);
        assert_eq!(scene.rings.angle_z(), muu_hero::scene::ring_angle(6.0));
    }
}
