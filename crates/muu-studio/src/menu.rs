//! Full-screen overlay menu and the hamburger button driving it.

use std::f32::consts::FRAC_PI_4;

/// Open/close animation length, seconds.
pub const MENU_ANIM_SECS: f32 = 0.25;

/// Vertical shift of each hamburger bar when fully open, logical pixels.
pub const BAR_SHIFT: f32 = 6.0;

/// Pose of one hamburger bar relative to its resting place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BarPose {
    pub rotation: f32,
    pub dy: f32,
}

/// Something that happened to the menu this frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Escape,
    /// Click on the hamburger button.
    ButtonClick,
    /// Click anywhere else; `item` is the entry under the pointer, if any.
    Click { item: Option<usize> },
}

#[derive(Debug, Clone, Default)]
pub struct MenuState {
    open: bool,
    /// 0 closed .. 1 open, eased towards `open`.
    progress: f32,
}

impl MenuState {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay is on screen (open, or still fading out).
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.open || self.progress > 0.0
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        log::debug!("menu {}", if self.open { "opened" } else { "closed" });
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            log::debug!("menu closed");
        }
    }

    /// Applies `event`. Returns the entry to follow when one was selected.
    pub fn handle(&mut self, event: MenuEvent) -> Option<usize> {
        match event {
            MenuEvent::ButtonClick => {
                self.toggle();
                None
            }
            MenuEvent::Escape => {
                self.close();
                None
            }
            MenuEvent::Click { item } => {
                if !self.open {
                    return None;
                }
                self.close();
                item
            }
        }
    }

    /// Moves the animation towards the current state.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = dt / MENU_ANIM_SECS;
        self.progress = if self.open {
            (self.progress + step).min(1.0)
        } else {
            (self.progress - step).max(0.0)
        };
    }

    /// Eased progress for the bar poses and the overlay fade.
    fn eased(&self) -> f32 {
        let t = self.progress;
        t * t * (3.0 - 2.0 * t)
    }

    pub fn top_bar(&self) -> BarPose {
        let p = self.eased();
        BarPose {
            rotation: FRAC_PI_4 * p,
            dy: BAR_SHIFT * p,
        }
    }

    pub fn bottom_bar(&self) -> BarPose {
        let p = self.eased();
        BarPose {
            rotation: -FRAC_PI_4 * p,
            dy: -BAR_SHIFT * p,
        }
    }

    /// Overlay opacity multiplier.
    pub fn opacity(&self) -> f32 {
        self.eased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> MenuState {
        let mut m = MenuState::default();
        m.handle(MenuEvent::ButtonClick);
        m
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn button_toggles() {
        let mut m = opened();
        assert!(m.is_open());
        m.handle(MenuEvent::ButtonClick);
        assert!(!m.is_open());
    }

    #[test]
    fn escape_closes() {
        let mut m = opened();
        assert_eq!(m.handle(MenuEvent::Escape), None);
        assert!(!m.is_open());
    }

    #[test]
    fn background_click_closes() {
        let mut m = opened();
        assert_eq!(m.handle(MenuEvent::Click { item: None }), None);
        assert!(!m.is_open());
    }

    #[test]
    fn item_click_closes_and_follows() {
        let mut m = opened();
        assert_eq!(m.handle(MenuEvent::Click { item: Some(3) }), Some(3));
        assert!(!m.is_open());
    }

    #[test]
    fn clicks_while_closed_are_ignored() {
        let mut m = MenuState::default();
        assert_eq!(m.handle(MenuEvent::Click { item: Some(0) }), None);
        assert!(!m.is_open());
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn bars_reach_full_pose_after_animation() {
        let mut m = opened();
        m.update(0.1);
        assert!(m.top_bar().rotation < FRAC_PI_4);
        m.update(0.2);
        assert_eq!(m.top_bar(), BarPose { rotation: FRAC_PI_4, dy: 6.0 });
        assert_eq!(m.bottom_bar(), BarPose { rotation: -FRAC_PI_4, dy: -6.0 });
    }

    #[test]
    fn overlay_stays_visible_while_fading_out() {
        let mut m = opened();
        m.update(1.0);
        m.close();
        assert!(m.is_visible());
        m.update(0.25);
        assert!(!m.is_visible());
        assert_eq!(m.top_bar(), BarPose { rotation: 0.0, dy: 0.0 });
    }
}
