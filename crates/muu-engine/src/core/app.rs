use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called before a window and its GPU context are dropped.
    ///
    /// GPU resources owned by the app for this window must be released here.
    fn on_window_closing(&mut self, window_id: WindowId) {
        let _ = window_id;
    }
}
