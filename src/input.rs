//! Platform-agnostic input events consumed by
//! [`CurveRenderEngine::handle_input`](crate::engine::CurveRenderEngine::handle_input).

/// A pointer, wheel or keyboard event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Primary button pressed or released.
    PrimaryButton {
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
    /// Frame every loaded curve.
    FitView,
}

/// What a drag does at the current modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragMode {
    Rotate,
    Pan,
}

impl DragMode {
    pub(crate) const fn from_shift(shift: bool) -> Self {
        if shift {
            Self::Pan
        } else {
            Self::Rotate
        }
    }
}

/// Cursor bookkeeping between move events.
#[derive(Debug, Default)]
pub(crate) struct PointerState {
    last: Option<(f32, f32)>,
}

impl PointerState {
    /// Record a new position and return the motion since the last one.
    pub(crate) fn moved_to(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = self.last.map_or((0.0, 0.0), |(lx, ly)| (x - lx, y - ly));
        self.last = Some((x, y));
        delta
    }
}
