pub mod zoom;

use serde::{Deserialize, Serialize};

pub use zoom::{
    DragDirection, DragGesture, DragZoomGate, NoZoomGate, ZoomGate, ZoomGateConfig, ZoomRange,
    ZoomRefresh, ZoomSupport,
};

/// Shared pointer bookkeeping that runs before the detector's own handling.
///
/// Hosts with their own mouse plumbing implement this to keep it in the
/// loop; [`PointerTracker`] is the default.
pub trait MouseEventBase {
    fn on_mouse_move(&mut self, client_x: f64, client_y: f64);
    fn on_mouse_out(&mut self);

    fn last_client_position(&self) -> Option<(f64, f64)> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPresence {
    Outside,
    Inside,
}

/// Raw client-space pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerTracker {
    presence: PointerPresence,
    client_x: f64,
    client_y: f64,
    seen_move: bool,
    move_count: u64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self {
            presence: PointerPresence::Outside,
            client_x: 0.0,
            client_y: 0.0,
            seen_move: false,
            move_count: 0,
        }
    }
}

impl PointerTracker {
    #[must_use]
    pub fn presence(self) -> PointerPresence {
        self.presence
    }

    #[must_use]
    pub fn move_count(self) -> u64 {
        self.move_count
    }

    /// Last client position, kept after the pointer leaves.
    #[must_use]
    pub fn client_position(self) -> Option<(f64, f64)> {
        self.seen_move.then_some((self.client_x, self.client_y))
    }
}

impl MouseEventBase for PointerTracker {
    fn on_mouse_move(&mut self, client_x: f64, client_y: f64) {
        self.presence = PointerPresence::Inside;
        self.client_x = client_x;
        self.client_y = client_y;
        self.seen_move = true;
        self.move_count = self.move_count.saturating_add(1);
    }

    fn on_mouse_out(&mut self) {
        self.presence = PointerPresence::Outside;
    }

    fn last_client_position(&self) -> Option<(f64, f64)> {
        self.client_position()
    }
}
