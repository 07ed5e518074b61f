//! Camera that follows a point and stays inside the level
//!
//! Position is the camera centre in level pixels. Zoom and rotation only
//! matter to the renderer's coordinate conversions.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom
pub const MIN_ZOOM: f32 = 0.01;

/// Clamp one axis of a camera centre so the viewport stays inside `[0, extent]`
///
/// A level smaller than the viewport is centred instead.
#[inline]
pub fn clamp_axis(center: i32, viewport: i32, extent: i32) -> i32 {
    let half = viewport / 2;
    if extent <= viewport {
        extent / 2
    } else if center - half < 0 {
        half
    } else if center + half > extent {
        extent - half
    } else {
        center
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Point being tracked
    pub focus: IVec2,
    /// Clamped centre
    pub position: IVec2,
    pub viewport: IVec2,
    pub zoom: f32,
    /// Radians
    pub rotation: f32,
}

impl Camera {
    pub fn new(viewport: IVec2) -> Self {
        Self {
            focus: viewport / 2,
            position: viewport / 2,
            viewport,
            zoom: 1.0,
            rotation: 0.0,
        }
    }

    /// Snap onto `focus`, clamped to a level of `extent` pixels
    pub fn follow(&mut self, focus: IVec2, extent: IVec2) {
        self.focus = focus;
        self.position = IVec2::new(
            clamp_axis(focus.x, self.viewport.x, extent.x),
            clamp_axis(focus.y, self.viewport.y, extent.y),
        );
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Top-left of the visible area in level pixels (ignoring zoom)
    pub fn top_left(&self) -> IVec2 {
        self.position - self.viewport / 2
    }

    /// Level coordinates to screen coordinates
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let rel = Vec2::from_angle(self.rotation).rotate(world - self.position.as_vec2());
        rel * self.zoom + self.viewport.as_vec2() / 2.0
    }

    /// Screen coordinates to level coordinates
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let rel = (screen - self.viewport.as_vec2() / 2.0) / self.zoom;
        Vec2::from_angle(-self.rotation).rotate(rel) + self.position.as_vec2()
    }
}
