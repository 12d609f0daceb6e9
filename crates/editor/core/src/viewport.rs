//! Zoom/pan bookkeeping for the visible canvas area.

use crate::config::EditorConfig;
use crate::coords::ScreenPoint;

/// Pan/zoom state plus the visible surface size in screen pixels.
///
/// Zoom is clamped to `[EditorConfig::MIN_ZOOM, EditorConfig::MAX_ZOOM]`;
/// pan is clamped on demand so the view never strays more than the
/// configured margin past the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub view_width: f32,
    pub view_height: f32,
}

impl Viewport {
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            view_width,
            view_height,
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(EditorConfig::MIN_ZOOM, EditorConfig::MAX_ZOOM);
    }

    /// Scales zoom by `factor`, keeping the world point under `anchor`
    /// stationary on screen.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f32) {
        let old_zoom = self.zoom;
        self.set_zoom(self.zoom * factor);
        let applied = self.zoom / old_zoom;
        self.pan_x = anchor.x - (anchor.x - self.pan_x) * applied;
        self.pan_y = anchor.y - (anchor.y - self.pan_y) * applied;
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Clamps pan so the visible area extends at most `view_margin` pixels
    /// beyond the grid on any side. When the zoomed grid is smaller than the
    /// view, the grid is kept within the margin-padded view instead.
    pub fn clamp_pan(&mut self, config: &EditorConfig) {
        let grid_w = config.width_tiles() as f32 * config.tile_size * self.zoom;
        let grid_h = config.height_tiles() as f32 * config.tile_size * self.zoom;
        let margin = config.view_margin;

        self.pan_x = clamp_axis(self.pan_x, grid_w, self.view_width, margin);
        self.pan_y = clamp_axis(self.pan_y, grid_h, self.view_height, margin);
    }
}

fn clamp_axis(pan: f32, grid_extent: f32, view_extent: f32, margin: f32) -> f32 {
    let min = view_extent - grid_extent - margin;
    let max = margin;
    if min > max {
        // Grid smaller than the view: the interval inverts, keep the grid
        // fully visible instead.
        pan.clamp(max, min)
    } else {
        pan.clamp(min, max)
    }
}
