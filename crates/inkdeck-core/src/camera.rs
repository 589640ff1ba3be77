//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Duration of an animated zoom, in seconds.
pub const ZOOM_ANIMATION_SECS: f64 = 0.32;

/// Options for [`Camera::zoom_to_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOptions {
    /// Upper bound for the resulting zoom (1.0 = 100%).
    pub target_zoom: Option<f64>,
    /// Screen-space margin kept around the bounds on every side.
    pub inset: f64,
    /// Apply immediately instead of animating.
    pub immediate: bool,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            target_zoom: None,
            inset: 0.0,
            immediate: false,
        }
    }
}

impl ZoomOptions {
    pub fn target_zoom(mut self, zoom: f64) -> Self {
        self.target_zoom = Some(zoom);
        self
    }

    pub fn inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }
}

/// An in-flight transition between two camera states.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraAnimation {
    from_offset: Vec2,
    from_zoom: f64,
    to_offset: Vec2,
    to_zoom: f64,
    elapsed: f64,
    duration: f64,
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    #[serde(skip)]
    animation: Option<CameraAnimation>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 8.0,
            animation: None,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.animation = None;
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.animation = None;
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.animation = None;
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Center `bounds` in the viewport at the largest zoom that fits,
    /// capped by `options.target_zoom`.
    pub fn zoom_to_bounds(&mut self, bounds: Rect, viewport: Size, options: ZoomOptions) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let available = Size::new(
            (viewport.width - options.inset * 2.0).max(1.0),
            (viewport.height - options.inset * 2.0).max(1.0),
        );
        let fit = (available.width / bounds.width()).min(available.height / bounds.height());
        let mut zoom = fit.clamp(self.min_zoom, self.max_zoom);
        if let Some(target) = options.target_zoom {
            zoom = zoom.min(target);
        }

        let center = bounds.center();
        let offset = Vec2::new(
            viewport.width / 2.0 - center.x * zoom,
            viewport.height / 2.0 - center.y * zoom,
        );

        if options.immediate {
            self.animation = None;
            self.offset = offset;
            self.zoom = zoom;
        } else {
            self.animation = Some(CameraAnimation {
                from_offset: self.offset,
                from_zoom: self.zoom,
                to_offset: offset,
                to_zoom: zoom,
                elapsed: 0.0,
                duration: ZOOM_ANIMATION_SECS,
            });
        }
    }

    /// Whether an animated zoom is still running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the running animation by `dt` seconds.
    /// Returns true while the animation is still running.
    pub fn step(&mut self, dt: f64) -> bool {
        let Some(mut anim) = self.animation else {
            return false;
        };
        anim.elapsed += dt;
        let t = (anim.elapsed / anim.duration).clamp(0.0, 1.0);
        let eased = ease_in_out_cubic(t);
        self.offset = anim.from_offset + (anim.to_offset - anim.from_offset) * eased;
        self.zoom = anim.from_zoom + (anim.to_zoom - anim.from_zoom) * eased;

        if t >= 1.0 {
            self.animation = None;
            false
        } else {
            self.animation = Some(anim);
            true
        }
    }
}
