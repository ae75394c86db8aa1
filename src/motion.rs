//! Rotation state of the logo: where the user (or the idle animation) wants it
//! to be, and where it is drawn. `current` chases `target` by a fixed fraction
//! each frame.

use crate::config::MotionConfig;
use glam::Vec2;

/// Text shown next to the logo.
pub const HINT_DRAG: &str = "click and drag to rotate";
pub const HINT_RESUME: &str = "double-click to resume auto-rotation";

pub fn hint_for(auto_rotate: bool) -> &'static str {
    if auto_rotate {
        HINT_DRAG
    } else {
        HINT_RESUME
    }
}

#[derive(Debug, Clone)]
pub struct LogoMotion {
    config: MotionConfig,
    /// `x` is pitch, `y` is yaw.
    target: Vec2,
    current: Vec2,
    auto_rotate: bool,
    pointer_down: bool,
    last_pointer: Option<Vec2>,
}

impl LogoMotion {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            auto_rotate: true,
            pointer_down: false,
            last_pointer: None,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.auto_rotate = on;
    }

    /// Mouse-down or single-finger touch-start. Stops the idle animation.
    pub fn press(&mut self, at: Vec2) {
        self.pointer_down = true;
        self.auto_rotate = false;
        self.last_pointer = Some(at);
    }

    /// Pointer move. Ignored unless pressed. Horizontal drag turns around Y,
    /// vertical drag around X.
    pub fn drag(&mut self, at: Vec2) {
        if !self.pointer_down {
            return;
        }
        let last = self.last_pointer.unwrap_or(at);
        let delta = (at - last) * self.config.drag_sensitivity;
        self.target.y += delta.x;
        self.target.x += delta.y;
        self.clamp_pitch();
        self.last_pointer = Some(at);
    }

    /// Auto-rotation stays off after a release.
    pub fn release(&mut self) {
        self.pointer_down = false;
        self.last_pointer = None;
    }

    /// Double-click. Returns the new `auto_rotate` value.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Advances one frame. `elapsed` is seconds since an arbitrary origin and
    /// only drives the phase of the idle bobbing.
    pub fn tick(&mut self, elapsed: f64) -> Vec2 {
        if self.auto_rotate && !self.pointer_down {
            self.target.y += self.config.auto_rotate_step;
            let phase = (elapsed * self.config.bob_frequency as f64).sin() as f32;
            self.target.x = phase * self.config.bob_amplitude;
            self.clamp_pitch();
        }
        self.current += (self.target - self.current) * self.config.smoothing;
        self.current
    }

    fn clamp_pitch(&mut self) {
        let limit = self.config.pitch_limit;
        // not `clamp`: a negative limit must not panic
        self.target.x = self.target.x.max(-limit).min(limit);
    }
}

impl Default for LogoMotion {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}
