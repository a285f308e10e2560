//! Zoom control for the grid scale.
//!
//! Input moves a target scale; the applied scale eases toward it each frame so
//! wheel notches glide instead of jumping.

/// Zoom tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomConfig {
    /// Scale at startup and after a reset.
    pub initial: f32,
    pub min: f32,
    pub max: f32,
    /// Scale factor per wheel notch or key press.
    pub step: f32,
    /// Exponential easing rate, per second. Zero or less disables easing.
    pub smoothing_rate: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: 1.0,
            min: 0.25,
            max: 64.0,
            step: 1.1,
            smoothing_rate: 12.0,
        }
    }
}

/// Target/applied scale pair driven by input and the frame clock.
#[derive(Debug, Clone)]
pub struct ZoomController {
    config: ZoomConfig,
    target: f32,
    current: f32,
}

impl ZoomController {
    /// Applied scale is considered settled when this close to the target.
    const SETTLE_EPSILON: f32 = 1e-4;

    pub fn new(config: ZoomConfig) -> Self {
        let initial = config.initial.clamp(config.min, config.max);
        Self {
            config,
            target: initial,
            current: initial,
        }
    }

    /// Scale to upload this frame.
    pub fn scale(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Zooms by `notches` steps. Positive values zoom in, which shows fewer,
    /// larger cells and so lowers the scale.
    pub fn zoom_by(&mut self, notches: f32) {
        if notches == 0.0 || !notches.is_finite() {
            return;
        }
        let factor = self.config.step.powf(-notches);
        self.target = (self.target * factor).clamp(self.config.min, self.config.max);
    }

    pub fn reset(&mut self) {
        self.target = self.config.initial.clamp(self.config.min, self.config.max);
    }

    /// Eases the applied scale toward the target over `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.config.smoothing_rate <= 0.0 {
            self.current = self.target;
            return;
        }

        let alpha = 1.0 - (-self.config.smoothing_rate * dt.max(0.0)).exp();
        self.current += (self.target - self.current) * alpha;

        if (self.target - self.current).abs() <= Self::SETTLE_EPSILON * self.target {
            self.current = self.target;
        }
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
