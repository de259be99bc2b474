//! Time-based value animations
//!
//! Pure functions of elapsed time: a tween with delay and easing, an infinitely
//! repeating rotation, and a spring that chases a target. Hosts sample them once
//! per frame and apply the result to whatever they draw.

use serde::{Deserialize, Serialize};

/// Easing curves applied to a linear fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// cubic-bezier(0.4, 0.0, 0.2, 1.0)
    #[default]
    FastOutSlowIn,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// y on the curve through (0,0), (x1,y1), (x2,y2), (1,1) at the given x
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let derivative = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton first, bisection if it stalls
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..24 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Fixed-duration interpolation, optionally delayed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300)
    }
}

impl TweenSpec {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing: Easing::FastOutSlowIn,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> u64 {
        self.delay_ms + self.duration_ms
    }

    /// Value `elapsed_ms` after the tween started (delay included)
    pub fn value_at(&self, from: f32, to: f32, elapsed_ms: u64) -> f32 {
        if elapsed_ms <= self.delay_ms {
            return from;
        }
        if self.duration_ms == 0 {
            return to;
        }
        let played = (elapsed_ms - self.delay_ms).min(self.duration_ms);
        let fraction = self.easing.transform(played as f32 / self.duration_ms as f32);
        from + (to - from) * fraction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Jump back to the initial value each iteration
    #[default]
    Restart,
    /// Play every other iteration backwards
    Reverse,
}

/// A tween between two values repeated forever; each iteration replays the delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfiniteRepeat {
    pub initial: f32,
    pub target: f32,
    pub spec: TweenSpec,
    pub mode: RepeatMode,
}

impl InfiniteRepeat {
    /// Full turn in 1s after a 1s pause, restarting at 0°
    pub fn rotation() -> Self {
        Self {
            initial: 0.0,
            target: 360.0,
            spec: TweenSpec::new(1000).with_delay(1000),
            mode: RepeatMode::Restart,
        }
    }

    /// Value `elapsed_ms` after the animation was first sampled
    pub fn value_at(&self, elapsed_ms: u64) -> f32 {
        let period = self.spec.total_ms();
        if period == 0 {
            return self.target;
        }
        let iteration = elapsed_ms / period;
        let within = elapsed_ms % period;
        match self.mode {
            RepeatMode::Reverse if iteration % 2 == 1 => {
                self.spec.value_at(self.target, self.initial, within)
            }
            _ => self.spec.value_at(self.initial, self.target, within),
        }
    }
}

/// Spring parameters; the default matches a critically damped medium spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSpec {
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Distance and speed below which the value snaps to the target
    pub visibility_threshold: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            visibility_threshold: 0.01,
        }
    }
}

/// Integration step for the spring (~60 fps)
const SPRING_STEP_S: f32 = 0.016;

/// A float that springs toward its latest target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedFloat {
    value: f32,
    velocity: f32,
    target: f32,
    spec: SpringSpec,
}

impl AnimatedFloat {
    pub fn new(value: f32) -> Self {
        Self::with_spec(value, SpringSpec::default())
    }

    pub fn with_spec(value: f32, spec: SpringSpec) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            spec,
        }
    }

    /// Retarget; current velocity carries over
    pub fn animate_to(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to `target` and stop
    pub fn snap_to(&mut self, target: f32) {
        self.value = target;
        self.target = target;
        self.velocity = 0.0;
    }

    /// Advance the spring by `dt_ms` and return the new value
    pub fn advance(&mut self, dt_ms: u64) -> f32 {
        if !self.is_running() {
            return self.value;
        }
        let stiffness = self.spec.stiffness;
        let damping = 2.0 * self.spec.damping_ratio * stiffness.sqrt();

        let dt = dt_ms as f32 / 1000.0;
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = SPRING_STEP_S.min(dt - simulated);
            let displacement = self.value - self.target;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.value += self.velocity * step;
            simulated += step;
        }

        let threshold = self.spec.visibility_threshold;
        if (self.value - self.target).abs() < threshold && self.velocity.abs() < threshold {
            self.snap_to(self.target);
        }
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.value != self.target || self.velocity != 0.0
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Corner radius and scale of a square that rounds into a circle while pressed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressTransform {
    pressed: bool,
    corner_radius: AnimatedFloat,
    scale: AnimatedFloat,
}

impl Default for PressTransform {
    fn default() -> Self {
        Self {
            pressed: false,
            corner_radius: AnimatedFloat::new(Self::CORNER_RELEASED),
            scale: AnimatedFloat::new(Self::SCALE_RELEASED),
        }
    }
}

impl PressTransform {
    pub const CORNER_RELEASED: f32 = 0.0;
    pub const CORNER_PRESSED: f32 = 100.0;
    pub const SCALE_RELEASED: f32 = 1.0;
    pub const SCALE_PRESSED: f32 = 0.5;

    pub fn set_pressed(&mut self, pressed: bool) {
        if pressed == self.pressed {
            return;
        }
        self.pressed = pressed;
        let (corner, scale) = if pressed {
            (Self::CORNER_PRESSED, Self::SCALE_PRESSED)
        } else {
            (Self::CORNER_RELEASED, Self::SCALE_RELEASED)
        };
        self.corner_radius.animate_to(corner);
        self.scale.animate_to(scale);
        log::debug!("press transform -> pressed={pressed}");
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.corner_radius.advance(dt_ms);
        self.scale.advance(dt_ms);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_running(&self) -> bool {
        self.corner_radius.is_running() || self.scale.is_running()
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius.value()
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }
}
