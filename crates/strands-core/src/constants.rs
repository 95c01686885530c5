//! Default simulation and rendering tuning.
//!
//! These express intended behavior (rest lengths, time windows, clamp limits)
//! and keep magic numbers out of the simulation code. `SimConfig::default()`
//! is built entirely from them.
use std::time::Duration;

// Bundle shape
pub const THREAD_COUNT: usize = 42;
pub const SEGMENT_COUNT: usize = 28; // points per thread, upper bound
pub const MIN_SEGMENTS: usize = 16; // points per thread, lower bound
pub const SEGMENT_LENGTH: f32 = 9.0; // rest distance between neighbours (css px)

// Hard caps on init-time overrides
pub const MAX_THREADS: usize = 1024;
pub const MAX_SEGMENTS: usize = 256;
pub const MAX_CONSTRAINT_ITERATIONS: usize = 64;

// Head dynamics
pub const FOLLOW_STRENGTH: f32 = 0.035;
pub const DAMPING: f32 = 0.88; // velocity multiplier per tick
pub const MAX_SPEED: f32 = 26.0; // css px per tick
pub const NOISE: f32 = 0.35; // uniform jitter amplitude added to head velocity

// Body dynamics
pub const PROPAGATION: f32 = 0.22; // blend of a point's velocity toward its predecessor
pub const REST_STIFFNESS: f32 = 0.0; // 0 disables spring-to-rest
pub const CONSTRAINT_ITERATIONS: usize = 6;

// Bundle spread around the shared target
pub const BUNDLE_RADIUS: f32 = 70.0;
pub const BOUNDS_MARGIN: f32 = 240.0; // how far past the viewport a head may wander

// Speed-driven pinch
pub const SPEED_SMOOTHING: f32 = 0.12; // EMA weight of the newest pointer speed sample
pub const PINCH_SENSITIVITY: f32 = 30.0; // smoothed speed (px/tick) that fully pinches
pub const MIN_SPREAD: f32 = 0.12; // spread factor at full pinch
pub const SPREAD_SMOOTHING: f32 = 0.06;

// Idle spreading
pub const IDLE_THRESHOLD: Duration = Duration::from_millis(1500);
pub const IDLE_RAMP: Duration = Duration::from_millis(2500);
pub const IDLE_DRIFT_STRENGTH: f32 = 0.45; // css px per tick at a full ramp

// Stroke appearance
pub const BASE_WIDTH_MIN: f32 = 0.8;
pub const BASE_WIDTH_MAX: f32 = 2.2;
pub const HUE_MIN: f32 = 190.0; // degrees
pub const HUE_MAX: f32 = 290.0;
pub const SATURATION: f32 = 0.75;
pub const LIGHTNESS: f32 = 0.62;
pub const BASE_ALPHA: f32 = 0.85;
pub const TIP_FADE_SEGMENTS: usize = 4;

// Compositing
pub const BACKGROUND_RGB: [f32; 3] = [0.02, 0.03, 0.07];
pub const FADE_AMOUNT: f32 = 0.22; // alpha removed from the previous frame each tick

// Lighting
pub const LIGHT_DIR: [f32; 2] = [-0.6, -0.8]; // unit vector, up-left
pub const VIEW_DIR: [f32; 2] = [0.0, -1.0];
pub const AMBIENT: f32 = 0.45;
pub const DIFFUSE: f32 = 0.55;
pub const SPECULAR: f32 = 0.6;

// Depth tiers: (weight, opacity, width scale, specular exponent)
pub const DEPTH_TIERS: [(f32, f32, f32, f32); 3] = [
    (0.25, 0.35, 0.7, 4.0),  // far
    (0.50, 0.70, 1.0, 12.0), // middle
    (0.25, 1.00, 1.4, 32.0), // near
];

// Numerical guard for any division by a distance
pub const MIN_DISTANCE: f32 = 1e-6;
