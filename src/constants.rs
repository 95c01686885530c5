// DOM wiring constants for the web frontend.

// Element ids
pub const CANVAS_ID: &str = "strands-canvas"; // auto-mounted at module start when present
pub const FPS_ELEMENT_ID: &str = "strands-fps"; // optional diagnostic readout

// Backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // caps fill cost on dense displays
pub const MIN_BACKING_PX: u32 = 1;

// Init-time overrides read from canvas data attributes
pub const ATTR_THREADS: &str = "data-threads";
pub const ATTR_SEGMENTS: &str = "data-segments";
pub const ATTR_MIN_SEGMENTS: &str = "data-min-segments";
pub const ATTR_SEGMENT_LENGTH: &str = "data-segment-length";
pub const ATTR_ITERATIONS: &str = "data-iterations";
pub const ATTR_ANCHORED: &str = "data-anchored";
pub const ATTR_TRAILS: &str = "data-trails";
pub const ATTR_LIGHTING: &str = "data-lighting";
pub const ATTR_SMOOTH: &str = "data-smooth";
pub const ATTR_SEED: &str = "data-seed";

// FPS readout only rewrites the element when the value moves this much
pub const FPS_DISPLAY_STEP: f32 = 0.5;
