//! Pointer-following thread bundle: simulation, renderer and frame loop state.
//!
//! Platform independent; the web front-end supplies a canvas-backed
//! [`Surface`] and a `requestAnimationFrame`-backed [`FrameScheduler`].

pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod input;
pub mod math;
pub mod render;
pub mod seed;
pub mod sim;
pub mod thread;

pub use color::Rgba;
pub use config::{ClearPolicy, ConstraintMode, DepthTier, IdleConfig, LightingConfig, PinchConfig, RenderConfig, SimConfig};
pub use driver::{CancelToken, FpsCounter, FrameScheduler, LoopDriver, LoopState};
pub use error::StrandsError;
pub use input::{InputTracker, Target};
pub use render::{CommandRecorder, DrawCommand, PathPiece, Renderer, StrokeStyle, Surface};
pub use seed::Viewport;
pub use sim::Simulation;
pub use thread::{Point, Thread, ThreadStyle};
