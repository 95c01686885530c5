use thiserror::Error;

use crate::driver::LoopState;

/// Errors raised while configuring or driving the animation.
///
/// None of these occur in steady state; they guard construction and the loop
/// lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrandsError {
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("cannot move loop from {from:?} to {to:?}")]
    InvalidTransition { from: LoopState, to: LoopState },
}

pub type Result<T> = std::result::Result<T, StrandsError>;
