//! Prelude for the filters crate.
//!
//! ```
//! use robodrive_filters::prelude::*;
//!
//! let mut state = SteeringState::default();
//! let mut frame = ControlFrame::from_intention(1.0, 0.0, 0.0).with_context(0.0, 0.02, 0.0);
//! steering_filter(&mut frame, &mut state);
//! ```

pub use crate::ControlFrame;
pub use crate::pedal::{PedalConfig, PedalState, RiseLimiter, pedal_filter};
pub use crate::state::FilterState;
pub use crate::steering::{SteeringConfig, SteeringState, steering_filter};
