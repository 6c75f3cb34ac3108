//! domkit Events
//!
//! A listener registry that remembers what it attached so it can detach
//! by target, name, `.namespace`, handler or capture flag, and a touch-tap
//! gesture built on plain touch events.

mod sink;
mod touch;

pub use sink::{EventsSink, SinkFilter};
pub use touch::{DEFAULT_TAP_DISTANCE, TouchTapBinding, TouchTapOptions, bind_touch_tap};
