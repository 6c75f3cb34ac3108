//! domkit CSS helpers
//!
//! Reading and writing CSS properties, element box metrics under an
//! inclusion policy, document offsets, anchored positions and transition
//! parsing.

mod box_metrics;
mod position;
mod props;
mod transition;
mod value;

pub use box_metrics::{
    Axis, AxisMetrics, BoxSizing, InclusionPolicy, SizeTarget, element_size, get_element_height,
    get_element_width, get_pseudo_element_height, get_pseudo_element_width, set_element_height,
    set_element_size, set_element_width,
};
pub use position::{
    AnchorSpec, AnchoredPosition, BoxSize, ElementOffset, anchored_position, get_element_offset,
};
pub use props::{CssValue, get_css_props, set_css_props};
pub use transition::{
    Transition, is_time_string, parse_single_transition, parse_transition, time_to_ms,
};
pub use value::{css_px, parse_float};
