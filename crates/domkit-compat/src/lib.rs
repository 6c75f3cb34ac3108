//! domkit DOM Compatibility Helpers
//!
//! Element creation with attribute shorthands, selector-driven traversal,
//! ChildNode/ParentNode style insertion, scoped selectors and class
//! toggling, all behaving the same on every platform profile.

mod create;
mod insert;
mod scoped;
mod traverse;

pub use create::{AttrValue, create_element, set_element_attrs};
pub use insert::{Insertable, after, append, before, prepend, remove, toggle_class, unwrap_children};
pub use scoped::{has_scoped_selector, scoped_selector, scoped_selector_all};
pub use traverse::{closest, closest_until, get_root_node, next, prev};
