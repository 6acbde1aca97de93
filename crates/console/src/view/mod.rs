//! Page component state.
//!
//! Each component's state lives in console process memory, mirroring what a
//! browser-side component would hold.

pub mod form;
pub mod list;

pub use form::{Banner, FormView};
pub use list::{ListPhase, ListView};
