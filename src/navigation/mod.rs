//! Scale-level navigation.
//!
//! [`controller`] holds the state machine, [`tables`] the per-level rules it
//! consults on hover and click.

pub mod controller;
pub mod tables;

pub use controller::{Highlight, NavigationController, NavigationState};
pub use tables::{dispatch_click, hover_eligible, ClickAction};
