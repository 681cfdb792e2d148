//! Strip reduction.
//!
//! This module turns one decoded [`Frame`](crate::source::Frame) into one
//! narrow [`Strip`]. Two interchangeable policies exist: squeezing the whole
//! frame down to the bar width, or collapsing it to a single flat color.
//! Both produce strips of identical shape so the assembler can concatenate
//! them uniformly.

mod policy;
mod strip;

pub use policy::{BarPolicy, UnknownPolicy};
pub use strip::Strip;
