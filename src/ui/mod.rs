//! UI module - shared widgets and the view error boundary

pub mod boundary;
pub mod components;
