//! Export surfaces: PNG encoding and single-slot parameter presets.

pub mod png;
pub mod preset;
