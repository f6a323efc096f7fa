//! Export core modules shared across front ends.

pub mod pdf_core;
pub mod text_core;
