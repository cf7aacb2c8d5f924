//! Common utilities for the Wren renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning log** - de-duplicated, colored stderr output for recovered conditions
//! - **Images** - the decoded RGBA image handed from decoders to layout and paint
//! - **Data URLs** - inline `data:` resources referenced from markup

pub mod data_url;
pub mod image;
pub mod warning;
