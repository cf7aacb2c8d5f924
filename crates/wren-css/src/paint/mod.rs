//! CSS Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! This module implements the painting phase, which converts a laid-out box
//! tree into a display list of drawing commands. The display list is then
//! executed against any [`DrawingSurface`].
//!
//! ```text
//! Style → Layout → Paint → Surface
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;
mod surface;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
pub use surface::DrawingSurface;
