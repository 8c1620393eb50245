//! Chart model shared by every display.

pub mod axes;
pub mod color;
pub mod palette;
pub mod style;

pub use axes::{
    Adjustable, Aspect, Axes, Legend, LegendEntry, LegendLocation, LegendPlacement,
    LegendPosition, Line2D, LineHandle, Spines, MAX_INSIDE_LEGEND_ENTRIES,
};
pub use color::{Color, Rgba};
pub use palette::{sample_colormap, Colormap, TAB10};
pub use style::{DrawStyle, LineKind, LineStyle};
