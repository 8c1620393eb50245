//! Categorical color maps.

use super::color::Rgba;

/// The ten `tab10` categorical colors, in order.
pub const TAB10: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

/// A listed color map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Tab10,
}

impl Colormap {
    pub fn colors(self) -> Vec<Rgba> {
        match self {
            Colormap::Tab10 => TAB10
                .iter()
                .map(|&(r, g, b)| Rgba::from_rgb8(r, g, b))
                .collect(),
        }
    }
}

/// Sample `n` evenly spaced colors from a listed color map.
///
/// Position `i / (n - 1)` maps to entry `floor(pos · len)`, clamped to the
/// last entry. For `n == len` this returns the map itself.
pub fn sample_colormap(cmap: Colormap, n: usize) -> Vec<Rgba> {
    let colors = cmap.colors();
    let len = colors.len();
    (0..n)
        .map(|i| {
            let pos = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            colors[((pos * len as f64) as usize).min(len - 1)]
        })
        .collect()
}
