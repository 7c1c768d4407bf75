//! Color palettes for hazard visualization.
//!
//! Palettes interpolate in linear light between a "visible" low color and a
//! "hazardous" high color; gamma encoding happens once at output. The high
//! color is red in every palette so that danger reads the same across
//! choices, and overlay colors (mask, background) avoid red entirely.

/// Linear-light RGB color.
pub type Color = [f32; 3];

/// Background for pixels with no hazard reading or outside the region of
/// interest.
pub const BACKGROUND_COLOR: Color = [0.0, 0.0, 0.0];

/// Masked pixels away from any geometric boundary.
pub const MASK_COLOR: Color = [0.0, 0.0, 1.0];

/// Masked pixels on or next to a geometric boundary. Flags boundary readings
/// that the mask is suppressing.
pub const MASK_BOUNDARY_COLOR: Color = [1.0, 1.0, 0.0];

/// Low-to-red color ramp for hazard levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Gray to red. Neutral at the visible end, reads in grayscale print.
    #[default]
    RedGray,
    /// Green to red. The conventional safe/danger coding.
    RedGreen,
    /// Cyan to red. Used for false-positive fields so they cannot be
    /// mistaken for the main hazard rendering.
    GrayCyan,
}

impl Palette {
    /// Color at hazard level 0.
    pub fn low(&self) -> Color {
        match self {
            Self::RedGray => [0.5, 0.5, 0.5],
            Self::RedGreen => [0.0, 1.0, 0.0],
            Self::GrayCyan => [0.0, 1.0, 1.0],
        }
    }

    /// Color at hazard level 1. Red for every palette.
    pub fn high(&self) -> Color {
        [1.0, 0.0, 0.0]
    }

    /// Linear interpolation between the low and high colors.
    ///
    /// `level` is clamped to `[0, 1]` first.
    ///
    /// # Example
    /// ```
    /// use hazvis_field::Palette;
    ///
    /// let palette = Palette::RedGreen;
    /// assert_eq!(palette.blend(0.0), [0.0, 1.0, 0.0]);
    /// assert_eq!(palette.blend(1.0), [1.0, 0.0, 0.0]);
    /// assert_eq!(palette.blend(0.5), [0.5, 0.5, 0.0]);
    /// ```
    pub fn blend(&self, level: f32) -> Color {
        let t = level.clamp(0.0, 1.0);
        let low = self.low();
        let high = self.high();
        [
            low[0] + (high[0] - low[0]) * t,
            low[1] + (high[1] - low[1]) * t,
            low[2] + (high[2] - low[2]) * t,
        ]
    }
}
