//! This module provides functionality for drawing cell boundaries and planned
//! slot outlines on a copy of the sheet.
//!
//! The main components of this module are:
//! - [`SheetDrawingConfig`]: Configuration for customizing the appearance of grid lines and slot outlines.
//! - [`Drawable`]: A trait implemented by types that can be drawn on an image, such as [`IconJob`] and [`SheetPlan`].
//!
//! # Examples
//!
//! ```rust
//! use iconsplit::{slots, drawing::*, GridSpec, SheetPlan};
//! use image::RgbaImage;
//!
//! let table = slots![("themes", "nordic-frost"), _, _, ("tts", "piper-tts")];
//! let plan = SheetPlan::try_from_dimensions(64, 64, &GridSpec::new(2, 2), &table).unwrap();
//!
//! let mut canvas = RgbaImage::new(64, 64);
//! plan.draw(&mut canvas, &SheetDrawingConfig::default()).unwrap();
//! ```

use crate::*;
use image::*;
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Configuration for drawing the planned grid onto a sheet.
///
/// # Examples
///
/// ```
/// use iconsplit::drawing::SheetDrawingConfig;
/// use image::Rgba;
///
/// let config = SheetDrawingConfig {
///     grid_color: Rgba([255, 0, 0, 255]), // Red for cell boundaries
///     cell_color: Rgba([0, 0, 255, 255]), // Blue for occupied slots
///     line_thickness: 1,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SheetDrawingConfig {
    /// Color of the cell boundary lines.
    pub grid_color: Rgba<u8>,
    /// Color of the outline drawn around each occupied slot.
    pub cell_color: Rgba<u8>,
    /// Thickness of boundary lines and outlines, in pixels.
    pub line_thickness: u32,
}

impl Default for SheetDrawingConfig {
    fn default() -> Self {
        SheetDrawingConfig {
            grid_color: Rgba([0, 0, 255, 255]), // Blue
            cell_color: Rgba([0, 255, 0, 255]), // Green
            line_thickness: 2,
        }
    }
}

/// Trait for types that can be drawn on an image.
///
/// This trait is implemented for [`IconJob`] and [`SheetPlan`].
pub trait Drawable {
    /// Draws the object on the provided image using the given configuration.
    ///
    /// # Arguments
    /// * `image` - The image to draw on.
    /// * `config` - The drawing configuration.
    ///
    /// # Errors
    /// Returns [`SplitError`] if drawing fails.
    fn draw(&self, image: &mut RgbaImage, config: &SheetDrawingConfig) -> Result<(), SplitError>;
}

impl Drawable for IconJob {
    fn draw(&self, image: &mut RgbaImage, config: &SheetDrawingConfig) -> Result<(), SplitError> {
        draw_cell_outline(image, &self.rect, config.cell_color, config.line_thickness);
        Ok(())
    }
}

impl Drawable for SheetPlan {
    fn draw(&self, image: &mut RgbaImage, config: &SheetDrawingConfig) -> Result<(), SplitError> {
        let width = image.width() as f32;
        let height = image.height() as f32;

        // Draw interior horizontal cell boundaries
        for row in 1..self.spec.rows {
            let y = row * self.cell_height;
            for offset in 0..config.line_thickness {
                let y = (y + offset) as f32;
                draw_line_segment_mut(image, (0.0, y), (width, y), config.grid_color);
            }
        }

        // Draw interior vertical cell boundaries
        for col in 1..self.spec.cols {
            let x = col * self.cell_width;
            for offset in 0..config.line_thickness {
                let x = (x + offset) as f32;
                draw_line_segment_mut(image, (x, 0.0), (x, height), config.grid_color);
            }
        }

        // Outline the occupied slots on top of the boundaries
        for job in self.icons() {
            job.draw(image, config)?;
        }

        Ok(())
    }
}

/// Draws a hollow rectangle of the given thickness by insetting one pixel per pass.
fn draw_cell_outline(image: &mut RgbaImage, rect: &CellRect, color: Rgba<u8>, thickness: u32) {
    for inset in 0..thickness {
        if rect.width <= 2 * inset || rect.height <= 2 * inset {
            break;
        }
        let ring = CellRect {
            x: rect.x + inset,
            y: rect.y + inset,
            width: rect.width - 2 * inset,
            height: rect.height - 2 * inset,
        };
        draw_hollow_rect_mut(image, Rect::from(&ring), color);
    }
}
