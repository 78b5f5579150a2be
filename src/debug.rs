use crate::drawing::{Drawable, SheetDrawingConfig};
use image::DynamicImage;

use super::*;
/// Saves a copy of the sheet with the planned grid drawn on it.
///
/// This function draws the cell boundaries and the outline of every occupied
/// slot on a copy of the sheet and saves the result to the specified path,
/// so a layout can be checked before any icon is written.
///
/// # Arguments
/// * `image` - The sheet image.
/// * `plan` - The plan to draw.
/// * `output_path` - The path to save the preview image.
/// * `config` - The drawing configuration.
///
/// # Errors
/// Returns [`SplitError`] if saving fails.
///
/// # Examples
///
/// ```no_run
/// use iconsplit::{debug, drawing::SheetDrawingConfig, presets, GridSpec, SheetPlan};
///
/// let sheet = iconsplit::load_sheet("sheet.png").unwrap();
/// let plan = SheetPlan::try_from_image(&sheet, &GridSpec::default(), &presets::plugin_pack()).unwrap();
///
/// debug::save_preview(&sheet, &plan, "preview.png", &SheetDrawingConfig::default()).unwrap();
/// ```
pub fn save_preview(
    image: &DynamicImage,
    plan: &SheetPlan,
    output_path: impl AsRef<Path>,
    config: &SheetDrawingConfig,
) -> Result<(), SplitError> {
    let output_path = output_path.as_ref();
    let mut rgba_img = image.to_rgba8();
    plan.draw(&mut rgba_img, config)?;
    rgba_img
        .save(output_path)
        .map_err(|source| SplitError::PreviewWrite {
            path: output_path.to_path_buf(),
            source,
        })
}
