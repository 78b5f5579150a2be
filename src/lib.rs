//! This crate slices a grid-layout icon sheet into individual plugin icons.
//! It uses the `image` and `imageproc` crates for raster work and `insta` for snapshot testing.

/// Debug module for saving a preview of the sheet with the planned grid drawn on it.
///
/// # Example
/// ```no_run
/// use iconsplit::{debug, drawing::SheetDrawingConfig, presets, GridSpec, SheetPlan};
///
/// let sheet = iconsplit::load_sheet("sheet.png").unwrap();
/// let plan = SheetPlan::try_from_image(&sheet, &GridSpec::default(), &presets::plugin_pack()).unwrap();
///
/// debug::save_preview(&sheet, &plan, "preview.png", &SheetDrawingConfig::default()).unwrap();
/// ```
pub mod debug;
/// This module provides functionality for drawing cell boundaries and planned
/// slot outlines on a copy of the sheet, so a grid layout can be checked
/// against the artwork before anything is sliced.
pub mod drawing;
/// Embedded slot tables for the icon sheets this repository ships.
pub mod presets;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::*;
use imageproc::rect::Rect;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::*;

// A 4x4 sheet is the common case and fits inline without spilling to the heap
const DEFAULT_SHEET_SLOTS: usize = 16;

/// Default number of grid rows when the caller does not override it.
pub const DEFAULT_GRID_ROWS: u32 = 4;
/// Default number of grid columns when the caller does not override it.
pub const DEFAULT_GRID_COLS: u32 = 4;
/// Default output resolution for saved icons, in pixels per side.
pub const DEFAULT_TARGET_SIZE: u32 = 512;
/// Default directory the per-plugin folders are created under.
pub const DEFAULT_OUTPUT_ROOT: &str = "plugins";
/// Directory created under each plugin folder to hold its icon.
pub const ASSETS_DIR: &str = "assets";
/// File name every icon is written under.
pub const ICON_FILE_NAME: &str = "icon.png";

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to read sheet image {}: {source}", .path.display())]
    SheetRead { path: PathBuf, source: ImageError },

    #[error("Invalid grid: rows={rows}, cols={cols} (both must be at least 1)")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("Grid {rows}x{cols} is finer than the {width}x{height} sheet")]
    CellTooSmall {
        rows: u32,
        cols: u32,
        width: u32,
        height: u32,
    },

    #[error("Duplicate identifier {id} in the slot table")]
    DuplicateIdentifier { id: Identifier },

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write icon {}: {source}", .path.display())]
    IconWrite { path: PathBuf, source: ImageError },

    #[error("Failed to write preview {}: {source}", .path.display())]
    PreviewWrite { path: PathBuf, source: ImageError },
}

/// A type alias for SmallVec sized so a whole default sheet stays on the stack.
pub type SheetVec<T> = SmallVec<[T; DEFAULT_SHEET_SLOTS]>;

/// One entry of the assignment table: the identifier to write the cell under,
/// or `None` for a slot that holds no artwork.
pub type Slot = Option<Identifier>;

/// The ordered assignment table, indexed by row-major slot position.
pub type SlotTable = SheetVec<Slot>;

/// Grid geometry of a sheet: how many rows and columns of equal-size cells it holds.
///
/// # Example
/// ```
/// use iconsplit::GridSpec;
///
/// let spec = GridSpec::default();
/// assert_eq!(spec.rows, 4);
/// assert_eq!(spec.cols, 4);
/// assert_eq!(spec.cell_size(1024, 1024).unwrap(), (256, 256));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

impl GridSpec {
    /// Creates a new `GridSpec` with the given row and column counts.
    ///
    /// # Example
    /// ```
    /// use iconsplit::GridSpec;
    ///
    /// let spec = GridSpec::new(2, 8);
    /// assert_eq!(spec.slot_count(), 16);
    /// ```
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Computes the cell size in pixels for a sheet of the given dimensions.
    ///
    /// Integer division: remainder pixels along the right and bottom edges
    /// belong to no cell and are never sliced.
    ///
    /// # Errors
    /// [`SplitError::EmptyGrid`] when a count is zero, and
    /// [`SplitError::CellTooSmall`] when the grid is finer than the sheet.
    ///
    /// # Example
    /// ```
    /// use iconsplit::GridSpec;
    ///
    /// assert_eq!(GridSpec::new(4, 4).cell_size(2048, 2048).unwrap(), (512, 512));
    /// assert!(GridSpec::new(4, 4).cell_size(3, 2048).is_err());
    /// ```
    pub fn cell_size(&self, width: u32, height: u32) -> Result<(u32, u32), SplitError> {
        if self.rows == 0 || self.cols == 0 {
            error!("Invalid grid: rows={}, cols={}", self.rows, self.cols);
            return Err(SplitError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let cell_width = width / self.cols;
        let cell_height = height / self.rows;
        if cell_width == 0 || cell_height == 0 {
            error!(
                "Grid {}x{} is finer than the {}x{} sheet",
                self.rows, self.cols, width, height
            );
            return Err(SplitError::CellTooSmall {
                rows: self.rows,
                cols: self.cols,
                width,
                height,
            });
        }
        Ok((cell_width, cell_height))
    }

    /// Total number of slots in the grid, in row-major order.
    pub fn slot_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLS)
    }
}

/// The `(category, name)` pair an icon is filed under.
///
/// # Example
/// ```
/// use iconsplit::Identifier;
/// use std::path::PathBuf;
///
/// let id = Identifier::new("themes", "mint-fresh");
/// assert_eq!(id.to_string(), "themes/mint-fresh");
/// assert_eq!(id.asset_path(), PathBuf::from("themes/mint-fresh/assets/icon.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identifier {
    pub category: String,
    pub name: String,
}

impl Identifier {
    /// Creates a new `Identifier` from a category and a plugin name.
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Output path relative to the output root:
    /// `<category>/<name>/assets/icon.png`.
    pub fn asset_path(&self) -> PathBuf {
        [
            self.category.as_str(),
            self.name.as_str(),
            ASSETS_DIR,
            ICON_FILE_NAME,
        ]
        .iter()
        .collect()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Pixel rectangle of one grid cell within the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&CellRect> for Rect {
    fn from(rect: &CellRect) -> Self {
        Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height)
    }
}

/// One planned crop: which slot it came from, where its pixels live in the
/// sheet, and which identifier it will be written under.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IconJob {
    /// Linear slot index, `row * cols + col`.
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub rect: CellRect,
    pub id: Identifier,
}

impl IconJob {
    /// Output path relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        self.id.asset_path()
    }
}

/// The full slicing plan for one sheet: validated cell geometry plus one
/// [`IconJob`] per occupied slot, in row-major order.
///
/// Planning is pure geometry. Nothing is read from or written to disk until
/// the plan is handed to [`write_icons`].
///
/// # Example
/// ```
/// use iconsplit::{slots, GridSpec, SheetPlan};
///
/// let table = slots![("themes", "nordic-frost"), _, ("engines", "graalvm-engine")];
/// let plan = SheetPlan::try_from_dimensions(1024, 1024, &GridSpec::new(4, 4), &table).unwrap();
///
/// assert_eq!(plan.cell_width, 256);
/// assert_eq!(plan.icon_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetPlan {
    pub spec: GridSpec,
    pub cell_width: u32,
    pub cell_height: u32,
    pub icons: SheetVec<IconJob>,
}

impl SheetPlan {
    /// Plans the split for a sheet of the given pixel dimensions.
    ///
    /// Validates the grid geometry and the uniqueness of every identifier in
    /// the table before planning a single crop, so a broken configuration can
    /// never produce partial output.
    ///
    /// Slots are visited in row-major order by absolute index; a `None` entry
    /// is skipped without shifting later assignments. When the table is
    /// shorter than the grid, planning stops at the last table entry and the
    /// remaining slots are left alone. When it is longer, the surplus entries
    /// are ignored with a warning.
    pub fn try_from_dimensions(
        width: u32,
        height: u32,
        spec: &GridSpec,
        table: &[Slot],
    ) -> Result<Self, SplitError> {
        trace!("Planning {}x{} sheet with spec: {:?}", width, height, spec);
        let (cell_width, cell_height) = spec.cell_size(width, height)?;
        validate_unique(table)?;

        let slot_count = spec.slot_count();
        if table.len() > slot_count {
            warn!(
                "Slot table has {} entries but the grid only has {} slots; extra entries are ignored",
                table.len(),
                slot_count
            );
        }

        let mut icons = SheetVec::new();
        for index in 0..slot_count {
            let Some(slot) = table.get(index) else {
                debug!(
                    "Slot table exhausted after {} of {} slots",
                    index, slot_count
                );
                break;
            };
            let Some(id) = slot else { continue };

            let row = (index / spec.cols as usize) as u32;
            let col = (index % spec.cols as usize) as u32;
            icons.push(IconJob {
                index,
                row,
                col,
                rect: CellRect {
                    x: col * cell_width,
                    y: row * cell_height,
                    width: cell_width,
                    height: cell_height,
                },
                id: id.clone(),
            });
        }

        debug!(
            "Planned {} icons with {}x{} cells",
            icons.len(),
            cell_width,
            cell_height
        );
        Ok(SheetPlan {
            spec: *spec,
            cell_width,
            cell_height,
            icons,
        })
    }

    /// Plans the split for a decoded sheet image.
    ///
    /// # Example
    /// ```
    /// use iconsplit::{slots, GridSpec, SheetPlan};
    /// use image::{DynamicImage, RgbaImage};
    ///
    /// let sheet = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));
    /// let table = slots![("tts", "piper-tts")];
    /// let plan = SheetPlan::try_from_image(&sheet, &GridSpec::new(4, 4), &table).unwrap();
    ///
    /// assert_eq!(plan.cell_height, 16);
    /// ```
    pub fn try_from_image(
        image: &DynamicImage,
        spec: &GridSpec,
        table: &[Slot],
    ) -> Result<Self, SplitError> {
        let (width, height) = image.dimensions();
        Self::try_from_dimensions(width, height, spec, table)
    }

    /// Returns an iterator over the planned icons, in row-major slot order.
    pub fn icons(&self) -> impl Iterator<Item = &IconJob> {
        self.icons.iter()
    }

    /// Number of icons the plan will write.
    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    /// `true` when no slot in range carried an identifier.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Where and how large the icons are written.
///
/// # Example
/// ```
/// use iconsplit::SplitOptions;
///
/// let options = SplitOptions::default();
/// assert_eq!(options.target_size, 512);
/// assert_eq!(options.output_root.to_str(), Some("plugins"));
/// ```
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Directory the per-plugin folders are created under.
    pub output_root: PathBuf,
    /// Side length every icon is resampled to, in pixels.
    pub target_size: u32,
}

impl SplitOptions {
    /// Creates new `SplitOptions` with the given output root and icon size.
    pub fn new(output_root: impl Into<PathBuf>, target_size: u32) -> Self {
        Self {
            output_root: output_root.into(),
            target_size: target_size.max(1), // Minimum output resolution
        }
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions::new(DEFAULT_OUTPUT_ROOT, DEFAULT_TARGET_SIZE)
    }
}

/// What a run actually wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SplitReport {
    /// Paths of the icons written, in row-major slot order.
    pub outputs: SheetVec<PathBuf>,
}

impl SplitReport {
    /// Number of icons written.
    pub fn written(&self) -> usize {
        self.outputs.len()
    }
}

/// Crops one cell out of the sheet and resamples it to a square icon.
///
/// Lanczos3 keeps the artwork crisp; `resize_exact` forces the output to
/// `target_size` per side even when the cell is not square.
///
/// # Example
/// ```
/// use iconsplit::{render_icon, CellRect};
/// use image::{DynamicImage, GenericImageView, RgbaImage};
///
/// let sheet = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));
/// let rect = CellRect { x: 0, y: 0, width: 16, height: 16 };
/// assert_eq!(render_icon(&sheet, &rect, 32).dimensions(), (32, 32));
/// ```
pub fn render_icon(image: &DynamicImage, rect: &CellRect, target_size: u32) -> DynamicImage {
    image
        .crop_imm(rect.x, rect.y, rect.width, rect.height)
        .resize_exact(target_size, target_size, imageops::FilterType::Lanczos3)
}

/// Writes every planned icon under the output root as a PNG, creating missing
/// parent directories and silently overwriting earlier output.
///
/// Icons are written one at a time in row-major slot order, and the first
/// failure aborts the run.
///
/// # Example
/// ```no_run
/// use iconsplit::{presets, write_icons, GridSpec, SheetPlan, SplitOptions};
///
/// let sheet = iconsplit::load_sheet("sheet.png").unwrap();
/// let plan = SheetPlan::try_from_image(&sheet, &GridSpec::default(), &presets::plugin_pack()).unwrap();
/// let report = write_icons(&sheet, &plan, &SplitOptions::default()).unwrap();
///
/// println!("{} icons written", report.written());
/// ```
pub fn write_icons(
    image: &DynamicImage,
    plan: &SheetPlan,
    options: &SplitOptions,
) -> Result<SplitReport, SplitError> {
    trace!(
        "Writing {} icons under {}",
        plan.icon_count(),
        options.output_root.display()
    );
    let mut outputs = SheetVec::new();
    for job in plan.icons() {
        let icon = render_icon(image, &job.rect, options.target_size);
        let path = options.output_root.join(job.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SplitError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        icon.save(&path).map_err(|source| SplitError::IconWrite {
            path: path.clone(),
            source,
        })?;
        info!("Saved {} -> {}", job.id, path.display());
        outputs.push(path);
    }
    Ok(SplitReport { outputs })
}

/// Plans and writes in one call: the whole crop, resample, save pipeline for
/// one sheet.
///
/// # Example
/// ```no_run
/// use iconsplit::{slots, split_sheet, GridSpec, SplitOptions};
///
/// let sheet = iconsplit::load_sheet("sheet.png").unwrap();
/// let table = slots![("themes", "nordic-frost"), ("themes", "sakura-night")];
/// let report = split_sheet(&sheet, &GridSpec::default(), &table, &SplitOptions::default()).unwrap();
///
/// assert_eq!(report.written(), 2);
/// ```
pub fn split_sheet(
    image: &DynamicImage,
    spec: &GridSpec,
    table: &[Slot],
    options: &SplitOptions,
) -> Result<SplitReport, SplitError> {
    let plan = SheetPlan::try_from_image(image, spec, table)?;
    write_icons(image, &plan, options)
}

/// Decodes the sheet image from disk.
///
/// The sheet is decoded once and treated as read-only for the whole run; a
/// missing or undecodable file fails here, before any slot is processed.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<DynamicImage, SplitError> {
    let path = path.as_ref();
    image::open(path).map_err(|source| SplitError::SheetRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Rejects tables that would write two icons to the same path.
fn validate_unique(table: &[Slot]) -> Result<(), SplitError> {
    let mut seen = HashSet::new();
    for id in table.iter().flatten() {
        if !seen.insert((id.category.as_str(), id.name.as_str())) {
            error!("Duplicate identifier {} in the slot table", id);
            return Err(SplitError::DuplicateIdentifier { id: id.clone() });
        }
    }
    Ok(())
}

/// Creates a single [`Slot`] from a `(category, name)` pair or `_`.
///
/// Used internally by [`slots!`]; handy on its own when building a table one
/// entry at a time.
///
/// # Example
/// ```
/// use iconsplit::{slot, Slot};
///
/// let occupied: Slot = slot!(("themes", "mint-fresh"));
/// assert!(occupied.is_some());
///
/// let empty: Slot = slot!(_);
/// assert!(empty.is_none());
/// ```
#[macro_export]
macro_rules! slot {
    (_) => {
        $crate::Slot::None
    };
    (($category:expr, $name:expr)) => {
        $crate::Slot::Some($crate::Identifier::new($category, $name))
    };
}

/// Creates a [`SlotTable`] from a row-major list of slots.
///
/// Each entry is either a `(category, name)` pair or `_` for an empty slot,
/// so a table reads exactly like the sheet it describes.
///
/// # Example
/// ```
/// use iconsplit::{slots, SlotTable};
///
/// let table: SlotTable = slots![
///     ("themes", "nordic-frost"),
///     ("themes", "sakura-night"),
///     _,
///     ("engines", "graalvm-engine"),
/// ];
///
/// assert_eq!(table.len(), 4);
/// assert!(table[2].is_none());
/// ```
#[macro_export]
macro_rules! slots {
    ($($slot:tt),* $(,)?) => {
        $crate::SlotTable::from_vec(vec![$($crate::slot!($slot)),*])
    };
}
