//! Image gating, loading, fitting, and saving utilities.

mod fit;
mod format;
mod load;
mod save;

pub use fit::{fit_dimensions, fit_image, FitPlan};
pub use format::SupportedFormat;
pub use load::{decode_image, is_palette_encoded, load_image, normalize_color};
pub use save::{derive_output_path, encode_png, save_png};

/// Side length of the square output canvas.
pub const CANVAS_SIZE: u32 = 512;

/// Appended to the source file stem to build the output file name.
pub const OUTPUT_SUFFIX: &str = "_nuevo";
