//! Writing the finished drawing to disk.

use crate::draw::{Canvas, CanvasError};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Filename template used when no output path is given.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "gesso_%Y-%m-%d_%H%M%S";

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Timestamped PNG path in `directory`.
pub fn default_output_path(directory: &Path) -> PathBuf {
    directory.join(generate_filename(DEFAULT_FILENAME_TEMPLATE, "png"))
}

/// Saves the composited canvas as PNG at `path`, creating parent
/// directories as needed.
///
/// # Returns
/// Path to the saved file
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<PathBuf, CanvasError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && !parent.exists()
    {
        log::info!("Creating output directory: {}", parent.display());
        fs::create_dir_all(parent)?;
    }

    log::info!(
        "Saving {}x{} image to: {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );

    let mut writer = BufWriter::new(File::create(path)?);
    canvas.write_png(&mut writer)?;
    writer.flush()?;

    let written_size = fs::metadata(path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(path.to_path_buf())
}
