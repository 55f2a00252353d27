use crate::errors::CliError;
use bandpipe::PixelBlock;
use std::path::Path;
use tracing::debug;

/// Decodes an image file into a pixel block, flattening to 8-bit RGBA.
pub fn load_pixel_block(path: &Path) -> Result<PixelBlock, CliError> {
    let image = image::open(path)
        .map_err(|e| CliError::FrameDecoding {
            source: e.to_string(),
            path: path.to_string_lossy().to_string(),
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    debug!("Decoded {:?} as a {}x{} frame", path, width, height);
    PixelBlock::from_rgba(width as usize, height as usize, image.into_raw())
        .map_err(CliError::from)
}

/// Collects the frame images in a directory, sorted by file name so batch
/// output order is stable.
pub fn collect_frame_paths(dir: &Path) -> Result<Vec<std::path::PathBuf>, CliError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(dir.to_string_lossy().to_string()),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("png") | Some("jpg") | Some("jpeg") | Some("bmp")
            )
        })
        .collect();
    paths.sort();
    Ok(paths)
}
