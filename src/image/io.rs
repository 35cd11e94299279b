//! Loading inputs and writing response maps via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{OwnedImage, ResponseMap};
use crate::util::{NccError, NccResult};
use image::{GrayImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn io_error(err: impl std::fmt::Display) -> NccError {
    NccError::ImageIo {
        reason: err.to_string(),
    }
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> NccResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Converts any decoded image to luma and copies it into an owned image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> NccResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> NccResult<OwnedImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|err| io_error(format_args!("{}: {err}", path.display())))?;
    owned_from_dynamic_image(&img)
}

/// Rescales a response map to 8-bit grayscale and encodes it as PNG.
pub fn encode_response_png(map: &ResponseMap) -> NccResult<Vec<u8>> {
    let width = u32::try_from(map.width()).map_err(io_error)?;
    let height = u32::try_from(map.height()).map_err(io_error)?;
    let gray = GrayImage::from_raw(width, height, map.to_gray_u8()).ok_or(
        NccError::InvalidDimensions {
            width: map.width(),
            height: map.height(),
        },
    )?;

    let mut bytes = Vec::new();
    gray.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(io_error)?;
    Ok(bytes)
}

/// Writes a response map as an 8-bit grayscale PNG.
///
/// The PNG is encoded in memory and written to a sibling temporary file that
/// is renamed into place, so `path` is never left half-written.
pub fn save_response_png<P: AsRef<Path>>(map: &ResponseMap, path: P) -> NccResult<()> {
    let path = path.as_ref();
    let bytes = encode_response_png(map)?;

    let tmp = temp_sibling(path);
    let written = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(format_args!("{}: {err}", path.display())));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    let mut tmp = path.to_path_buf();
    tmp.set_file_name(name);
    tmp
}

#[cfg(test)]
mod tests {
    use super::temp_sibling;
    use std::path::Path;

    #[test]
    fn temp_file_sits_next_to_target() {
        assert_eq!(
            temp_sibling(Path::new("out/correlated.png")),
            Path::new("out/correlated.png.tmp")
        );
    }
}
