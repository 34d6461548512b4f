use gazeplot_core::StimulusDims;
use std::path::{Path, PathBuf};
use tiny_skia::{ColorU8, Pixmap};

#[derive(thiserror::Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to open stimulus image {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode stimulus image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn classify(path: &Path, source: image::ImageError) -> ImageLoadError {
    match source {
        image::ImageError::IoError(source) => ImageLoadError::Open {
            path: path.to_path_buf(),
            source,
        },
        source => ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Reads only the image header to obtain the pixel dimensions used as the
/// coordinate scaling reference.
pub fn probe_dimensions(path: impl AsRef<Path>) -> Result<StimulusDims, ImageLoadError> {
    let path = path.as_ref();
    let (width, height) =
        image::image_dimensions(path).map_err(|source| classify(path, source))?;
    Ok(StimulusDims { width, height })
}

/// Fully decodes the stimulus image into a premultiplied pixmap for use as
/// the overlay background.
pub fn load_background(path: impl AsRef<Path>) -> Result<Pixmap, ImageLoadError> {
    let path = path.as_ref();
    let rgba = image::open(path)
        .map_err(|source| classify(path, source))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixmap = Pixmap::new(width, height).expect("pixmap");
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_is_an_open_error() {
        let err = probe_dimensions("/nonexistent/stimulus.png").unwrap_err();
        assert!(matches!(err, ImageLoadError::Open { .. }));
        assert!(err.to_string().contains("stimulus.png"));
    }
}
