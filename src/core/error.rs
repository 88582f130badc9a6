//! Configuration errors raised while wiring the carousel together.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarouselError {
    /// The surface exposes no items to scroll.
    #[error("carousel has no items: at least one slide is required")]
    NoItems,

    /// A measured width is negative, NaN or infinite.
    #[error("{element} width must be a finite, non-negative number (got {width})")]
    InvalidGeometry { element: &'static str, width: f64 },

    /// Scanning a directory produced nothing that decodes as an image.
    #[error("no decodable images found in {}", path.display())]
    NoSlides { path: PathBuf },
}
