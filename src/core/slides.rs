//! Slide sources: scan a directory for images, or generate placeholders.
//!
//! This module performs filesystem reads and image decoding and returns
//! plain data.  No UI or Ratatui types are used here.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use ignore::WalkBuilder;
use image::RgbaImage;

use super::error::CarouselError;

/// Longest edge of a decoded thumbnail, in pixels.  Cards are at most a few
/// dozen cells wide, so anything larger only costs resize time per frame.
pub const THUMBNAIL_EDGE: u32 = 160;

/// One carousel item.
#[derive(Debug, Clone)]
pub struct Slide {
    pub caption: String,
    pub modified: Option<SystemTime>,
    pub image: Arc<RgbaImage>,
}

/// Directory scan options.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub show_hidden: bool,
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            respect_gitignore: true,
        }
    }
}

/// Load every decodable image directly inside `dir`, sorted by name.
///
/// Files that look like images but fail to decode are logged and skipped.
/// An empty result is a configuration error.
pub fn scan_dir(dir: &Path, config: &ScanConfig) -> Result<Vec<Slide>, CarouselError> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .build();

    let mut candidates: Vec<PathBuf> = walker
        .flatten()
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .map(|e| e.into_path())
        .filter(|p| looks_like_image(p))
        .collect();
    candidates.sort_by_key(|p| file_name(p).to_lowercase());

    let mut slides = Vec::with_capacity(candidates.len());
    for path in candidates {
        match image::open(&path) {
            Ok(img) => {
                let thumb = img.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgba8();
                slides.push(Slide {
                    caption: file_name(&path),
                    modified: std::fs::metadata(&path).and_then(|m| m.modified()).ok(),
                    image: Arc::new(thumb),
                });
            }
            Err(e) => tracing::warn!("skipping {}: {e}", path.display()),
        }
    }

    tracing::debug!(count = slides.len(), dir = %dir.display(), "scanned slides");
    if slides.is_empty() {
        return Err(CarouselError::NoSlides {
            path: dir.to_path_buf(),
        });
    }
    Ok(slides)
}

/// Built-in gradient slides used when no directory is given.
pub fn generated(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| {
            let hue = i as f64 / count.max(1) as f64;
            Slide {
                caption: format!("Slide {}", i + 1),
                modified: None,
                image: Arc::new(gradient(hue, 96, 64)),
            }
        })
        .collect()
}

/// Content sniffing first; extension as a fallback for systems without a
/// shared-mime-info database.
fn looks_like_image(path: &Path) -> bool {
    if let Some(mime) = tree_magic_mini::from_filepath(path) {
        if mime.starts_with("image/") {
            return true;
        }
    }
    image::ImageFormat::from_path(path).is_ok()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Diagonal two-tone gradient around `hue` (0..1).
fn gradient(hue: f64, width: u32, height: u32) -> RgbaImage {
    let a = hsv_to_rgb(hue, 0.65, 0.95);
    let b = hsv_to_rgb((hue + 0.12).fract(), 0.8, 0.45);
    let span = (width + height).max(1) as f64;
    RgbaImage::from_fn(width, height, |x, y| {
        let t = (x + y) as f64 / span;
        let mix = |i: usize| (a[i] as f64 * (1.0 - t) + b[i] as f64 * t).round() as u8;
        image::Rgba([mix(0), mix(1), mix(2), 255])
    })
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_slides_are_numbered() {
        let slides = generated(3);
        let captions: Vec<_> = slides.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, ["Slide 1", "Slide 2", "Slide 3"]);
        assert!(slides.iter().all(|s| s.image.width() == 96 && s.modified.is_none()));
    }

    #[test]
    fn scan_keeps_only_decodable_images_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let img = RgbaImage::from_pixel(400, 200, image::Rgba([10, 20, 30, 255]));
        img.save(dir.path().join("b.png")).expect("save b");
        img.save(dir.path().join("A.png")).expect("save a");
        std::fs::write(dir.path().join("notes.txt"), "not an image").expect("txt");
        std::fs::write(dir.path().join("broken.png"), b"definitely not png").expect("broken");

        let slides = scan_dir(dir.path(), &ScanConfig::default()).expect("scan");
        let captions: Vec<_> = slides.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, ["A.png", "b.png"]);
        assert_eq!(slides[0].image.width(), THUMBNAIL_EDGE);
        assert!(slides[0].modified.is_some());
    }

    #[test]
    fn scan_of_directory_without_images_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("readme.md"), "# hi").expect("write");
        let err = scan_dir(dir.path(), &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, CarouselError::NoSlides { .. }));
    }
}
