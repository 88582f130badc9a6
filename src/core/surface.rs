//! The element seam between the scroll controller and whatever draws it.
//!
//! A surface exposes four element roles: viewport, track, items (each with
//! a nested image), and the progress bar.  Geometry is read once per
//! `calculate`; every other property is write-only from the controller's
//! point of view.

use super::error::CarouselError;

/// Geometry measured from the surface when (re)calculating bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Visible container width in pixels.
    pub viewport_width: f64,
    /// Width of the first item in pixels.
    pub item_width: f64,
    /// Number of items on the track.
    pub item_count: usize,
}

impl Geometry {
    /// Reject geometry the controller cannot scroll over.
    pub fn validate(self) -> Result<Self, CarouselError> {
        if self.item_count == 0 {
            return Err(CarouselError::NoItems);
        }
        for (element, width) in [("viewport", self.viewport_width), ("item", self.item_width)] {
            if !width.is_finite() || width < 0.0 {
                return Err(CarouselError::InvalidGeometry { element, width });
            }
        }
        Ok(self)
    }

    /// Track width: every item is assumed as wide as the first one.
    pub fn track_width(&self) -> f64 {
        self.item_width * self.item_count as f64
    }
}

/// Write target for the per-frame visual properties.
pub trait Surface {
    fn geometry(&self) -> Geometry;

    fn set_track_width(&mut self, px: f64);
    fn set_track_translate_x(&mut self, px: f64);
    fn set_bar_scale_x(&mut self, scale: f64);
    fn set_item_scale(&mut self, index: usize, scale: f64);
    fn set_image_scale_x(&mut self, index: usize, scale: f64);
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording surface for controller tests.

    use super::{Geometry, Surface};

    #[derive(Debug, Clone)]
    pub struct RecordingSurface {
        pub viewport_width: f64,
        pub item_width: f64,
        pub item_count: usize,
        pub track_width: Option<f64>,
        pub translate_x: f64,
        pub bar_scale_x: f64,
        pub item_scales: Vec<f64>,
        pub image_scales: Vec<f64>,
    }

    impl RecordingSurface {
        pub fn new(viewport_width: f64, item_width: f64, item_count: usize) -> Self {
            Self {
                viewport_width,
                item_width,
                item_count,
                track_width: None,
                translate_x: 0.0,
                bar_scale_x: 0.0,
                item_scales: vec![1.0; item_count],
                image_scales: vec![1.0; item_count],
            }
        }
    }

    impl Surface for RecordingSurface {
        fn geometry(&self) -> Geometry {
            Geometry {
                viewport_width: self.viewport_width,
                item_width: self.item_width,
                item_count: self.item_count,
            }
        }

        fn set_track_width(&mut self, px: f64) {
            self.track_width = Some(px);
        }

        fn set_track_translate_x(&mut self, px: f64) {
            self.translate_x = px;
        }

        fn set_bar_scale_x(&mut self, scale: f64) {
            self.bar_scale_x = scale;
        }

        fn set_item_scale(&mut self, index: usize, scale: f64) {
            self.item_scales[index] = scale;
        }

        fn set_image_scale_x(&mut self, index: usize, scale: f64) {
            self.image_scales[index] = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_items_is_a_configuration_error() {
        let g = Geometry {
            viewport_width: 400.0,
            item_width: 200.0,
            item_count: 0,
        };
        assert!(matches!(g.validate(), Err(CarouselError::NoItems)));
    }

    #[test]
    fn non_finite_width_is_rejected() {
        let g = Geometry {
            viewport_width: f64::NAN,
            item_width: 200.0,
            item_count: 3,
        };
        assert!(matches!(
            g.validate(),
            Err(CarouselError::InvalidGeometry { element: "viewport", .. })
        ));
    }

    #[test]
    fn track_width_is_first_item_times_count() {
        let g = Geometry {
            viewport_width: 400.0,
            item_width: 200.0,
            item_count: 4,
        };
        assert_eq!(g.validate().map(|g| g.track_width()).ok(), Some(800.0));
    }
}
