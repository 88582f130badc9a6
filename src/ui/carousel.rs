//! Terminal rendering of the carousel.
//!
//! [`CarouselView`] is the [`Surface`] the controller writes into: it holds
//! the last value of every visual property.  [`CarouselWidget`] and
//! [`ProgressBar`] read those values each frame and draw them.  One terminal
//! column stands for `px_per_cell` pixels.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::core::slides::Slide;
use crate::core::surface::{Geometry, Surface};

use super::theme::Theme;

/// Cards narrower than this are skipped rather than drawn as broken borders.
const MIN_CARD_COLS: u16 = 3;

// ───────────────────────────────────────── surface ───────────

/// Last-written visual properties, in pixels unless noted.
#[derive(Debug, Clone)]
pub struct CarouselView {
    px_per_cell: f64,
    viewport_cols: u16,
    item_cols: u16,
    item_count: usize,
    track_width: f64,
    translate_x: f64,
    bar_scale_x: f64,
    item_scales: Vec<f64>,
    image_scales: Vec<f64>,
}

impl CarouselView {
    pub fn new(item_count: usize, item_cols: u16, viewport_cols: u16, px_per_cell: f64) -> Self {
        Self {
            px_per_cell,
            viewport_cols,
            item_cols,
            item_count,
            track_width: 0.0,
            translate_x: 0.0,
            bar_scale_x: 0.0,
            item_scales: vec![1.0; item_count],
            image_scales: vec![1.0; item_count],
        }
    }

    /// Update the measured viewport width (columns) after a resize.
    pub fn set_viewport_cols(&mut self, cols: u16) {
        self.viewport_cols = cols;
    }

    pub fn px_per_cell(&self) -> f64 {
        self.px_per_cell
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn bar_scale_x(&self) -> f64 {
        self.bar_scale_x
    }

    /// Convert a terminal column into the controller's pixel space.
    pub fn col_to_px(&self, col: u16) -> f64 {
        col as f64 * self.px_per_cell
    }
}

impl Surface for CarouselView {
    fn geometry(&self) -> Geometry {
        Geometry {
            viewport_width: self.col_to_px(self.viewport_cols),
            item_width: self.col_to_px(self.item_cols),
            item_count: self.item_count,
        }
    }

    fn set_track_width(&mut self, px: f64) {
        self.track_width = px;
    }

    fn set_track_translate_x(&mut self, px: f64) {
        self.translate_x = px;
    }

    fn set_bar_scale_x(&mut self, scale: f64) {
        self.bar_scale_x = scale;
    }

    fn set_item_scale(&mut self, index: usize, scale: f64) {
        if let Some(s) = self.item_scales.get_mut(index) {
            *s = scale;
        }
    }

    fn set_image_scale_x(&mut self, index: usize, scale: f64) {
        if let Some(s) = self.image_scales.get_mut(index) {
            *s = scale;
        }
    }
}

// ───────────────────────────────────────── widgets ───────────

/// Draws the track: every slide as a bordered card, shifted by the track
/// translation and squashed by its item scale.
pub struct CarouselWidget<'a> {
    pub view: &'a CarouselView,
    pub slides: &'a [Slide],
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 3 {
            return;
        }
        let view = self.view;
        let offset_cols = view.translate_x / view.px_per_cell;
        let slot = view.item_cols as f64;

        for (i, slide) in self.slides.iter().enumerate().take(view.item_count) {
            let slot_left = i as f64 * slot + offset_cols;
            if slot_left >= area.width as f64 || slot_left + slot <= 0.0 {
                continue;
            }

            // Scale about the slot centre.  A negative scale (very fast move
            // toward the end) collapses the card rather than mirroring it.
            let scale = view.item_scales[i].clamp(0.0, 1.0);
            let w = (slot * scale).round() as u16;
            let h = (area.height as f64 * scale).round() as u16;
            if w < MIN_CARD_COLS || h < 3 {
                continue;
            }
            let card_left = slot_left + (slot - w as f64) / 2.0;
            let card_top = area.y + (area.height - h) / 2;

            let mut card = Buffer::empty(Rect::new(0, 0, w, h));
            render_card(slide, view.image_scales[i], card.area, &mut card);
            blit_clipped(&card, card_left.round() as i32 + area.x as i32, card_top, area, buf);
        }
    }
}

/// Horizontal progress bar, left-anchored, filled to `scale × width`.
pub struct ProgressBar {
    pub scale: f64,
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let filled = filled_cols(self.scale, area.width);
        for col in 0..area.width {
            let (ch, style) = if col < filled {
                ('━', Theme::bar_filled_style())
            } else {
                ('─', Theme::bar_track_style())
            };
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

fn filled_cols(scale: f64, width: u16) -> u16 {
    if !scale.is_finite() {
        return 0;
    }
    (scale.clamp(0.0, 1.0) * width as f64).round() as u16
}

fn render_card(slide: &Slide, image_scale_x: f64, area: Rect, buf: &mut Buffer) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::card_border_style())
        .title(Span::styled(format!(" {} ", slide.caption), Theme::caption_style()));
    if let Some(modified) = slide.modified {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", format_modified(modified)),
            Theme::timestamp_style(),
        )));
    }
    let inner = block.inner(area);
    block.render(area, buf);
    render_image_halfblocks(&slide.image, image_scale_x, inner, buf);
}

/// Copy `src` into `dst` with its top-left corner at (`x`, `y`), dropping
/// columns that fall outside `clip`.
fn blit_clipped(src: &Buffer, x: i32, y: u16, clip: Rect, dst: &mut Buffer) {
    for row in 0..src.area.height {
        let ty = y + row;
        if ty < clip.top() || ty >= clip.bottom() {
            continue;
        }
        for col in 0..src.area.width {
            let tx = x + col as i32;
            if tx < clip.left() as i32 || tx >= clip.right() as i32 {
                continue;
            }
            dst[(tx as u16, ty)] = src[(col, row)].clone();
        }
    }
}

fn format_modified(t: std::time::SystemTime) -> String {
    let dt: chrono::DateTime<chrono::Local> = t.into();
    dt.format("%Y/%m/%d").to_string()
}

// ─── image (halfblock renderer) ─────────────────────────────────

/// Render `thumb` with `▀` half-blocks (1 px wide × 2 px tall per cell),
/// fitted to `area`, then stretched horizontally by `stretch_x` and
/// centre-cropped back into `area`.
fn render_image_halfblocks(thumb: &image::RgbaImage, stretch_x: f64, area: Rect, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    let max_px_w = area.width as f64;
    let max_px_h = area.height as f64 * 2.0;
    let src_w = thumb.width() as f64;
    let src_h = thumb.height() as f64;

    let fit = (max_px_w / src_w).min(max_px_h / src_h);
    let stretch = if stretch_x.is_finite() { stretch_x.max(0.05) } else { 1.0 };
    let stretched_w = src_w * fit * stretch;
    let fit_h = (src_h * fit).round().max(1.0) as u32;

    // Wider than the area after stretching: crop the middle source columns
    // first so the resize never exceeds the area.
    let rgba = if stretched_w > max_px_w {
        let keep = ((src_w * max_px_w / stretched_w).round() as u32).clamp(1, thumb.width());
        let x0 = (thumb.width() - keep) / 2;
        let cropped = image::imageops::crop_imm(thumb, x0, 0, keep, thumb.height()).to_image();
        image::imageops::resize(&cropped, area.width as u32, fit_h, FilterType::Triangle)
    } else {
        let fit_w = stretched_w.round().max(1.0) as u32;
        image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle)
    };
    let (iw, ih) = (rgba.width(), rgba.height());

    let (src_x0, dst_x0, cols) = if iw > area.width as u32 {
        ((iw - area.width as u32) / 2, 0, area.width as u32)
    } else {
        (0, (area.width as u32 - iw) / 2, iw)
    };
    let row_offset = (area.height as u32).saturating_sub(ih.div_ceil(2)) / 2;

    for row in 0..area.height as u32 {
        let yt = row * 2;
        let yb = yt + 1;
        if yt >= ih || row + row_offset >= area.height as u32 {
            break;
        }
        for col in 0..cols {
            let t = rgba.get_pixel(src_x0 + col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(src_x0 + col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            let pos = Position::new(
                area.x + (dst_x0 + col) as u16,
                area.y + (row + row_offset) as u16,
            );
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::ScrollController;
    use crate::core::physics::Physics;
    use crate::core::slides;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn geometry_is_reported_in_pixels() {
        let view = CarouselView::new(4, 25, 50, 8.0);
        let g = view.geometry();
        assert_eq!(g.item_width, 200.0);
        assert_eq!(g.viewport_width, 400.0);
        assert_eq!(g.item_count, 4);
    }

    #[test]
    fn progress_bar_fills_scaled_width() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar { scale: 0.5 }.render(area, &mut buf);
        let filled = row_text(&buf, 0).chars().filter(|&c| c == '━').count();
        assert_eq!(filled, 10);
    }

    #[test]
    fn progress_bar_tolerates_nan() {
        assert_eq!(filled_cols(f64::NAN, 40), 0);
        assert_eq!(filled_cols(3.0, 40), 40);
    }

    #[test]
    fn translation_shifts_cards_left() {
        let slides = slides::generated(4);
        let mut view = CarouselView::new(4, 12, 24, 8.0);
        view.set_item_scale(0, 1.0);
        let area = Rect::new(0, 0, 24, 8);

        let mut buf = Buffer::empty(area);
        CarouselWidget { view: &view, slides: &slides }.render(area, &mut buf);
        let top = row_text(&buf, 0);
        assert!(top.contains("Slide 1"), "{top}");
        assert!(top.contains("Slide 2"), "{top}");

        // One full slot to the left.
        view.set_track_translate_x(-96.0);
        let mut buf = Buffer::empty(area);
        CarouselWidget { view: &view, slides: &slides }.render(area, &mut buf);
        let top = row_text(&buf, 0);
        assert!(!top.contains("Slide 1"), "{top}");
        assert!(top.contains("Slide 2") && top.contains("Slide 3"), "{top}");
    }

    #[test]
    fn squashed_cards_leave_rows_empty() {
        let slides = slides::generated(1);
        let mut view = CarouselView::new(1, 20, 20, 8.0);
        view.set_item_scale(0, 0.5);
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        CarouselWidget { view: &view, slides: &slides }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
        assert_ne!(row_text(&buf, 3).trim(), "");
    }

    #[test]
    fn extreme_stretch_shows_the_centre_column_across_the_area() {
        // Left half red, right half blue.
        let thumb = image::RgbaImage::from_fn(96, 64, |x, _| {
            if x < 48 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        render_image_halfblocks(&thumb, 1599.0, area, &mut buf);

        for y in 0..area.height {
            assert_eq!(row_text(&buf, y), "▀".repeat(20));
            for x in 0..area.width {
                assert!(
                    matches!(buf[(x, y)].fg, Color::Rgb(r, _, b) if r > 200 && b < 50),
                    "({x},{y}) {:?}",
                    buf[(x, y)].fg
                );
            }
        }
    }

    #[test]
    fn moderate_stretch_fills_the_area_width() {
        let thumb = image::RgbaImage::from_pixel(96, 64, image::Rgba([10, 20, 30, 255]));
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        // Unstretched the image is 15 columns wide; 1.5× overflows and is cropped.
        render_image_halfblocks(&thumb, 1.5, area, &mut buf);
        assert_eq!(row_text(&buf, 0), "▀".repeat(20));
    }

    #[test]
    fn controller_drives_the_view() {
        let view = CarouselView::new(4, 25, 50, 8.0);
        let mut c = ScrollController::new(view, Physics::default()).expect("geometry");
        assert_eq!(c.surface().track_width(), 800.0);
        c.on_wheel(1000.0);
        for _ in 0..300 {
            c.advance();
        }
        assert!((c.surface().bar_scale_x() - 1.0).abs() < 1e-3);
    }
}
