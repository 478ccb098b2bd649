//! Annotated view construction and raster rendering.
//!
//! [`AnnotatedView`] pairs the source X-ray with one overlay per detection:
//! its box, its class color and its hover text. The same view drives both
//! outputs, the interactive [`Figure`](crate::utils::figure::Figure) and the
//! flattened raster produced by [`render_flattened`] for the PDF.

use crate::core::ViewConfig;
use crate::domain::Detection;
use crate::processors::{BoundingBox, Color, ColorRegistry};

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One detection as drawn on the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub region: BoundingBox,
    pub color: Color,
    /// `"{label} ({confidence:.2})"`
    pub hover_text: String,
    /// `"{label} {confidence:.2}"`, drawn on the flattened raster.
    pub tag: String,
}

/// Source image plus ordered overlays. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnnotatedView {
    image: Arc<RgbImage>,
    overlays: Vec<Overlay>,
    stroke_width: f32,
}

impl AnnotatedView {
    /// Builds the view, drawing each detection's color from `colors`.
    pub fn build(
        image: Arc<RgbImage>,
        detections: &[Detection],
        colors: &mut ColorRegistry,
        config: &ViewConfig,
    ) -> Self {
        let overlays = detections
            .iter()
            .map(|det| Overlay {
                region: det.bbox,
                color: colors.color_for(det.class_id),
                hover_text: det.hover_text(),
                tag: det.raster_tag(),
            })
            .collect::<Vec<_>>();

        debug!(
            "Built annotated view with {} overlays across {} classes",
            overlays.len(),
            colors.len()
        );

        Self {
            image,
            overlays,
            stroke_width: config.stroke_width,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Outline width used by the interactive figure.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }
}

/// Styling for [`render_flattened`].
pub struct RasterStyle<'a> {
    /// Outline thickness in pixels, drawn inwards from the box edge.
    pub line_width: u32,
    /// Font for box tags. Tags are skipped when `None`.
    pub font: Option<&'a FontVec>,
    pub font_size: f32,
}

impl<'a> RasterStyle<'a> {
    pub fn new(config: &ViewConfig, font: Option<&'a FontVec>) -> Self {
        Self {
            line_width: config.raster_line_width,
            font,
            font_size: config.label_font_size,
        }
    }
}

/// Burns the view's overlays into a copy of its image.
pub fn render_flattened(view: &AnnotatedView, style: &RasterStyle<'_>) -> RgbImage {
    let mut output = view.image().clone();
    let (width, height) = output.dimensions();

    for overlay in view.overlays() {
        let Some(rect) = overlay.region.to_clamped_rect(width, height) else {
            debug!("Skipping overlay outside the image: {:?}", overlay.region);
            continue;
        };

        draw_thick_rect(&mut output, rect, overlay.color.rgb(), style.line_width);

        if let Some(font) = style.font {
            draw_tag(&mut output, rect, overlay, font, style.font_size);
        }
    }

    output
}

fn draw_thick_rect(img: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: u32) {
    for t in 0..thickness {
        let inset = 2 * t;
        if rect.width() <= inset || rect.height() <= inset {
            break;
        }
        let inner = Rect::at(rect.left() + t as i32, rect.top() + t as i32)
            .of_size(rect.width() - inset, rect.height() - inset);
        draw_hollow_rect_mut(img, inner, color);
    }
}

/// Space around the text of a raster tag, in pixels.
const TAG_PADDING: u32 = 2;

/// A text extent in pixels plus padding on both sides. Saturates instead of
/// overflowing for oversized fonts.
fn padded_extent(extent: f32) -> u32 {
    (extent.ceil() as u32).saturating_add(2 * TAG_PADDING)
}

/// Draws the tag on a filled background above the box, or just inside its
/// top edge when there is no room above.
fn draw_tag(img: &mut RgbImage, rect: Rect, overlay: &Overlay, font: &FontVec, font_size: f32) {
    let (img_width, img_height) = img.dimensions();
    let tag_height = padded_extent(font_size);
    if tag_height >= img_height {
        return;
    }
    let text_width = measure_text_width(&overlay.tag, font, font_size);

    let tag_top = if rect.top() >= tag_height as i32 {
        rect.top() - tag_height as i32
    } else {
        rect.top()
    };
    let tag_width = padded_extent(text_width).min(img_width - rect.left() as u32);
    if tag_width == 0 {
        return;
    }

    let background = Rect::at(rect.left(), tag_top).of_size(tag_width, tag_height);
    draw_filled_rect_mut(img, background, overlay.color.rgb());
    draw_text_mut(
        img,
        overlay.color.contrasting_text(),
        rect.left() + TAG_PADDING as i32,
        tag_top + TAG_PADDING as i32,
        font_size,
        font,
        &overlay.tag,
    );
}

/// Measures the width of text when rendered with a specific font and scale.
fn measure_text_width(text: &str, font: &FontVec, scale: f32) -> f32 {
    use ab_glyph::{Font, ScaleFont};

    let scaled_font = font.as_scaled(scale);
    text.chars()
        .map(|ch| scaled_font.h_advance(scaled_font.scaled_glyph(ch).id))
        .sum()
}

/// Loads the font used for raster tags.
///
/// A configured `font_path` is tried first; otherwise, or if it fails to
/// parse, common system font locations are probed. Returns `None` when no
/// font loads, in which case tags are left out of the raster.
pub fn load_label_font(config: &ViewConfig) -> Option<FontVec> {
    if let Some(path) = config.font_path.as_deref() {
        match load_font(path) {
            Some(font) => {
                info!("Using custom font: {}", path.display());
                return Some(font);
            }
            None => warn!(
                "Failed to load custom font {}. Falling back to system font.",
                path.display()
            ),
        }
    }

    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    for path in &font_paths {
        if let Some(font) = load_font(Path::new(path)) {
            debug!("Loaded system font: {}", path);
            return Some(font);
        }
    }

    debug!("No system font found, raster tags will be skipped");
    None
}

fn load_font(path: &Path) -> Option<FontVec> {
    let font_data = std::fs::read(path).ok()?;
    FontVec::try_from_vec(font_data).ok()
}
