//! PDF serialization of a [`ReportDocument`].
//!
//! Produces a single A4 page using the standard Helvetica font, with the
//! annotated image embedded as an uncompressed RGB XObject straight from
//! memory and then Flate-compressed along with the page content.

use super::document::{Align, ReportDocument};
use super::font_metrics::helvetica_text_width;
use crate::core::errors::OpaqueError;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH_PT: i64 = 595;
const PAGE_HEIGHT_PT: i64 = 842;
/// Horizontal padding inside a left-aligned cell.
const CELL_PADDING_MM: f32 = 1.0;

const FONT_RESOURCE: &str = "F1";
const IMAGE_RESOURCE: &str = "Im1";

/// Serializes the document and embedded image to PDF bytes.
pub fn render_pdf(document: &ReportDocument, image: &RgbImage) -> Result<Vec<u8>, OpaqueError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let (width, height) = image.dimensions();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        image.as_raw().clone(),
    ));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
        "XObject" => dictionary! { IMAGE_RESOURCE => image_id },
    });

    let content = page_content(document)?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| OpaqueError(format!("PDF serialization failed: {e}")))?;
    Ok(bytes)
}

/// Builds the page content stream: one text object per cell, then the image.
fn page_content(document: &ReportDocument) -> Result<Vec<u8>, OpaqueError> {
    let layout = &document.layout;
    let page_height = PAGE_HEIGHT_PT as f32;
    let font_size = layout.font_size;
    let font_size_mm = font_size / PT_PER_MM;

    let mut operations = Vec::with_capacity(document.cells.len() * 5 + 4);
    for cell in &document.cells {
        let x_mm = match cell.align {
            Align::Left => layout.left_margin_mm + CELL_PADDING_MM,
            Align::Center => {
                let text_mm = helvetica_text_width(&cell.text, font_size) / PT_PER_MM;
                layout.left_margin_mm + (layout.cell_width_mm - text_mm) / 2.0
            }
        };
        // Baseline sits just below the vertical middle of the cell.
        let baseline_mm = cell.top_mm + layout.cell_height_mm / 2.0 + 0.3 * font_size_mm;

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(FONT_RESOURCE.into()), points(font_size)]),
            Operation::new(
                "Td",
                vec![
                    points(x_mm * PT_PER_MM),
                    points(page_height - baseline_mm * PT_PER_MM),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi_bytes(&cell.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    let placement = document.image;
    operations.extend([
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                points(placement.width_mm * PT_PER_MM),
                points(0.0),
                points(0.0),
                points(placement.height_mm * PT_PER_MM),
                points(placement.x_mm * PT_PER_MM),
                points(page_height - (placement.y_mm + placement.height_mm) * PT_PER_MM),
            ],
        ),
        Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.into())]),
        Operation::new("Q", vec![]),
    ]);

    Content { operations }
        .encode()
        .map_err(|e| OpaqueError(format!("content stream encoding failed: {e}")))
}

/// A length in points, rounded to hundredths.
fn points(value: f32) -> Object {
    ((value * 100.0).round() / 100.0).into()
}

/// Encodes text for a WinAnsi font. Control characters become spaces and
/// characters outside Latin-1 become `?`.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch as u32 {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            code if code < 0x20 => b' ',
            _ => b'?',
        })
        .collect()
}
