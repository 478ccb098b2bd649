//! Interactive figure export.
//!
//! The interactive composite is serialized as a Plotly figure: the X-ray as an
//! image trace, one unfilled `rect` shape per detection, and one invisible
//! two-point scatter trace per detection carrying the hover text. Tick labels
//! are hidden, margins are zero and panning/zooming is disabled.

use crate::core::errors::ReportResult;
use crate::utils::image::encode_png;
use crate::utils::visualization::AnnotatedView;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// A complete figure document (`data`, `layout`, `config`).
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: FigureConfig,
}

/// A figure trace.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// The base image as a PNG data URI.
    Image { source: String, hoverinfo: String },
    /// Invisible markers at a box's two opposite corners.
    Scatter {
        x: [f32; 2],
        y: [f32; 2],
        mode: String,
        marker: Marker,
        hoverinfo: String,
        text: [String; 2],
        showlegend: bool,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub opacity: f32,
    pub color: String,
}

/// A rectangle outline drawn over the image.
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub line: Line,
    pub fillcolor: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub shapes: Vec<Shape>,
    pub margin: Margin,
    /// Always `false`: dragging neither pans nor zooms.
    pub dragmode: bool,
    pub showlegend: bool,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showticklabels: bool,
    pub showgrid: bool,
    pub zeroline: bool,
    pub fixedrange: bool,
    pub range: [f32; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureConfig {
    #[serde(rename = "scrollZoom")]
    pub scroll_zoom: bool,
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
}

impl Figure {
    /// Builds the figure for an annotated view.
    pub fn from_view(view: &AnnotatedView) -> ReportResult<Self> {
        let png = encode_png(view.image())?;
        let source = format!("data:image/png;base64,{}", STANDARD.encode(png));
        let (width, height) = view.image().dimensions();

        let mut data = Vec::with_capacity(view.overlays().len() + 1);
        data.push(Trace::Image {
            source,
            hoverinfo: "skip".to_string(),
        });

        let mut shapes = Vec::with_capacity(view.overlays().len());
        for overlay in view.overlays() {
            let bbox = overlay.region;
            shapes.push(Shape {
                kind: "rect".to_string(),
                x0: bbox.x1,
                y0: bbox.y1,
                x1: bbox.x2,
                y1: bbox.y2,
                line: Line {
                    color: overlay.color.hex().to_string(),
                    width: view.stroke_width(),
                },
                fillcolor: "rgba(0,0,0,0)".to_string(),
            });
            data.push(Trace::Scatter {
                x: [bbox.x1, bbox.x2],
                y: [bbox.y1, bbox.y2],
                mode: "markers".to_string(),
                marker: Marker {
                    opacity: 0.0,
                    color: overlay.color.hex().to_string(),
                },
                hoverinfo: "text".to_string(),
                text: [overlay.hover_text.clone(), overlay.hover_text.clone()],
                showlegend: false,
            });
        }

        let axis = |range: [f32; 2]| Axis {
            showticklabels: false,
            showgrid: false,
            zeroline: false,
            fixedrange: true,
            range,
        };

        Ok(Self {
            data,
            layout: Layout {
                shapes,
                margin: Margin {
                    l: 0,
                    r: 0,
                    t: 0,
                    b: 0,
                },
                dragmode: false,
                showlegend: false,
                xaxis: axis([0.0, width as f32]),
                // Image rows grow downwards.
                yaxis: axis([height as f32, 0.0]),
            },
            config: FigureConfig {
                scroll_zoom: false,
                display_mode_bar: false,
            },
        })
    }

    /// Serializes the figure as JSON for a front-end plotting widget.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
