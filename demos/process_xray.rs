//! Dental X-ray Report Example
//!
//! Runs the full pipeline for one X-ray: detection (replayed from a JSON file),
//! annotation, issue summary and the PDF report.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example process_xray -- [OPTIONS] --patient-id <ID> <IMAGE>
//! ```
//!
//! # Arguments
//!
//! * `-p, --patient-id` - Patient identifier printed on the report
//! * `-d, --detections` - Raw detections JSON to replay (no findings when omitted)
//! * `-c, --config` - Pipeline configuration JSON
//! * `-o, --output-dir` - Directory for the annotated image and the report
//! * `--view-json` - Where to write the interactive figure as Plotly JSON
//! * `<IMAGE>` - Path to the X-ray image
//!
//! # Example
//!
//! ```bash
//! cargo run --example process_xray -- -p P-001 -d detections.json -o reports/ xray.png
//! ```

use clap::Parser;
use dental_xray_report::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Command-line arguments for the report example
#[derive(Parser)]
#[command(name = "process_xray")]
#[command(about = "Dental X-ray Report Example - annotates an X-ray and writes a PDF report")]
struct Args {
    /// Path to the X-ray image
    image: PathBuf,

    /// Patient identifier printed on the report
    #[arg(short, long)]
    patient_id: String,

    /// Raw detections JSON to replay
    #[arg(short, long)]
    detections: Option<PathBuf>,

    /// Pipeline configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the annotated image and the report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Where to write the interactive figure as Plotly JSON
    #[arg(long)]
    view_json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dental_xray_report::utils::init_tracing();

    let args = Args::parse();

    info!("Dental X-ray Report Example");

    if !args.image.exists() {
        error!("Image file not found: {}", args.image.display());
        return Err("Image file not found".into());
    }

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }

    let detector = match &args.detections {
        Some(path) => PrecomputedDetector::from_json_file(path)?,
        None => {
            info!("No detections file given, running with an empty result");
            PrecomputedDetector::new(RawDetections::default())
        }
    };

    let pipeline = ReportPipeline::new(Arc::new(detector), config)?;
    let image = load_image(&args.image)?;

    let outcome = match pipeline.process(&image, &args.patient_id) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if let Some(path) = &args.view_json {
        let figure = outcome.figure()?;
        std::fs::write(path, figure.to_json()?)?;
        info!("Interactive figure written to {}", path.display());
    }

    println!("{outcome}");
    Ok(())
}
