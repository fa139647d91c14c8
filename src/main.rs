use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use dentection::report::{ReportInputs, render_report};
use dentection::{AnalysisPipeline, ClassCatalog, DetectorOutput, SessionState, viewer};

#[derive(Parser)]
#[command(name = "dentection")]
#[command(about = "Inspect dental panoramic X-ray detections and export PDF reports")]
struct Cli {
    /// Input image files (panoramic X-rays)
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Detector output JSON, one file per image, in the same order
    #[arg(long, value_name = "JSON", required = true)]
    detections: Vec<PathBuf>,

    /// Index of the active image within the batch
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Keep only findings of this class
    #[arg(long, value_name = "CLASS")]
    filter: Option<String>,

    /// Highlight the finding with this row index
    #[arg(long, value_name = "N")]
    select: Option<usize>,

    /// Attach a free-text note to the active image (repeatable)
    #[arg(long, value_name = "TEXT")]
    note: Vec<String>,

    /// Write the annotated image to this path
    #[arg(long, value_name = "PNG")]
    annotated: Option<PathBuf>,

    /// Write the PDF report to this path
    #[arg(long, value_name = "PDF")]
    report: Option<PathBuf>,

    /// Print the base64 viewer payload to stdout
    #[arg(long)]
    viewer_uri: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.images.len() != args.detections.len() {
        anyhow::bail!(
            "got {} images but {} detection files; each image needs exactly one",
            args.images.len(),
            args.detections.len()
        );
    }

    let catalog = ClassCatalog::dental();
    if let Some(filter) = &args.filter {
        if !catalog.contains(filter) {
            anyhow::bail!(
                "unknown class '{}'; expected one of: {}",
                filter,
                catalog.names().join(", ")
            );
        }
    }

    let mut session = SessionState::new(args.images.len());
    session.set_current_index(args.index);
    let active = session.current_index();

    let image_path = &args.images[active];
    let detections_path = &args.detections[active];
    let image_id = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("imagen")
        .to_string();

    if args.verbose {
        println!("Analizando: {} ({}/{})", image_id, active + 1, session.num_images());
    }

    let img = ImageReader::open(image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", image_path.display(), e))?;
    let detector_output = DetectorOutput::from_json_file(detections_path)?;

    if args.verbose {
        println!("Image loaded: {}x{}", img.width(), img.height());
        println!("Detector reported {} detections\n", detector_output.detections.len());
    }

    for note in &args.note {
        if !session.add_note(&image_id, note) {
            println!("Skipping empty note");
        }
    }

    let pipeline = AnalysisPipeline::new(catalog).with_verbose(args.verbose);
    let analysis = pipeline.run(
        &img,
        &detector_output.detections,
        args.filter.as_deref(),
        args.select,
    )?;

    println!("\n=== Hallazgos ===");
    println!("Total: {}", analysis.findings.len());
    for (label, count) in analysis.summary.iter() {
        println!("  {}: {}", label, count);
    }
    if analysis.findings.is_empty() {
        println!("No se encontraron objetos para esta clase.");
    }

    if let Some(path) = &args.annotated {
        analysis
            .annotated
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        if args.verbose {
            println!("Annotated image written to {}", path.display());
        }
    }

    if args.viewer_uri {
        println!("{}", viewer::viewer_payload(&analysis.annotated)?);
    }

    if let Some(path) = &args.report {
        let pdf = render_report(&ReportInputs {
            title: &image_id,
            annotated: &analysis.annotated,
            findings: &analysis.findings,
            summary: &analysis.summary,
            notes: session.notes(&image_id),
        })?;
        std::fs::write(path, pdf)?;
        if args.verbose {
            println!("PDF report written to {}", path.display());
        }
    }

    Ok(())
}
