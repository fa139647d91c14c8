use image::{DynamicImage, RgbImage};

use crate::catalog::ClassCatalog;
use crate::findings::{self, Finding, SummaryCounts};
use crate::models::RawDetection;
use crate::render;

/// Result of one full pipeline pass over one image.
pub struct ImageAnalysis {
    pub findings: Vec<Finding>,
    pub summary: SummaryCounts,
    pub annotated: RgbImage,
}

/// Orchestrates the normalize → summarize → annotate pass that runs after
/// every user action (navigation, filter change, row selection).
///
/// All inputs are immutable snapshots; each run produces a fresh
/// [`ImageAnalysis`] and retains nothing.
pub struct AnalysisPipeline {
    catalog: ClassCatalog,
    verbose: bool,
}

impl AnalysisPipeline {
    pub fn new(catalog: ClassCatalog) -> Self {
        Self {
            catalog,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn run(
        &self,
        image: &DynamicImage,
        raw: &[RawDetection],
        filter: Option<&str>,
        selected: Option<usize>,
    ) -> anyhow::Result<ImageAnalysis> {
        if self.verbose {
            match filter {
                Some(label) => println!("Normalizing {} detections (filter: {})", raw.len(), label),
                None => println!("Normalizing {} detections", raw.len()),
            }
        }
        let findings = findings::normalize_detections(raw, &self.catalog, filter)?;

        if self.verbose {
            println!("  → {} findings", findings.len());
        }
        let summary = findings::summarize(&findings);

        if self.verbose {
            println!("Rendering annotated image (selected: {:?})", selected);
        }
        let annotated = render::annotate(image, &findings, selected)?;

        Ok(ImageAnalysis {
            findings,
            summary,
            annotated,
        })
    }
}
