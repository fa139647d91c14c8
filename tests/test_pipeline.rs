use dentection::{AnalysisPipeline, ClassCatalog, DetectorOutput, viewer};
use image::DynamicImage;
use std::io::Write;

const DETECTOR_JSON: &str = r#"{
    "width": 200,
    "height": 160,
    "detections": [
        { "bbox": { "x1": 10.0, "y1": 40.0, "x2": 60.0, "y2": 90.0 }, "class_id": 6, "confidence": 0.9 },
        { "bbox": { "x1": 120.0, "y1": 100.0, "x2": 180.0, "y2": 150.0 }, "class_id": 6, "confidence": 0.81 },
        { "bbox": { "x1": 70.0, "y1": 20.0, "x2": 110.0, "y2": 60.0 }, "class_id": 1, "confidence": 0.5 }
    ]
}"#;

#[test]
fn detector_output_parses_from_json_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("detections.json");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(DETECTOR_JSON.as_bytes())?;

    let output = DetectorOutput::from_json_file(&path)?;
    assert_eq!(output.width, 200);
    assert_eq!(output.height, 160);
    assert_eq!(output.detections.len(), 3);
    assert_eq!(output.detections[0].class_id, 6);
    Ok(())
}

#[test]
fn malformed_detector_output_is_a_readable_error() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json")?;

    assert!(DetectorOutput::from_json_file(&path).is_err());
    assert!(DetectorOutput::from_json_file(dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn full_pass_filters_summarizes_and_renders() -> anyhow::Result<()> {
    let output = DetectorOutput::from_reader(DETECTOR_JSON.as_bytes())?;
    let img = DynamicImage::new_rgb8(output.width, output.height);

    let pipeline = AnalysisPipeline::new(ClassCatalog::dental());
    let analysis = pipeline.run(&img, &output.detections, Some("caries"), Some(1))?;

    assert_eq!(analysis.findings.len(), 2);
    assert_eq!(analysis.findings[0].local_index, 0);
    assert_eq!(analysis.findings[1].local_index, 1);
    assert_eq!(analysis.summary.count("caries"), 2);
    assert_eq!(analysis.summary.count("fractura"), 0);
    assert_eq!(analysis.annotated.dimensions(), (200, 160));
    Ok(())
}

#[test]
fn viewer_payload_is_a_jpeg_data_uri() -> anyhow::Result<()> {
    let output = DetectorOutput::from_reader(DETECTOR_JSON.as_bytes())?;
    let img = DynamicImage::new_rgb8(output.width, output.height);

    let pipeline = AnalysisPipeline::new(ClassCatalog::dental());
    let analysis = pipeline.run(&img, &output.detections, None, None)?;

    let payload = viewer::viewer_payload(&analysis.annotated)?;
    assert!(payload.starts_with("data:image/jpeg;base64,"));
    assert!(payload.len() > "data:image/jpeg;base64,".len());
    Ok(())
}
