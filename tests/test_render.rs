use dentection::render::annotate;
use dentection::{BoundingBox, ClassCatalog, RawDetection, normalize_detections};
use image::{DynamicImage, Rgb};

const CARIES: u32 = 6;
const FRACTURA: u32 = 1;

fn test_image() -> DynamicImage {
    DynamicImage::new_rgb8(200, 160)
}

fn two_findings() -> anyhow::Result<Vec<dentection::Finding>> {
    let catalog = ClassCatalog::dental();
    let raw = vec![
        RawDetection {
            bbox: BoundingBox::new(10.0, 40.0, 60.0, 90.0),
            class_id: CARIES,
            confidence: 0.9,
        },
        RawDetection {
            bbox: BoundingBox::new(120.0, 100.0, 180.0, 150.0),
            class_id: FRACTURA,
            confidence: 0.5,
        },
    ];
    normalize_detections(&raw, &catalog, None)
}

#[test]
fn source_image_is_never_mutated() -> anyhow::Result<()> {
    let img = test_image();
    let before = img.to_rgb8();
    let findings = two_findings()?;

    let _ = annotate(&img, &findings, Some(0))?;

    assert_eq!(img.to_rgb8().as_raw(), before.as_raw());
    Ok(())
}

#[test]
fn no_findings_leaves_pixels_untouched() -> anyhow::Result<()> {
    let img = test_image();
    let annotated = annotate(&img, &[], None)?;
    assert_eq!(annotated.as_raw(), img.to_rgb8().as_raw());
    Ok(())
}

#[test]
fn rendering_is_deterministic() -> anyhow::Result<()> {
    let img = test_image();
    let findings = two_findings()?;

    let first = annotate(&img, &findings, None)?;
    let second = annotate(&img, &findings, None)?;
    assert_eq!(first.as_raw(), second.as_raw());
    Ok(())
}

#[test]
fn out_of_range_selection_behaves_like_no_selection() -> anyhow::Result<()> {
    let img = test_image();
    let findings = two_findings()?;

    let baseline = annotate(&img, &findings, None)?;
    let clamped = annotate(&img, &findings, Some(findings.len()))?;
    assert_eq!(baseline.as_raw(), clamped.as_raw());

    let way_out = annotate(&img, &findings, Some(usize::MAX))?;
    assert_eq!(baseline.as_raw(), way_out.as_raw());
    Ok(())
}

#[test]
fn selection_switches_both_findings_to_distinct_styles() -> anyhow::Result<()> {
    let img = test_image();
    let findings = two_findings()?;

    let plain = annotate(&img, &findings, None)?;
    let selected = annotate(&img, &findings, Some(0))?;

    // Top-left corner of each box sits on the drawn outline.
    let default_color = Rgb([0u8, 0, 255]);
    let highlight_color = Rgb([0u8, 255, 0]);
    let dimmed_color = Rgb([200u8, 200, 200]);

    assert_eq!(*plain.get_pixel(10, 40), default_color);
    assert_eq!(*plain.get_pixel(120, 100), default_color);

    assert_eq!(*selected.get_pixel(10, 40), highlight_color);
    assert_eq!(*selected.get_pixel(120, 100), dimmed_color);
    Ok(())
}
