use std::io::Cursor;

use anyhow::Context;
use image::RgbImage;
use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::findings::{Finding, SummaryCounts};
use crate::viewer;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 10.0;
const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;
const IMAGE_DPI: f32 = 300.0;

// Column split of the detail table, matching the original report layout.
const TABLE_COL_W: f32 = CONTENT_W / 2.0;

/// Everything the report needs for one image, captured as an immutable
/// snapshot: the findings are the filter-respecting list, the notes are in
/// append order.
pub struct ReportInputs<'a> {
    pub title: &'a str,
    pub annotated: &'a RgbImage,
    pub findings: &'a [Finding],
    pub summary: &'a SummaryCounts,
    pub notes: &'a [String],
}

/// Assemble the per-image PDF report.
///
/// Sections appear in a fixed order and are always present; empty data gets
/// an explicit placeholder line instead of an omitted section. Returns the
/// complete document bytes or an error, never a partial document.
pub fn render_report(inputs: &ReportInputs<'_>) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Reporte: {}", inputs.title),
        Mm(PAGE_W),
        Mm(PAGE_H),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_H - MARGIN,
    };

    // 1. Title
    writer.line(&format!("Reporte: {}", inputs.title), 16.0, 10.0, &bold);
    writer.space(5.0);

    // 2. Summary counts
    writer.line("Resumen de Hallazgos:", 12.0, 10.0, &bold);
    if inputs.summary.is_empty() {
        writer.line("No se detectaron afecciones.", 10.0, 6.0, &regular);
    } else {
        for (label, count) in inputs.summary.iter() {
            writer.line(&format!("- {}: {}", label, count), 10.0, 6.0, &regular);
        }
    }
    writer.space(5.0);

    // 3. Annotated image, scaled to the content width
    embed_annotated_image(&mut writer, inputs.annotated)?;
    writer.space(10.0);

    // 4. Detail table
    writer.line("Detalle de Detecciones:", 12.0, 10.0, &bold);
    writer.table_row("Clase Predicha", "Confianza de Predicción", &bold);
    if inputs.findings.is_empty() {
        writer.table_row("Sin detecciones", "", &regular);
    } else {
        for finding in inputs.findings {
            writer.table_row(
                &finding.label,
                &format!("{:.2}%", finding.confidence * 100.0),
                &regular,
            );
        }
    }
    writer.space(10.0);

    // 5. Specialist notes
    writer.line("Notas del Especialista:", 12.0, 10.0, &bold);
    if inputs.notes.is_empty() {
        writer.line("Sin notas registradas.", 10.0, 8.0, &regular);
    } else {
        for note in inputs.notes {
            writer.line(&format!("- {}", note), 10.0, 8.0, &regular);
        }
    }

    doc.save_to_bytes().context("failed to serialize PDF report")
}

/// Re-encode the annotated buffer as an in-memory JPEG and embed it. The
/// intermediate bytes live only for the duration of this call; an encode or
/// decode failure aborts the whole report.
fn embed_annotated_image(writer: &mut PageWriter<'_>, annotated: &RgbImage) -> anyhow::Result<()> {
    let jpeg = viewer::encode_jpeg(annotated)?;
    let decoder = JpegDecoder::new(Cursor::new(jpeg.as_slice()))
        .context("failed to re-read annotated JPEG for embedding")?;
    let pdf_image = Image::try_from(decoder).context("failed to embed annotated image")?;

    let natural_w_mm = annotated.width() as f32 / IMAGE_DPI * 25.4;
    let natural_h_mm = annotated.height() as f32 / IMAGE_DPI * 25.4;
    let scale = CONTENT_W / natural_w_mm;
    let display_h = natural_h_mm * scale;

    writer.ensure_room(display_h);
    writer.y -= display_h;
    pdf_image.add_to_layer(
        writer.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN)),
            translate_y: Some(Mm(writer.y)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
    Ok(())
}

/// Top-down text cursor over A4 pages, breaking onto a new page whenever a
/// block would run past the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_H - MARGIN;
        }
    }

    fn line(&mut self, text: &str, size: f32, leading: f32, font: &IndirectFontRef) {
        self.ensure_room(leading);
        self.y -= leading;
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
    }

    fn table_row(&mut self, left: &str, right: &str, font: &IndirectFontRef) {
        self.ensure_room(8.0);
        self.y -= 8.0;
        self.layer.use_text(left, 10.0, Mm(MARGIN), Mm(self.y), font);
        self.layer
            .use_text(right, 10.0, Mm(MARGIN + TABLE_COL_W), Mm(self.y), font);
    }

    fn space(&mut self, amount: f32) {
        self.y -= amount;
    }
}
