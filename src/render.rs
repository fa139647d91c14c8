use ab_glyph::{FontRef, PxScale};
use anyhow::Context;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::findings::Finding;

const LABEL_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

const COLOR_DEFAULT: Rgb<u8> = Rgb([0, 0, 255]);
const COLOR_HIGHLIGHT: Rgb<u8> = Rgb([0, 255, 0]);
const COLOR_DIMMED: Rgb<u8> = Rgb([200, 200, 200]);

const TEXT_OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);
const TEXT_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// How one finding's box and label are drawn. Three tiers exist: every box
/// defaults to the same emphasized style, and only while a selection is
/// active does the selected box get the highlight style with all others
/// dimmed.
#[derive(Debug, Clone, Copy)]
struct BoxStyle {
    color: Rgb<u8>,
    thickness: u32,
    font_px: f32,
}

const STYLE_DEFAULT: BoxStyle = BoxStyle {
    color: COLOR_DEFAULT,
    thickness: 5,
    font_px: 28.0,
};

const STYLE_HIGHLIGHT: BoxStyle = BoxStyle {
    color: COLOR_HIGHLIGHT,
    thickness: 5,
    font_px: 28.0,
};

const STYLE_DIMMED: BoxStyle = BoxStyle {
    color: COLOR_DIMMED,
    thickness: 2,
    font_px: 22.0,
};

/// Draw every finding onto a copy of the source image.
///
/// `selected` must be a `local_index` into `findings`; anything out of range
/// is treated as no selection, since the index may belong to a filter state
/// that no longer exists. The source buffer is never touched.
pub fn annotate(
    image: &DynamicImage,
    findings: &[Finding],
    selected: Option<usize>,
) -> anyhow::Result<RgbImage> {
    let font = FontRef::try_from_slice(LABEL_FONT).context("failed to load embedded label font")?;
    let mut canvas = image.to_rgb8();

    let selected = selected.filter(|&idx| idx < findings.len());

    for finding in findings {
        let style = match selected {
            Some(idx) if idx == finding.local_index => STYLE_HIGHLIGHT,
            Some(_) => STYLE_DIMMED,
            None => STYLE_DEFAULT,
        };
        draw_finding(&mut canvas, finding, style, &font);
    }

    Ok(canvas)
}

fn draw_finding(canvas: &mut RgbImage, finding: &Finding, style: BoxStyle, font: &FontRef<'_>) {
    let x1 = finding.bbox.x1.round() as i32;
    let y1 = finding.bbox.y1.round() as i32;
    let x2 = finding.bbox.x2.round() as i32;
    let y2 = finding.bbox.y2.round() as i32;
    let width = (x2 - x1).max(1) as u32;
    let height = (y2 - y1).max(1) as u32;

    draw_thick_rect(canvas, x1, y1, width, height, style.thickness, style.color);

    let label = format!("{} {:.2}", finding.label, finding.confidence);
    let scale = PxScale::from(style.font_px);
    let (text_w, text_h) = text_size(scale, font, &label);

    // Filled strip directly above the box's top-left corner, sized to the text.
    let pad = 3i32;
    let strip_h = text_h as i32 + 2 * pad;
    let strip_y = y1 - strip_h;
    draw_filled_rect_mut(
        canvas,
        Rect::at(x1, strip_y).of_size(text_w + 2 * pad as u32, strip_h as u32),
        style.color,
    );

    // Two-pass text: dark outline stamps around the glyphs, then the light
    // fill on top, so labels stay legible over any background.
    let text_x = x1 + pad;
    let text_y = strip_y + pad;
    for dx in -1..=1i32 {
        for dy in -1..=1i32 {
            if dx == 0 && dy == 0 {
                continue;
            }
            draw_text_mut(
                canvas,
                TEXT_OUTLINE,
                text_x + dx,
                text_y + dy,
                scale,
                font,
                &label,
            );
        }
    }
    draw_text_mut(canvas, TEXT_FILL, text_x, text_y, scale, font, &label);
}

/// imageproc only strokes 1px rectangles, so thickness comes from nested
/// inner rectangles, clipped so they never invert.
fn draw_thick_rect(canvas: &mut RgbImage, x: i32, y: i32, w: u32, h: u32, thickness: u32, color: Rgb<u8>) {
    draw_hollow_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
    let max_inset = (thickness as i32).min(w as i32 / 2).min(h as i32 / 2);
    for inset in 1..max_inset {
        let inner_w = (w - 2 * inset as u32).max(1);
        let inner_h = (h - 2 * inset as u32).max(1);
        draw_hollow_rect_mut(
            canvas,
            Rect::at(x + inset, y + inset).of_size(inner_w, inner_h),
            color,
        );
    }
}
