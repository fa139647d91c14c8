use std::io::Cursor;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

/// Encode an annotated image as the JPEG blob handed to the embeddable
/// zoomable viewer. Fire-and-forget: the viewer gives nothing back.
pub fn encode_jpeg(image: &RgbImage) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), 90);
    image
        .write_with_encoder(encoder)
        .context("failed to encode annotated image as JPEG")?;
    Ok(bytes)
}

/// Base64 data URI form of [`encode_jpeg`], suitable for inlining into the
/// viewer's tile source.
pub fn viewer_payload(image: &RgbImage) -> anyhow::Result<String> {
    let jpeg = encode_jpeg(image)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg)))
}
