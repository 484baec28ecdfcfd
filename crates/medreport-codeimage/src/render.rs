//! Offline code rendering.
//!
//! Used when the external endpoint is unreachable, so the panel can still
//! show something scannable.

use qrcode::render::svg;
use qrcode::QrCode;

use crate::{CodeImageError, CodeImageResult};

/// Render `data` as an SVG document with at least `size` pixels per edge.
pub fn render_svg(data: &str, size: u32) -> CodeImageResult<String> {
    if data.trim().is_empty() {
        return Err(CodeImageError::EmptyAddress);
    }

    let code = QrCode::new(data.as_bytes()).map_err(|e| CodeImageError::Encode(e.to_string()))?;

    let svg_string = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#1c1c1e"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build();

    Ok(svg_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg() {
        let svg = render_svg("http://localhost:8080/generated-report/MR-ABCD-123456", 200).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#1c1c1e"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_svg("https://example.test/r/1", 200).unwrap();
        let b = render_svg("https://example.test/r/1", 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_empty_rejected() {
        assert!(render_svg("", 200).is_err());
    }
}
