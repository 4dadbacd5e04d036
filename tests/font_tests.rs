//! Typeface Font Tests
//!
//! Tests for:
//! - Parsing the typeface JSON glyph format
//! - Outline command flattening (lines, quadratic curves)
//! - Hole classification by containment
//! - Scaled advance lookup and error reporting

use heartfield::assets::font::Font;
use heartfield::errors::HeartfieldError;

/// Two glyphs: `I` is a plain bar, `O` is a ring (outer contour + hole).
const TEST_FONT: &str = r#"{
  "familyName": "Testface",
  "resolution": 1000,
  "glyphs": {
    "I": { "ha": 300, "o": "m 0 0 l 200 0 l 200 700 l 0 700" },
    "O": { "ha": 600, "o": "m 0 0 l 400 0 l 400 700 l 0 700 m 100 100 l 100 600 l 300 600 l 300 100" },
    " ": { "ha": 250 }
  }
}"#;

#[test]
fn parses_glyphs_and_family() {
    let font = Font::parse(TEST_FONT.as_bytes()).unwrap();
    assert_eq!(font.family.as_deref(), Some("Testface"));
    assert_eq!(font.glyph_count(), 3);
    assert!(font.glyph('I').is_some());
    assert!(font.glyph('Q').is_none());
}

#[test]
fn advance_scales_with_size() {
    let font = Font::parse(TEST_FONT.as_bytes()).unwrap();
    let advance = font.advance('I', 2.5).unwrap();
    assert!((advance - 0.75).abs() < 1e-6, "300 * 2.5 / 1000, got {advance}");
    assert!(font.advance('Q', 2.5).is_none());
}

#[test]
fn simple_glyph_is_one_shape_without_holes() {
    let font = Font::parse(TEST_FONT.as_bytes()).unwrap();
    let shapes = font.glyph_shapes('I', 1.0, 5).unwrap();

    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].contour.len(), 4);
    assert!(shapes[0].holes.is_empty());

    // Scaled by size / resolution.
    let max_y = shapes[0]
        .contour
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max);
    assert!((max_y - 0.7).abs() < 1e-6);
}

#[test]
fn ring_glyph_gets_a_hole() {
    let font = Font::parse(TEST_FONT.as_bytes()).unwrap();
    let shapes = font.glyph_shapes('O', 2.0, 5).unwrap();

    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].holes.len(), 1);
    assert_eq!(shapes[0].contour.len(), 4);
    assert_eq!(shapes[0].holes[0].len(), 4);
}

#[test]
fn whitespace_glyph_has_no_shapes() {
    let font = Font::parse(TEST_FONT.as_bytes()).unwrap();
    let shapes = font.glyph_shapes(' ', 1.0, 5).unwrap();
    assert!(shapes.is_empty());
}

#[test]
fn quadratic_curves_are_subdivided() {
    // End point first, control point second, per the typeface convention.
    let json = r#"{
      "resolution": 100,
      "glyphs": { "D": { "ha": 100, "o": "m 0 0 l 100 0 q 100 100 120 50" } }
    }"#;
    let font = Font::parse(json.as_bytes()).unwrap();

    let shapes = font.glyph_shapes('D', 1.0, 4).unwrap();
    assert_eq!(shapes.len(), 1);
    // 2 line points + 4 curve subdivisions.
    assert_eq!(shapes[0].contour.len(), 6);

    // The curve must end at the command's end point (scaled by 1/100).
    let last = shapes[0].contour[5];
    assert!((last.x - 1.0).abs() < 1e-6);
    assert!((last.y - 1.0).abs() < 1e-6);
}

#[test]
fn rejects_malformed_outline() {
    let json = r#"{ "glyphs": { "X": { "ha": 1, "o": "m 0" } } }"#;
    let err = Font::parse(json.as_bytes()).unwrap_err();
    assert!(matches!(err, HeartfieldError::FontParseFailed(_)));
}

#[test]
fn rejects_unknown_command() {
    let json = r#"{ "glyphs": { "X": { "ha": 1, "o": "w 1 2" } } }"#;
    let err = Font::parse(json.as_bytes()).unwrap_err();
    assert!(matches!(err, HeartfieldError::FontParseFailed(_)));
}

#[test]
fn rejects_invalid_json() {
    let err = Font::parse(b"not json").unwrap_err();
    assert!(matches!(err, HeartfieldError::JsonError(_)));
}
