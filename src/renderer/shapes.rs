//! Shape generation for 2D primitives
//!
//! All shapes are emitted in play-area coordinates (y down) as triangle lists.

use glam::Vec2;

use super::vertex::Vertex;

/// Append an axis-aligned rectangle (two triangles)
///
/// Degenerate rectangles are skipped.
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    if max.x <= min.x || max.y <= min.y {
        return;
    }
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Seven-segment layout: top, top-right, bottom-right, bottom, bottom-left,
/// top-left, middle
const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

/// Segment rectangles for one digit, relative to its top-left corner
fn segment_rects(size: Vec2, thickness: f32) -> [(Vec2, Vec2); 7] {
    let (w, h, t) = (size.x, size.y, thickness);
    let mid = h / 2.0;
    [
        (Vec2::new(0.0, 0.0), Vec2::new(w, t)),
        (Vec2::new(w - t, 0.0), Vec2::new(w, mid)),
        (Vec2::new(w - t, mid), Vec2::new(w, h)),
        (Vec2::new(0.0, h - t), Vec2::new(w, h)),
        (Vec2::new(0.0, mid), Vec2::new(t, h)),
        (Vec2::new(0.0, 0.0), Vec2::new(t, mid)),
        (Vec2::new(0.0, mid - t / 2.0), Vec2::new(w, mid + t / 2.0)),
    ]
}

/// Append one seven-segment digit with an outline
///
/// `digit` must be 0-9; anything else draws nothing.
pub fn digit(
    out: &mut Vec<Vertex>,
    digit: u32,
    top_left: Vec2,
    size: Vec2,
    fill: [f32; 4],
    border: [f32; 4],
) {
    let Some(lit) = DIGIT_SEGMENTS.get(digit as usize) else {
        return;
    };
    let thickness = (size.x * 0.22).max(1.0);
    let pad = Vec2::splat((thickness * 0.25).max(1.0));

    for (on, (min, max)) in lit.iter().zip(segment_rects(size, thickness)) {
        if !on {
            continue;
        }
        rect(out, top_left + min - pad, top_left + max + pad, border);
        rect(out, top_left + min, top_left + max, fill);
    }
}

/// Append a whole number centred horizontally on `center_x`
pub fn number(
    out: &mut Vec<Vertex>,
    value: u32,
    center_x: f32,
    top: f32,
    digit_size: Vec2,
    fill: [f32; 4],
    border: [f32; 4],
) {
    let digits: Vec<u32> = value
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    let spacing = digit_size.x * 0.35;
    let total = digits.len() as f32 * (digit_size.x + spacing) - spacing;
    let mut x = center_x - total / 2.0;

    for d in digits {
        digit(out, d, Vec2::new(x, top), digit_size, fill, border);
        x += digit_size.x + spacing;
    }
}
