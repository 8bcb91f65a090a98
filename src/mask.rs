// Derives the window shape from the face artwork.
// The background color is whatever most corners agree on; every pixel of
// that color reachable from the border is cut away, as are fully
// transparent pixels. Background-colored islands inside the face stay.

use crate::types::{FaceImage, Mask};

/// Pick the background color from the four corners (majority, ties -> top-left).
fn background_color(image: &FaceImage) -> u32 {
    let (w, h) = (image.width, image.height);
    let corners = [
        image.pixel(0, 0),
        image.pixel(w - 1, 0),
        image.pixel(0, h - 1),
        image.pixel(w - 1, h - 1),
    ];
    let mut best = corners[0];
    let mut best_count = 0;
    for &c in &corners {
        let count = corners.iter().filter(|&&o| o == c).count();
        if count > best_count {
            best = c;
            best_count = count;
        }
    }
    best
}

pub fn heuristic_mask(image: &FaceImage) -> Mask {
    let (w, h) = (image.width, image.height);
    let mut opaque: Vec<bool> = image.pixels.iter().map(|&p| p >> 24 != 0).collect();
    if w == 0 || h == 0 {
        return Mask { width: w, height: h, opaque };
    }

    let bg = background_color(image);
    let mut visited = vec![false; w * h];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    let seed = |x: usize, y: usize, stack: &mut Vec<(usize, usize)>| {
        if image.pixel(x, y) == bg {
            stack.push((x, y));
        }
    };
    for x in 0..w {
        seed(x, 0, &mut stack);
        seed(x, h - 1, &mut stack);
    }
    for y in 0..h {
        seed(0, y, &mut stack);
        seed(w - 1, y, &mut stack);
    }

    // Iterative 4-connected flood fill over background-colored pixels.
    while let Some((x, y)) = stack.pop() {
        let idx = y * w + x;
        if visited[idx] || image.pixels[idx] != bg {
            continue;
        }
        visited[idx] = true;
        opaque[idx] = false;

        if x > 0 { stack.push((x - 1, y)); }
        if x + 1 < w { stack.push((x + 1, y)); }
        if y > 0 { stack.push((x, y - 1)); }
        if y + 1 < h { stack.push((x, y + 1)); }
    }

    Mask { width: w, height: h, opaque }
}
