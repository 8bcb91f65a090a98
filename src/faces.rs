// The built-in faces: artwork file plus hand-tuned eye placement per face.

/// Eye placement in image pixels: center (x, y), total width/height (w, h).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeGeometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

const fn eye(x: i32, y: i32, w: i32, h: i32) -> EyeGeometry {
    EyeGeometry { x, y, w, h }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePreset {
    pub name: &'static str,
    pub image: &'static str, // file name inside the asset directory
    pub eyes: [EyeGeometry; 2],
}

/// Sorted by name; the context menu lists them in this order.
pub static PRESETS: [FacePreset; 5] = [
    FacePreset { name: "Aaron", image: "aaron.png", eyes: [eye(49, 63, 12, 8), eye(79, 63, 12, 8)] },
    FacePreset { name: "Adrian", image: "adrian.png", eyes: [eye(46, 67, 11, 6), eye(74, 68, 11, 6)] },
    FacePreset { name: "Cornelius", image: "cornelius.png", eyes: [eye(49, 68, 11, 6), eye(79, 68, 11, 6)] },
    FacePreset { name: "Eva", image: "eva.png", eyes: [eye(51, 63, 12, 6), eye(83, 63, 12, 6)] },
    FacePreset { name: "Sebastian", image: "sebastian.png", eyes: [eye(50, 58, 14, 7), eye(83, 58, 14, 7)] },
];
