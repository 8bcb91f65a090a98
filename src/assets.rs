// Loads the face artwork once at startup and derives each window shape.
// A missing or unreadable image is fatal: a faceless window can't be shaped.

use std::path::Path;

use image::RgbaImage;

use crate::error::Error;
use crate::faces::{FacePreset, PRESETS};
use crate::mask::heuristic_mask;
use crate::types::{FaceImage, Mask};

/// A preset together with its decoded image and window shape.
pub struct Face {
    pub preset: &'static FacePreset,
    pub image: FaceImage,
    pub mask: Mask,
}

/// Every selectable face, in menu order.
pub struct FaceLibrary {
    faces: Vec<Face>,
}

impl FaceLibrary {
    /// Decode all presets from `dir`.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let mut images = Vec::with_capacity(PRESETS.len());
        for preset in &PRESETS {
            let image = load_face_image(&dir.join(preset.image))?;
            tracing::debug!(face = preset.name, width = image.width, height = image.height, "loaded face");
            images.push((preset, image));
        }
        Ok(Self::from_images(images))
    }

    /// Build from already-decoded images; masks are derived here.
    pub fn from_images<I>(images: I) -> Self
    where
        I: IntoIterator<Item = (&'static FacePreset, FaceImage)>,
    {
        let mut faces: Vec<Face> = images
            .into_iter()
            .map(|(preset, image)| {
                let mask = heuristic_mask(&image);
                Face { preset, image, mask }
            })
            .collect();
        faces.sort_by_key(|f| f.preset.name);
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, index: usize) -> &Face {
        &self.faces[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.faces.iter().position(|f| f.preset.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.faces.iter().map(|f| f.preset.name)
    }
}

pub fn load_face_image(path: &Path) -> Result<FaceImage, Error> {
    let decoded = image::open(path).map_err(|source| Error::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_face_image(&decoded.to_rgba8()))
}

/// Pack RGBA bytes as 0xAARRGGBB.
fn to_face_image(rgba: &RgbaImage) -> FaceImage {
    let (w, h) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
        })
        .collect();
    FaceImage { width: w as usize, height: h as usize, pixels }
}
