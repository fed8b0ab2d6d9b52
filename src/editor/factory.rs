use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use crate::geometry::Color;
use crate::render::Bitmap;

use super::shapes::{BitmapShape, PolygonShape, RectShape, Shape, POLYGON_MIN_SIDES};

pub const DEFAULT_ASSETS: [&str; 2] = ["apps/spock.png", "apps/wheel.png"];

const NEW_SHAPE_ALPHA: f32 = 0.5;
const POLYGON_EXTRA_SIDES: f32 = 12.0;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {path}")]
    Missing { path: PathBuf },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("asset has no pixels: {path}")]
    Empty { path: PathBuf },
}

pub type AssetResult<T> = std::result::Result<T, AssetError>;

pub trait BitmapLoader: std::fmt::Debug {
    fn load(&self, path: &Path) -> AssetResult<Bitmap>;
}

/// Decodes image files from disk, relative to the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileLoader;

impl BitmapLoader for ImageFileLoader {
    fn load(&self, path: &Path) -> AssetResult<Bitmap> {
        if !path.exists() {
            return Err(AssetError::Missing {
                path: path.to_path_buf(),
            });
        }
        let decoded = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let bitmap = Bitmap::new(decoded.to_rgba8());
        if bitmap.is_empty() {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(?path, width = bitmap.width(), height = bitmap.height(), "loaded bitmap");
        Ok(bitmap)
    }
}

/// Builds shapes for the numbered construction keys.
///
/// Indices inside the asset list produce bitmap shapes; the index right after
/// the list produces a polygon; anything else produces nothing.
#[derive(Debug)]
pub struct ShapeFactory {
    assets: Vec<PathBuf>,
    loader: Box<dyn BitmapLoader>,
}

impl Default for ShapeFactory {
    fn default() -> Self {
        Self::new(
            DEFAULT_ASSETS.iter().map(PathBuf::from).collect(),
            Box::new(ImageFileLoader),
        )
    }
}

impl ShapeFactory {
    pub fn new(assets: Vec<PathBuf>, loader: Box<dyn BitmapLoader>) -> Self {
        Self { assets, loader }
    }

    pub fn polygon_index(&self) -> usize {
        self.assets.len()
    }

    pub fn make<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: u64,
        rng: &mut R,
    ) -> AssetResult<Option<Shape>> {
        if let Some(path) = self.assets.get(index) {
            let bitmap = self.loader.load(path)?;
            return Ok(Some(Shape::Bitmap(BitmapShape::new(id, bitmap))));
        }
        if index == self.polygon_index() {
            let color = random_color(rng);
            let sides = random_polygon_sides(rng);
            return Ok(Some(Shape::Polygon(PolygonShape::new(id, color, sides))));
        }
        Ok(None)
    }

    pub fn make_rectangle<R: Rng + ?Sized>(&self, id: u64, rng: &mut R) -> Shape {
        Shape::Rectangle(RectShape::new(id, random_color(rng)))
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(rng.random(), rng.random(), rng.random(), NEW_SHAPE_ALPHA)
}

fn random_polygon_sides<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let extra = rng.random::<f32>() * POLYGON_EXTRA_SIDES;
    POLYGON_MIN_SIDES + extra as u32
}
