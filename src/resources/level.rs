//! Level document and tile codes.
//!
//! A level is a map document in the shape produced by common tile map
//! editors: dimensions, a tileset reference, and one or more layers each
//! holding a flat, row-major array of tile codes. Code `0` is the empty
//! cell; every other code is the tileset index plus one.
//!
//! Only the first layer is edited and played. Extra layers survive a
//! load/save cycle untouched.
//!
//! The text codec lives here too ([`encode`] / [`decode`]) so that the
//! editor and the runtime agree byte for byte on the stored format.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::levelstore::LevelError;

/// Format version written into new documents.
pub const FORMAT_VERSION: &str = "1.0";
/// Name of the tileset every new document references.
pub const DEFAULT_TILESET: &str = "tiles";
/// Largest accepted width or height, in cells.
pub const MAX_DIMENSION: u32 = 4096;
/// Largest accepted tile width or height, in pixels.
pub const MAX_TILE_SIZE: u32 = 1024;
const DEFAULT_TILE_SIZE: u32 = 32;
const DEFAULT_LAYER_NAME: &str = "ground";

/// What a grid cell contains.
///
/// The numbering is part of the stored format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TileCode {
    #[default]
    Empty,
    Ground,
    Platform,
    Grass,
    Goal,
    Coin,
    Spike,
}

impl TileCode {
    /// Every tile in palette order.
    pub const ALL: [TileCode; 7] = [
        TileCode::Empty,
        TileCode::Ground,
        TileCode::Platform,
        TileCode::Grass,
        TileCode::Goal,
        TileCode::Coin,
        TileCode::Spike,
    ];

    /// Stored integer for this tile.
    pub fn code(self) -> u32 {
        match self {
            TileCode::Empty => 0,
            TileCode::Ground => 1,
            TileCode::Platform => 2,
            TileCode::Grass => 3,
            TileCode::Goal => 4,
            TileCode::Coin => 5,
            TileCode::Spike => 6,
        }
    }

    /// Whether the player collides with this tile.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            TileCode::Ground | TileCode::Platform | TileCode::Grass | TileCode::Spike
        )
    }

    /// Lowercase name, as shown in the editor palette.
    pub fn name(self) -> &'static str {
        match self {
            TileCode::Empty => "empty",
            TileCode::Ground => "ground",
            TileCode::Platform => "platform",
            TileCode::Grass => "grass",
            TileCode::Goal => "goal",
            TileCode::Coin => "coin",
            TileCode::Spike => "spike",
        }
    }

    /// Single character used by text dumps of a grid.
    pub fn glyph(self) -> char {
        match self {
            TileCode::Empty => '.',
            TileCode::Ground => '#',
            TileCode::Platform => '=',
            TileCode::Grass => '"',
            TileCode::Goal => 'G',
            TileCode::Coin => 'o',
            TileCode::Spike => '^',
        }
    }
}

impl TryFrom<u32> for TileCode {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TileCode::ALL
            .iter()
            .copied()
            .find(|tile| tile.code() == value)
            .ok_or_else(|| format!("unknown tile code {}", value))
    }
}

impl From<TileCode> for u32 {
    fn from(tile: TileCode) -> Self {
        tile.code()
    }
}

/// Parses a tile name (`"coin"`) or its stored code (`"5"`).
impl std::str::FromStr for TileCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u32>() {
            return TileCode::try_from(code);
        }
        TileCode::ALL
            .iter()
            .copied()
            .find(|tile| tile.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tile '{}'", s))
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to the tileset the codes index into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetRef {
    pub firstgid: u32,
    pub name: String,
}

/// One layer of tile codes, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    #[serde(default = "default_layer_name")]
    pub name: String,
    pub data: Vec<TileCode>,
}

/// A whole level as it is stored and handed between scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDocument {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Tile width in pixels.
    #[serde(default = "default_tile_size")]
    pub tilewidth: u32,
    /// Tile height in pixels.
    #[serde(default = "default_tile_size")]
    pub tileheight: u32,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
    pub layers: Vec<TileLayer>,
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

fn default_layer_name() -> String {
    DEFAULT_LAYER_NAME.to_string()
}

impl Default for LevelDocument {
    fn default() -> Self {
        Self::new(24, 24, DEFAULT_TILE_SIZE)
    }
}

impl LevelDocument {
    /// Create an all-empty document with one layer.
    ///
    /// Sizes are clamped into `1..=MAX_DIMENSION` cells and
    /// `1..=MAX_TILE_SIZE` pixels; use [`LevelDocument::check_size`] first
    /// to reject bad input instead.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        let width = width.clamp(1, MAX_DIMENSION);
        let height = height.clamp(1, MAX_DIMENSION);
        let tile_size = tile_size.clamp(1, MAX_TILE_SIZE);
        Self {
            width,
            height,
            tilewidth: tile_size,
            tileheight: tile_size,
            version: default_version(),
            tilesets: vec![TilesetRef {
                firstgid: 1,
                name: DEFAULT_TILESET.to_string(),
            }],
            layers: vec![TileLayer {
                name: default_layer_name(),
                data: vec![TileCode::Empty; width as usize * height as usize],
            }],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)` on the active layer, `None` when out of bounds.
    pub fn tile(&self, x: i32, y: i32) -> Option<TileCode> {
        let index = self.index(x, y)?;
        self.layers.first()?.data.get(index).copied()
    }

    /// Overwrite the tile at `(x, y)`. Returns `false` and leaves the
    /// document untouched when out of bounds.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileCode) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        match self.layers.first_mut().and_then(|l| l.data.get_mut(index)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Iterate `(x, y, tile)` over the active layer in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, TileCode)> + '_ {
        let width = self.width.max(1);
        self.layers
            .first()
            .into_iter()
            .flat_map(|layer| layer.data.iter())
            .enumerate()
            .map(move |(i, tile)| (i as u32 % width, i as u32 / width, *tile))
    }

    /// Number of cells on the active layer holding `tile`.
    pub fn count(&self, tile: TileCode) -> usize {
        self.cells().filter(|(_, _, t)| *t == tile).count()
    }

    /// Level height in pixels.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tileheight as f32
    }

    /// Level width in pixels.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tilewidth as f32
    }

    /// Check grid and tile sizes against the accepted ranges. Returns the
    /// number of cells a layer of that grid holds.
    pub fn check_size(
        width: u32,
        height: u32,
        tilewidth: u32,
        tileheight: u32,
    ) -> Result<usize, LevelError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(LevelError::Malformed(format!(
                "level dimensions must be within 1..={}, got {}x{}",
                MAX_DIMENSION, width, height
            )));
        }
        if tilewidth == 0
            || tileheight == 0
            || tilewidth > MAX_TILE_SIZE
            || tileheight > MAX_TILE_SIZE
        {
            return Err(LevelError::Malformed(format!(
                "tile size must be within 1..={}, got {}x{}",
                MAX_TILE_SIZE, tilewidth, tileheight
            )));
        }
        width
            .checked_mul(height)
            .map(|cells| cells as usize)
            .ok_or_else(|| LevelError::Malformed("level has too many cells".into()))
    }

    /// Check the structural invariants of a decoded document.
    pub fn validate(&self) -> Result<(), LevelError> {
        let expected =
            Self::check_size(self.width, self.height, self.tilewidth, self.tileheight)?;
        if self.layers.is_empty() {
            return Err(LevelError::Malformed("level has no layers".into()));
        }
        for layer in &self.layers {
            if layer.data.len() != expected {
                return Err(LevelError::Malformed(format!(
                    "layer '{}' holds {} cells, expected {}",
                    layer.name,
                    layer.data.len(),
                    expected
                )));
            }
        }
        Ok(())
    }

    /// Render the active layer as lines of glyphs, one per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for (x, _, tile) in self.cells() {
            out.push(tile.glyph());
            if x + 1 == self.width {
                out.push('\n');
            }
        }
        out
    }
}

/// Serialize a document to its stored text form. Documents that would not
/// decode again are refused.
pub fn encode(document: &LevelDocument) -> Result<String, LevelError> {
    document.validate()?;
    serde_json::to_string(document).map_err(|e| LevelError::Malformed(e.to_string()))
}

/// Parse stored text into a validated document.
pub fn decode(text: &str) -> Result<LevelDocument, LevelError> {
    let document: LevelDocument = serde_json::from_str(text).map_err(|e| {
        if text.trim_start().starts_with('[') {
            LevelError::Malformed("legacy array-grid levels are not supported".into())
        } else {
            LevelError::Malformed(e.to_string())
        }
    })?;
    document.validate()?;
    Ok(document)
}
