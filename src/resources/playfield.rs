//! Runtime view of a level: solid tile grid, entity spawn cells and the
//! move-and-collide step for bodies.
//!
//! Built once per attempt from a [`LevelDocument`]. Coin and goal cells are
//! lifted out of the grid into spawn lists so they never block movement.

use bevy_ecs::prelude::Resource;
use bevy_math::Vec2;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::tilebody::TileBody;
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::{LevelDocument, TileCode};
use crate::resources::levelstore::LevelError;

#[derive(Resource, Debug, Clone)]
pub struct Playfield {
    width: u32,
    height: u32,
    tile_size: Vec2,
    tiles: Vec<TileCode>,
    /// Cells holding a coin, row-major order.
    pub coins: Vec<(u32, u32)>,
    /// Cell holding the goal, if any.
    pub goal: Option<(u32, u32)>,
    /// The document this playfield was built from, kept for restarts.
    pub source: LevelDocument,
}

impl Playfield {
    /// Build the playfield for `document`.
    ///
    /// Fails when the document references a tileset the game does not
    /// provide or holds more than one goal.
    pub fn build(document: &LevelDocument, config: &GameConfig) -> Result<Self, LevelError> {
        document.validate()?;
        if let Some(tileset) = document.tilesets.first() {
            if !config.knows_tileset(&tileset.name) {
                return Err(LevelError::MissingTileset(tileset.name.clone()));
            }
        }
        let goals = document.count(TileCode::Goal);
        if goals > 1 {
            return Err(LevelError::MultipleGoals { count: goals });
        }

        let mut tiles = Vec::with_capacity(document.width as usize * document.height as usize);
        let mut coins = Vec::new();
        let mut goal = None;
        for (x, y, tile) in document.cells() {
            match tile {
                TileCode::Coin => {
                    coins.push((x, y));
                    tiles.push(TileCode::Empty);
                }
                TileCode::Goal => {
                    goal = Some((x, y));
                    tiles.push(TileCode::Empty);
                }
                other => tiles.push(other),
            }
        }

        Ok(Self {
            width: document.width,
            height: document.height,
            tile_size: Vec2::new(document.tilewidth as f32, document.tileheight as f32),
            tiles,
            coins,
            goal,
            source: document.clone(),
        })
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size.x
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size.y
    }

    /// Top-left pixel of cell `(x, y)`.
    pub fn cell_origin(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    /// Whether cell `(x, y)` blocks movement. Cells outside the grid never do.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.tiles
            .get(y as usize * self.width as usize + x as usize)
            .is_some_and(|tile| tile.is_solid())
    }

    /// Solid cells overlapped by the box `[min, max)`.
    fn solid_cells(&self, min: Vec2, max: Vec2) -> SmallVec<[(i32, i32); 8]> {
        let x0 = (min.x / self.tile_size.x).floor() as i32;
        let y0 = (min.y / self.tile_size.y).floor() as i32;
        let x1 = (max.x / self.tile_size.x).ceil() as i32 - 1;
        let y1 = (max.y / self.tile_size.y).ceil() as i32 - 1;
        let mut cells = SmallVec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.is_solid(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Move a body by `delta`, resolving penetration into solid tiles one
    /// axis at a time. Velocity along a blocked axis is zeroed.
    ///
    /// Movement is split into sub-steps of at most half a tile so fast
    /// bodies cannot skip through a tile.
    pub fn move_body(
        &self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        collider: &BoxCollider,
        delta: Vec2,
    ) -> TileBody {
        let mut facts = TileBody::default();
        let max_step = (self.tile_size.min_element() * 0.5).max(1.0);
        let steps = (delta.abs().max_element() / max_step).ceil().max(1.0) as u32;
        let mut step = delta / steps as f32;

        for _ in 0..steps {
            if step.x != 0.0 {
                position.x += step.x;
                let (min, max) = collider.aabb(*position);
                let cells = self.solid_cells(min, max);
                if !cells.is_empty() {
                    if step.x > 0.0 {
                        let left = cells.iter().map(|c| c.0).min().unwrap_or(0);
                        position.x -= max.x - left as f32 * self.tile_size.x;
                    } else {
                        let right = cells.iter().map(|c| c.0).max().unwrap_or(0) + 1;
                        position.x += right as f32 * self.tile_size.x - min.x;
                    }
                    velocity.x = 0.0;
                    step.x = 0.0;
                }
            }
            if step.y != 0.0 {
                position.y += step.y;
                let (min, max) = collider.aabb(*position);
                let cells = self.solid_cells(min, max);
                if !cells.is_empty() {
                    if step.y > 0.0 {
                        let top = cells.iter().map(|c| c.1).min().unwrap_or(0);
                        position.y -= max.y - top as f32 * self.tile_size.y;
                        facts.grounded = true;
                    } else {
                        let bottom = cells.iter().map(|c| c.1).max().unwrap_or(0) + 1;
                        position.y += bottom as f32 * self.tile_size.y - min.y;
                    }
                    velocity.y = 0.0;
                    step.y = 0.0;
                }
            }
        }

        self.clamp_to_bounds(position, velocity, collider);
        facts
    }

    /// Keep the body inside the level horizontally and below the top edge.
    /// The bottom stays open so bodies can fall out of the level.
    fn clamp_to_bounds(&self, position: &mut Vec2, velocity: &mut Vec2, collider: &BoxCollider) {
        let (min, max) = collider.aabb(*position);
        if min.x < 0.0 {
            position.x -= min.x;
            velocity.x = velocity.x.max(0.0);
        } else if max.x > self.pixel_width() {
            position.x -= max.x - self.pixel_width();
            velocity.x = velocity.x.min(0.0);
        }
        if min.y < 0.0 {
            position.y -= min.y;
            velocity.y = velocity.y.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: u32, height: u32, solid: &[(i32, i32)]) -> Playfield {
        let mut doc = LevelDocument::new(width, height, 32);
        for &(x, y) in solid {
            doc.set_tile(x, y, TileCode::Ground);
        }
        Playfield::build(&doc, &GameConfig::new()).unwrap()
    }

    #[test]
    fn coins_and_goal_are_lifted_out_of_the_grid() {
        let mut doc = LevelDocument::new(3, 1, 32);
        doc.set_tile(0, 0, TileCode::Coin);
        doc.set_tile(1, 0, TileCode::Goal);
        doc.set_tile(2, 0, TileCode::Coin);
        let field = Playfield::build(&doc, &GameConfig::new()).unwrap();
        assert_eq!(field.coins, vec![(0, 0), (2, 0)]);
        assert_eq!(field.goal, Some((1, 0)));
        assert!(!field.is_solid(0, 0));
        assert!(!field.is_solid(1, 0));
    }

    #[test]
    fn multiple_goals_are_rejected() {
        let mut doc = LevelDocument::new(3, 1, 32);
        doc.set_tile(0, 0, TileCode::Goal);
        doc.set_tile(2, 0, TileCode::Goal);
        match Playfield::build(&doc, &GameConfig::new()) {
            Err(LevelError::MultipleGoals { count }) => assert_eq!(count, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_tileset_is_rejected() {
        let mut doc = LevelDocument::new(1, 1, 32);
        doc.tilesets[0].name = "castle".into();
        assert!(matches!(
            Playfield::build(&doc, &GameConfig::new()),
            Err(LevelError::MissingTileset(name)) if name == "castle"
        ));
    }

    #[test]
    fn falling_body_lands_on_ground() {
        let field = field(2, 2, &[(0, 1)]);
        let collider = BoxCollider::new(16.0, 16.0);
        let mut pos = Vec2::new(0.0, 10.0);
        let mut vel = Vec2::new(0.0, 300.0);
        let facts = field.move_body(&mut pos, &mut vel, &collider, Vec2::new(0.0, 20.0));
        assert!(facts.grounded);
        assert_eq!(pos.y, 16.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let field = field(3, 1, &[(2, 0)]);
        let collider = BoxCollider::new(16.0, 16.0);
        let mut pos = Vec2::new(40.0, 0.0);
        let mut vel = Vec2::new(160.0, 0.0);
        let facts = field.move_body(&mut pos, &mut vel, &collider, Vec2::new(20.0, 0.0));
        assert!(!facts.grounded);
        assert_eq!(pos.x, 48.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn fast_body_does_not_tunnel() {
        let field = field(1, 4, &[(0, 2)]);
        let collider = BoxCollider::new(16.0, 16.0);
        let mut pos = Vec2::new(0.0, 0.0);
        let mut vel = Vec2::new(0.0, 6000.0);
        let facts = field.move_body(&mut pos, &mut vel, &collider, Vec2::new(0.0, 100.0));
        assert!(facts.grounded);
        assert!((pos.y - 48.0).abs() < 1e-3);
    }

    #[test]
    fn bottom_is_open_and_sides_are_closed() {
        let field = field(2, 2, &[]);
        let collider = BoxCollider::new(16.0, 16.0);
        let mut pos = Vec2::new(60.0, 60.0);
        let mut vel = Vec2::new(100.0, 100.0);
        field.move_body(&mut pos, &mut vel, &collider, Vec2::new(10.0, 10.0));
        assert_eq!(pos.x, 48.0);
        assert_eq!(vel.x, 0.0);
        assert_eq!(pos.y, 70.0);
    }
}
