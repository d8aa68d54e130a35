//! Level editor state.
//!
//! [`LevelEditor`] owns the document being edited and the active tool. All
//! persistence goes through [`LevelStorage`]; a failed load never touches
//! the document in memory.

use bevy_ecs::prelude::Resource;
use log::{info, warn};

use crate::resources::level::{LevelDocument, TileCode};
use crate::resources::levelstore::{LevelError, LevelStorage};

/// What a click on the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Paint(TileCode),
    Eraser,
}

impl Tool {
    /// Code written into a painted cell.
    pub fn tile(self) -> TileCode {
        match self {
            Tool::Paint(tile) => tile,
            Tool::Eraser => TileCode::Empty,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct LevelEditor {
    pub document: LevelDocument,
    /// Palette selection, kept while the eraser is on.
    pub selected: TileCode,
    pub eraser: bool,
    /// Last message shown to the user (saved, load failures, ...).
    pub notice: Option<String>,
}

impl LevelEditor {
    /// Editor over `document` with ground selected.
    pub fn new(document: LevelDocument) -> Self {
        Self {
            document,
            selected: TileCode::Ground,
            eraser: false,
            notice: None,
        }
    }

    pub fn active_tool(&self) -> Tool {
        if self.eraser {
            Tool::Eraser
        } else {
            Tool::Paint(self.selected)
        }
    }

    /// Pick a palette tile; this also turns the eraser off.
    pub fn select_tile(&mut self, tile: TileCode) {
        self.selected = tile;
        self.eraser = false;
    }

    pub fn toggle_eraser(&mut self) {
        self.eraser = !self.eraser;
    }

    /// Set cell `(x, y)` to `tool`'s code. Out-of-bounds cells are ignored.
    /// Returns whether a cell was written.
    pub fn paint_cell(&mut self, x: i32, y: i32, tool: Tool) -> bool {
        self.document.set_tile(x, y, tool.tile())
    }

    /// Paint with the active tool at a screen position. Only the grid's own
    /// pixel area is editable.
    pub fn paint_at(&mut self, px: f32, py: f32) -> bool {
        if px < 0.0
            || py < 0.0
            || px >= self.document.pixel_width()
            || py >= self.document.pixel_height()
        {
            return false;
        }
        let x = (px / self.document.tilewidth as f32).floor() as i32;
        let y = (py / self.document.tileheight as f32).floor() as i32;
        self.paint_cell(x, y, self.active_tool())
    }

    /// Write the document to the storage slot.
    pub fn save(&mut self, storage: &mut LevelStorage) -> Result<(), LevelError> {
        match storage.save(&self.document) {
            Ok(()) => {
                self.notice = Some("Level saved!".to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Saving level failed: {}", e);
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the document with the slot's content. On any failure the
    /// current document is kept.
    pub fn load(&mut self, storage: &LevelStorage) -> Result<(), LevelError> {
        match storage.load() {
            Ok(document) => {
                info!(
                    "Editor loaded {}x{} level",
                    document.width, document.height
                );
                self.document = document;
                self.notice = Some("Level loaded".to_string());
                Ok(())
            }
            Err(e) => {
                match &e {
                    LevelError::NotFound { .. } => {
                        self.notice = Some("No saved level found!".to_string())
                    }
                    other => {
                        warn!("Loading level failed: {}", other);
                        self.notice = Some(other.to_string());
                    }
                }
                Err(e)
            }
        }
    }

    /// Save, then hand the document over for a test run. The document is
    /// refused when it cannot be played.
    pub fn hand_to_runtime(&mut self, storage: &mut LevelStorage) -> Result<LevelDocument, LevelError> {
        self.save(storage)?;
        let goals = self.document.count(TileCode::Goal);
        if goals > 1 {
            let e = LevelError::MultipleGoals { count: goals };
            warn!("Refusing to test level: {}", e);
            self.notice = Some(e.to_string());
            return Err(e);
        }
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::levelstore::MemorySlotStorage;

    fn storage() -> LevelStorage {
        LevelStorage::new(Box::new(MemorySlotStorage::new()), "savedLevel")
    }

    #[test]
    fn eraser_overrides_selection_until_a_tile_is_picked() {
        let mut editor = LevelEditor::new(LevelDocument::new(2, 2, 32));
        editor.select_tile(TileCode::Coin);
        editor.toggle_eraser();
        assert_eq!(editor.active_tool(), Tool::Eraser);
        editor.toggle_eraser();
        assert_eq!(editor.active_tool(), Tool::Paint(TileCode::Coin));
        editor.toggle_eraser();
        editor.select_tile(TileCode::Grass);
        assert_eq!(editor.active_tool(), Tool::Paint(TileCode::Grass));
    }

    #[test]
    fn painting_touches_only_the_target_cell() {
        let mut editor = LevelEditor::new(LevelDocument::new(3, 3, 32));
        editor.paint_cell(1, 1, Tool::Paint(TileCode::Platform));
        let before = editor.document.clone();
        for tool in [Tool::Paint(TileCode::Goal), Tool::Eraser] {
            assert!(editor.paint_cell(2, 0, tool));
            for (x, y, tile) in editor.document.cells() {
                if (x, y) == (2, 0) {
                    assert_eq!(tile, tool.tile());
                } else {
                    assert_eq!(Some(tile), before.tile(x as i32, y as i32));
                }
            }
        }
        assert!(!editor.paint_cell(3, 0, Tool::Paint(TileCode::Goal)));
        assert!(!editor.paint_cell(0, -1, Tool::Eraser));
        assert_eq!(editor.document, before);
    }

    #[test]
    fn paint_at_maps_pixels_to_cells() {
        let mut editor = LevelEditor::new(LevelDocument::new(4, 4, 32));
        assert!(editor.paint_at(70.0, 33.0));
        assert_eq!(editor.document.tile(2, 1), Some(TileCode::Ground));
        assert!(!editor.paint_at(128.0, 0.0));
        assert!(!editor.paint_at(-1.0, 0.0));
    }

    #[test]
    fn missing_slot_reports_and_keeps_document() {
        let mut editor = LevelEditor::new(LevelDocument::new(2, 2, 32));
        editor.paint_cell(0, 0, Tool::Paint(TileCode::Ground));
        let before = editor.document.clone();
        assert!(matches!(
            editor.load(&storage()),
            Err(LevelError::NotFound { .. })
        ));
        assert_eq!(editor.document, before);
        assert_eq!(editor.notice.as_deref(), Some("No saved level found!"));
    }

    #[test]
    fn hand_off_refuses_two_goals_but_still_saves() {
        let mut store = storage();
        let mut editor = LevelEditor::new(LevelDocument::new(3, 1, 32));
        editor.paint_cell(0, 0, Tool::Paint(TileCode::Goal));
        editor.paint_cell(2, 0, Tool::Paint(TileCode::Goal));
        assert!(matches!(
            editor.hand_to_runtime(&mut store),
            Err(LevelError::MultipleGoals { count: 2 })
        ));
        assert_eq!(store.load().unwrap(), editor.document);
    }
}
