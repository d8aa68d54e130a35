//! Scene flow tests driving a whole [`Game`] through host input.

use bevy_ecs::prelude::{Entity, With};
use bevy_math::Vec2;

use ninjagame::components::animation::{AnimKey, Animation};
use ninjagame::components::coin::Coin;
use ninjagame::components::mapposition::MapPosition;
use ninjagame::components::player::Player;
use ninjagame::components::tilebody::TileBody;
use ninjagame::events::input::{InputAction, InputEvent, UiButton};
use ninjagame::game::Game;
use ninjagame::resources::gameconfig::GameConfig;
use ninjagame::resources::gamestate::{GameStates, Transition};
use ninjagame::resources::level::{LevelDocument, TileCode, encode};
use ninjagame::resources::levelstore::{LevelStorage, MemorySlotStorage};
use ninjagame::resources::progress::Outcome;

const DT: f32 = 1.0 / 60.0;
const SLOT: &str = "savedLevel";

fn small_config() -> GameConfig {
    let mut config = GameConfig::new();
    config.level_width = 4;
    config.level_height = 4;
    config.spawn = (0.0, 0.0);
    config.player_size = (16.0, 16.0);
    config
}

fn game_with_slot(text: Option<&str>) -> Game {
    let mut backend = MemorySlotStorage::new();
    if let Some(text) = text {
        backend = backend.with_slot(SLOT, text);
    }
    Game::new(small_config(), Box::new(backend))
}

/// 2x2 level: the given top row over a solid floor.
fn two_by_two(top: [TileCode; 2]) -> LevelDocument {
    let mut doc = LevelDocument::new(2, 2, 32);
    doc.set_tile(0, 0, top[0]);
    doc.set_tile(1, 0, top[1]);
    doc.set_tile(0, 1, TileCode::Ground);
    doc.set_tile(1, 1, TileCode::Ground);
    doc
}

fn ticks(game: &mut Game, n: usize) {
    for _ in 0..n {
        game.tick(DT);
    }
}

fn click(game: &mut Game, button: UiButton) {
    game.send(InputEvent::Button(button));
    game.tick(DT);
}

fn tap(game: &mut Game, action: InputAction) {
    game.send(InputEvent::press(action));
    game.tick(DT);
    game.send(InputEvent::release(action));
    game.tick(DT);
}

fn player(game: &mut Game) -> Option<(Player, Vec2)> {
    let world = game.world_mut();
    let mut query = world.query::<(&Player, &MapPosition)>();
    query
        .iter(world)
        .next()
        .map(|(player, position)| (player.clone(), position.pos))
}

fn player_entity(game: &mut Game) -> Option<Entity> {
    let world = game.world_mut();
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.iter(world).next()
}

fn coin_count(game: &mut Game) -> usize {
    let world = game.world_mut();
    let mut query = world.query::<&Coin>();
    query.iter(world).count()
}

fn stored(game: &Game) -> Option<String> {
    game.world().resource::<LevelStorage>().raw().unwrap()
}

#[test]
fn menu_routes_to_editor_play_and_quit() {
    let mut game = game_with_slot(None);
    assert_eq!(game.state(), GameStates::None);
    game.start();
    assert_eq!(game.state(), GameStates::MainMenu);

    click(&mut game, UiButton::LevelEditor);
    assert_eq!(game.state(), GameStates::Editor);
    let editor = game.editor().unwrap();
    assert_eq!(editor.notice.as_deref(), Some("No saved level found!"));
    assert_eq!((editor.document.width, editor.document.height), (4, 4));

    tap(&mut game, InputAction::Back);
    assert_eq!(game.state(), GameStates::MainMenu);
    assert!(game.editor().is_none());

    click(&mut game, UiButton::Play);
    assert_eq!(game.state(), GameStates::Playing);
    assert!(game.playfield().is_some());

    tap(&mut game, InputAction::Back);
    assert_eq!(game.state(), GameStates::Editor);
    tap(&mut game, InputAction::Back);
    tap(&mut game, InputAction::Back);
    assert_eq!(game.state(), GameStates::Quitting);
    assert!(!game.is_running());
}

#[test]
fn minimal_saved_level_spawns_goal_without_coins() {
    let mut game = game_with_slot(Some(r#"{"width":2,"height":1,"layers":[{"data":[0,4]}]}"#));
    game.start();
    click(&mut game, UiButton::Play);

    let playfield = game.playfield().unwrap();
    assert_eq!(playfield.goal, Some((1, 0)));
    assert!(playfield.coins.is_empty());
    assert_eq!(game.progress().total_coins, 0);
}

#[test]
fn corrupted_slot_plays_an_empty_level() {
    let mut game = game_with_slot(Some("{not json"));
    game.start();
    click(&mut game, UiButton::Play);

    let playfield = game.playfield().unwrap();
    assert_eq!(playfield.source, LevelDocument::new(4, 4, 32));
    assert!(player(&mut game).is_some());
}

#[test]
fn oversized_slot_plays_an_empty_level() {
    let mut game = game_with_slot(Some(
        r#"{"width":65536,"height":65536,"layers":[{"data":[]}]}"#,
    ));
    game.start();
    click(&mut game, UiButton::Play);

    assert_eq!(game.playfield().unwrap().source, LevelDocument::new(4, 4, 32));
    ticks(&mut game, 120);
    assert!(player(&mut game).is_some());
}

#[test]
fn unknown_tileset_aborts_scene_setup() {
    let mut doc = LevelDocument::new(2, 2, 32);
    doc.tilesets[0].name = "castle".into();
    let text = encode(&doc).unwrap();
    let mut game = game_with_slot(Some(&text));
    game.start();
    click(&mut game, UiButton::Play);

    assert_eq!(game.state(), GameStates::Playing);
    assert!(game.playfield().is_none());
    assert!(player(&mut game).is_none());

    tap(&mut game, InputAction::Back);
    assert_eq!(game.state(), GameStates::Editor);
}

#[test]
fn editor_paints_saves_and_hands_off() {
    let mut game = game_with_slot(None);
    game.request(Transition::to(GameStates::Editor));

    game.send(InputEvent::PointerDown { x: 40.0, y: 100.0 });
    game.send(InputEvent::PointerMove { x: 72.0, y: 100.0 });
    game.send(InputEvent::PointerUp { x: 72.0, y: 100.0 });
    game.send(InputEvent::PointerMove { x: 104.0, y: 100.0 });
    game.tick(DT);
    let doc = &game.editor().unwrap().document;
    assert_eq!(doc.tile(1, 3), Some(TileCode::Ground));
    assert_eq!(doc.tile(2, 3), Some(TileCode::Ground));
    assert_eq!(doc.tile(3, 3), Some(TileCode::Empty));

    click(&mut game, UiButton::SelectTile(TileCode::Coin));
    game.send(InputEvent::PointerDown { x: 40.0, y: 70.0 });
    game.send(InputEvent::PointerUp { x: 40.0, y: 70.0 });
    // Outside the editable area.
    game.send(InputEvent::PointerDown { x: 500.0, y: 70.0 });
    game.send(InputEvent::PointerUp { x: 500.0, y: 70.0 });
    game.tick(DT);
    assert_eq!(game.editor().unwrap().document.tile(1, 2), Some(TileCode::Coin));

    tap(&mut game, InputAction::ToggleEraser);
    game.send(InputEvent::PointerDown { x: 72.0, y: 100.0 });
    game.send(InputEvent::PointerUp { x: 72.0, y: 100.0 });
    game.tick(DT);
    assert_eq!(game.editor().unwrap().document.tile(2, 3), Some(TileCode::Empty));

    assert!(stored(&game).is_none());
    tap(&mut game, InputAction::Save);
    assert_eq!(game.editor().unwrap().notice.as_deref(), Some("Level saved!"));
    let edited = game.editor().unwrap().document.clone();
    assert_eq!(stored(&game), Some(encode(&edited).unwrap()));

    click(&mut game, UiButton::TestLevel);
    assert_eq!(game.state(), GameStates::Playing);
    assert_eq!(game.playfield().unwrap().source, edited);
    assert_eq!(game.progress().total_coins, 1);
    assert_eq!(coin_count(&mut game), 1);
}

#[test]
fn two_goals_block_the_test_run() {
    let mut doc = LevelDocument::new(3, 1, 32);
    doc.set_tile(0, 0, TileCode::Goal);
    doc.set_tile(2, 0, TileCode::Goal);
    let mut game = game_with_slot(None);
    game.request(Transition::with_level(GameStates::Editor, doc.clone()));

    click(&mut game, UiButton::TestLevel);

    assert_eq!(game.state(), GameStates::Editor);
    assert!(game.editor().unwrap().notice.as_deref().unwrap().contains("2 goal"));
    assert_eq!(stored(&game), Some(encode(&doc).unwrap()));
}

#[test]
fn editor_load_keeps_document_on_corrupted_slot() {
    let mut game = game_with_slot(Some("[[1,2],[3,4]]"));
    let mut doc = LevelDocument::new(2, 2, 32);
    doc.set_tile(0, 0, TileCode::Spike);
    game.request(Transition::with_level(GameStates::Editor, doc.clone()));

    click(&mut game, UiButton::LoadLevel);

    let editor = game.editor().unwrap();
    assert_eq!(editor.document, doc);
    assert!(editor.notice.as_deref().unwrap().contains("legacy"));
}

#[test]
fn reaching_the_goal_completes_and_proceeds_to_editor() {
    let doc = two_by_two([TileCode::Empty, TileCode::Goal]);
    let mut game = game_with_slot(None);
    game.request(Transition::with_level(GameStates::Playing, doc.clone()));

    game.send(InputEvent::press(InputAction::Right));
    ticks(&mut game, 30);

    assert_eq!(game.progress().outcome, Outcome::Won);
    let overlay = game.overlay().unwrap();
    assert_eq!(overlay.message, "Level Complete!");
    assert_eq!(overlay.action, UiButton::Proceed);

    // The player is frozen where it touched the goal.
    let (_, frozen_at) = player(&mut game).unwrap();
    ticks(&mut game, 10);
    assert_eq!(player(&mut game).unwrap().1, frozen_at);

    // Only the overlay's own action is honoured.
    click(&mut game, UiButton::Restart);
    assert_eq!(game.state(), GameStates::Playing);
    click(&mut game, UiButton::Proceed);
    assert_eq!(game.state(), GameStates::Editor);
    assert_eq!(game.editor().unwrap().document, doc);
    assert!(game.overlay().is_none());
    assert!(player(&mut game).is_none());
}

#[test]
fn coin_pickup_then_fall_then_restart_resets_the_attempt() {
    // 2x3 level: a one-tile ledge on the left, a coin above the gap.
    let mut doc = LevelDocument::new(2, 3, 32);
    doc.set_tile(1, 0, TileCode::Coin);
    doc.set_tile(0, 1, TileCode::Ground);
    let mut game = game_with_slot(None);
    game.request(Transition::with_level(GameStates::Playing, doc.clone()));

    // Land on the ledge.
    ticks(&mut game, 30);
    let (p, pos) = player(&mut game).unwrap();
    assert!(p.alive);
    assert!((pos.y - 16.0).abs() < 1e-3, "y = {}", pos.y);

    // Walk right through the coin and off the ledge.
    game.send(InputEvent::press(InputAction::Right));
    ticks(&mut game, 120);

    let progress = game.progress().clone();
    assert_eq!(progress.score, 10);
    assert_eq!(progress.collected, 1);
    assert_eq!(progress.total_coins, 1);
    assert_eq!(progress.outcome, Outcome::GameOver);
    assert_eq!(progress.score_text(), "Score: 10");
    assert_eq!(coin_count(&mut game), 0);
    let (p, _) = player(&mut game).unwrap();
    assert!(!p.alive);
    assert_eq!(game.overlay().unwrap().message, "Game Over");

    game.send(InputEvent::release(InputAction::Right));
    click(&mut game, UiButton::Restart);

    assert_eq!(game.state(), GameStates::Playing);
    let progress = game.progress();
    assert_eq!((progress.score, progress.collected), (0, 0));
    assert_eq!(progress.outcome, Outcome::InProgress);
    assert_eq!(coin_count(&mut game), 1);
    assert!(game.overlay().is_none());
    let (p, pos) = player(&mut game).unwrap();
    assert!(p.alive && !p.attacking);
    assert!(pos.y < 16.0);
}

#[test]
fn falling_onto_a_coin_then_the_ground() {
    let mut doc = LevelDocument::new(2, 2, 32);
    doc.set_tile(0, 0, TileCode::Coin);
    doc.set_tile(0, 1, TileCode::Ground);
    let mut game = game_with_slot(None);
    game.request(Transition::with_level(GameStates::Playing, doc));
    assert_eq!(game.progress().total_coins, 1);

    ticks(&mut game, 40);

    let progress = game.progress();
    assert_eq!(progress.score, 10);
    assert_eq!(progress.collected, 1);
    assert_eq!(progress.outcome, Outcome::InProgress);
    let (p, pos) = player(&mut game).unwrap();
    assert!(p.alive);
    assert!((pos.y - 16.0).abs() < 1e-3, "y = {}", pos.y);
    let world = game.world_mut();
    let mut query = world.query::<(&Player, &TileBody)>();
    let (_, body) = query.iter(world).next().unwrap();
    assert!(body.grounded);
}

#[test]
fn leaving_mid_attack_drops_the_pending_attack() {
    let doc = two_by_two([TileCode::Empty, TileCode::Empty]);
    let mut game = game_with_slot(None);
    game.request(Transition::with_level(GameStates::Playing, doc.clone()));
    ticks(&mut game, 30);

    tap(&mut game, InputAction::Attack);
    let (p, _) = player(&mut game).unwrap();
    assert!(p.attacking);
    let old = player_entity(&mut game).unwrap();

    // Back to the editor and straight into a new attempt, well inside the
    // attack duration.
    tap(&mut game, InputAction::Back);
    assert_eq!(game.state(), GameStates::Editor);
    assert!(player_entity(&mut game).is_none());
    click(&mut game, UiButton::TestLevel);
    assert_eq!(game.state(), GameStates::Playing);

    let fresh = player_entity(&mut game).unwrap();
    assert!(game.world().get::<Player>(old).is_none());
    let (p, _) = player(&mut game).unwrap();
    assert!(!p.attacking);
    assert_eq!(p.attack_deadline, None);

    // Run past the old deadline: nothing ends an attack that never started.
    ticks(&mut game, 40);
    let (p, _) = player(&mut game).unwrap();
    assert!(p.alive && !p.attacking);
    assert_eq!(player_entity(&mut game), Some(fresh));
    assert_eq!(
        game.world().get::<Animation>(fresh).unwrap().key,
        AnimKey::Idle
    );
}
