//! Game context and scene management.
//!
//! [`Game`] owns the ECS world and the per-tick schedule. A host drives it by
//! pushing [`InputEvent`]s with [`Game::send`] and calling [`Game::tick`]
//! once per frame; scene changes flow through
//! [`NextGameState`] and the observer in [`crate::events::gamestate`],
//! which calls the scene hooks defined here.
//!
//! Scenes
//! - main menu: choose between playing the saved level and editing it
//! - editor: paint a [`LevelDocument`], save, load and hand it to the runtime
//! - playing: one attempt at a level, ending in game over or level complete

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

use crate::components::animation::{AnimKey, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::coin::Coin;
use crate::components::goal::Goal;
use crate::components::mapposition::MapPosition;
use crate::components::outcome::OutcomeOverlay;
use crate::components::persistent::Persistent;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::tilebody::TileBody;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::input::InputEvent;
use crate::resources::editor::LevelEditor;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, Transition};
use crate::resources::input::InputState;
use crate::resources::level::LevelDocument;
use crate::resources::levelstore::{LevelStorage, SlotStorage};
use crate::resources::playfield::Playfield;
use crate::resources::progress::Progress;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::collision::{collision_detector, collision_observer};
use crate::systems::editor::editor_system;
use crate::systems::gamestate::{
    check_pending_state, state_in_menu, state_is_editing, state_is_playing,
};
use crate::systems::input::update_input_state;
use crate::systems::menu::main_menu_system;
use crate::systems::movement::movement;
use crate::systems::outcome::outcome_system;
use crate::systems::player::player_controller;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

/// The running game: world, resources and update schedule.
pub struct Game {
    world: World,
    update: Schedule,
}

impl Game {
    /// Build the world with every global resource and persistent observer.
    /// The game starts in [`GameStates::None`]; call [`Game::start`] or
    /// [`Game::request`] to enter a scene.
    pub fn new(config: GameConfig, backend: Box<dyn SlotStorage>) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(InputState::default());
        world.init_resource::<Messages<InputEvent>>();
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(LevelStorage::new(backend, config.slot.clone()));
        world.insert_resource(Progress::default());
        world.insert_resource(config);

        world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
        world.spawn((Observer::new(collision_observer), Persistent));
        // Ensure the observers are registered before any system triggers events.
        world.flush();

        let mut update = Schedule::default();
        update.add_systems(update_input_state);
        update.add_systems(
            main_menu_system
                .run_if(state_in_menu)
                .after(update_input_state),
        );
        update.add_systems(
            editor_system
                .run_if(state_is_editing)
                .after(update_input_state),
        );
        update.add_systems(
            (
                player_controller,
                movement,
                collision_detector,
                ttl_system,
                animation,
                outcome_system,
            )
                .chain()
                .run_if(state_is_playing)
                .after(update_input_state),
        );
        // Scene changes requested this tick are applied last.
        update.add_systems(
            check_pending_state
                .after(main_menu_system)
                .after(editor_system)
                .after(outcome_system),
        );

        Self { world, update }
    }

    /// Enter the main menu.
    pub fn start(&mut self) {
        self.request(Transition::to(GameStates::MainMenu));
    }

    /// Switch scenes immediately, outside of a tick.
    pub fn request(&mut self, transition: Transition) {
        self.world.resource_mut::<NextGameState>().set(transition);
        self.world.trigger(GameStateChangedEvent {});
        self.world.flush();
    }

    /// Queue a host input event for the next tick.
    pub fn send(&mut self, event: InputEvent) {
        self.world.resource_mut::<Messages<InputEvent>>().write(event);
    }

    /// Advance the game by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);
        self.world.flush();
        self.world.clear_trackers(); // Clear changed components for next frame
    }

    pub fn state(&self) -> GameStates {
        *self.world.resource::<GameState>().get()
    }

    /// False once the game has been asked to quit.
    pub fn is_running(&self) -> bool {
        self.state() != GameStates::Quitting
    }

    pub fn progress(&self) -> &Progress {
        self.world.resource::<Progress>()
    }

    /// The editor, while the editor scene is active.
    pub fn editor(&self) -> Option<&LevelEditor> {
        self.world.get_resource::<LevelEditor>()
    }

    /// The level being played, while the runtime scene is active.
    pub fn playfield(&self) -> Option<&Playfield> {
        self.world.get_resource::<Playfield>()
    }

    /// Message of the outcome overlay, if one is shown.
    pub fn overlay(&mut self) -> Option<OutcomeOverlay> {
        let mut query = self.world.query::<&OutcomeOverlay>();
        query.iter(&self.world).next().cloned()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// Build an empty level the size the configuration asks for.
fn empty_level(config: &GameConfig) -> LevelDocument {
    LevelDocument::new(config.level_width, config.level_height, config.tile_size)
}

pub fn enter_menu(_world: &mut World) {
    info!("Main menu: Play | Level Editor");
}

/// Set up the editor scene. A document carried by the transition is edited
/// as is; otherwise the saved level is loaded over an empty one.
pub fn enter_editor(world: &mut World, level: Option<LevelDocument>) {
    let editor = match level {
        Some(document) => LevelEditor::new(document),
        None => {
            let mut editor = LevelEditor::new(empty_level(world.resource::<GameConfig>()));
            if let Err(e) = editor.load(world.resource::<LevelStorage>()) {
                debug!("Editor starts from an empty level: {}", e);
            }
            editor
        }
    };
    info!(
        "Entered editor on a {}x{} level",
        editor.document.width, editor.document.height
    );
    world.insert_resource(editor);
}

/// Set up the runtime scene: build the playfield, spawn coins, the goal and
/// the player, and reset the score.
///
/// Without a carried document the saved level is played, falling back to
/// an empty level when none can be read. A level that cannot be built is
/// logged and leaves the scene empty.
pub fn enter_play(world: &mut World, level: Option<LevelDocument>) {
    let config = world.resource::<GameConfig>().clone();
    let document = match level {
        Some(document) => document,
        None => match world.resource::<LevelStorage>().load() {
            Ok(document) => document,
            Err(e) => {
                warn!("Playing an empty level: {}", e);
                empty_level(&config)
            }
        },
    };

    world.insert_resource(Progress::default());
    let playfield = match Playfield::build(&document, &config) {
        Ok(playfield) => playfield,
        Err(e) => {
            error!("Cannot start level: {}", e);
            return;
        }
    };

    let tile = playfield.tile_size();
    for &(x, y) in &playfield.coins {
        world.spawn((
            Coin::default(),
            MapPosition {
                pos: playfield.cell_origin(x, y),
            },
            BoxCollider::new(tile.x * 0.5, tile.y * 0.5).with_offset(tile * 0.25),
        ));
    }
    if let Some((x, y)) = playfield.goal {
        world.spawn((
            Goal,
            MapPosition {
                pos: playfield.cell_origin(x, y),
            },
            BoxCollider::new(tile.x, tile.y),
        ));
    }

    let (spawn_x, spawn_y) = config.spawn;
    let (width, height) = config.player_size;
    world.spawn((
        Player::new(),
        MapPosition::new(spawn_x, spawn_y),
        RigidBody::with_gravity(config.gravity),
        BoxCollider::new(width, height),
        TileBody::default(),
        Animation::new(AnimKey::Idle),
    ));

    info!(
        "Level started: {}x{} with {} coins{}",
        document.width,
        document.height,
        playfield.coins.len(),
        if playfield.goal.is_some() { " and a goal" } else { "" }
    );
    world.insert_resource(Progress::new(playfield.coins.len() as u32));
    world.insert_resource(playfield);
}

pub fn quit_game(_world: &mut World) {
    info!("Quitting game");
}

/// Despawn every scene entity and drop the scene resources. Persistent
/// entities (observers) survive.
pub fn clean_scene(world: &mut World) {
    let mut query = world.query_filtered::<Entity, (
        Without<Persistent>,
        Or<(With<MapPosition>, With<OutcomeOverlay>)>,
    )>();
    let entities: Vec<Entity> = query.iter(world).collect();
    for entity in entities {
        world.despawn(entity);
    }
    world.remove_resource::<Playfield>();
    world.remove_resource::<LevelEditor>();
}
