//! Ninja platformer command line driver.
//!
//! Runs the game headless on the level stored in the configured slot:
//!
//! - `new` – overwrite the slot with an empty level
//! - `paint X Y TILE` / `erase X Y` – edit one cell through the level editor
//! - `show` – print the stored level as text
//! - `play --script S` – replay scripted input against the level and report
//!   the outcome
//!
//! Settings come from `config.ini` (see
//! [`GameConfig`](ninjagame::resources::gameconfig::GameConfig)); a missing
//! file means defaults.
//!
//! # Running
//!
//! ```sh
//! cargo run -- paint 3 10 ground
//! cargo run -- play --script "R*120,RU*2,R*60"
//! ```

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use ninjagame::game::Game;
use ninjagame::replay::Replay;
use ninjagame::resources::editor::{LevelEditor, Tool};
use ninjagame::resources::gameconfig::GameConfig;
use ninjagame::resources::gamestate::{GameStates, Transition};
use ninjagame::resources::level::{LevelDocument, TileCode};
use ninjagame::resources::levelstore::{FileSlotStorage, LevelError, LevelStorage};
use ninjagame::resources::progress::Outcome;

/// Tile platformer with a built-in level editor.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save an empty level to the slot.
    New {
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Paint one cell. TILE is a name (ground, coin, goal, ...) or a code.
    Paint { x: i32, y: i32, tile: TileCode },
    /// Clear one cell.
    Erase { x: i32, y: i32 },
    /// Print the stored level.
    Show,
    /// Play the stored level with scripted input.
    Play {
        /// Steps `KEYS*FRAMES` separated by commas; keys L R U A, `-` for none.
        #[arg(long, default_value = "-*60")]
        script: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if let Err(e) = run(cli.command, config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: GameConfig) -> Result<(), LevelError> {
    let mut storage = LevelStorage::new(
        Box::new(FileSlotStorage::new(&config.storage_dir)),
        config.slot.clone(),
    );

    match command {
        Command::New { width, height } => {
            let width = width.unwrap_or(config.level_width);
            let height = height.unwrap_or(config.level_height);
            LevelDocument::check_size(width, height, config.tile_size, config.tile_size)?;
            let document = LevelDocument::new(width, height, config.tile_size);
            LevelEditor::new(document).save(&mut storage)?;
            println!("Created empty level in slot '{}'", storage.slot());
        }
        Command::Paint { x, y, tile } => {
            edit_cell(&mut storage, x, y, Tool::Paint(tile))?;
        }
        Command::Erase { x, y } => {
            edit_cell(&mut storage, x, y, Tool::Eraser)?;
        }
        Command::Show => {
            let document = storage.load()?;
            println!(
                "{}x{} level, tiles {}x{}px",
                document.width, document.height, document.tilewidth, document.tileheight
            );
            print!("{}", document.to_ascii());
        }
        Command::Play { script } => {
            let replay = Replay::parse(&script).map_err(LevelError::Malformed)?;
            let dt = config.tick_seconds();
            let backend = Box::new(FileSlotStorage::new(&config.storage_dir));
            let mut game = Game::new(config, backend);
            game.request(Transition::to(GameStates::Playing));
            if game.playfield().is_none() {
                return Err(LevelError::Malformed("level could not be started".into()));
            }

            let ticks = replay.drive(&mut game, dt);
            let progress = game.progress();
            let outcome = match progress.outcome {
                Outcome::InProgress => "still running",
                Outcome::GameOver => "Game Over",
                Outcome::Won => "Level Complete!",
            };
            println!(
                "{} after {} ticks. {} ({}/{} coins)",
                outcome,
                ticks,
                progress.score_text(),
                progress.collected,
                progress.total_coins
            );
        }
    }
    Ok(())
}

/// Load the slot into an editor, apply one tool stroke and save it back.
fn edit_cell(storage: &mut LevelStorage, x: i32, y: i32, tool: Tool) -> Result<(), LevelError> {
    let mut editor = LevelEditor::new(LevelDocument::default());
    editor.load(storage)?;
    if !editor.paint_cell(x, y, tool) {
        return Err(LevelError::Malformed(format!(
            "cell ({}, {}) is outside the {}x{} level",
            x, y, editor.document.width, editor.document.height
        )));
    }
    editor.save(storage)?;
    info!("Cell ({}, {}) set to {}", x, y, tool.tile());
    Ok(())
}
