//! Scripted input for headless runs.
//!
//! A script is a comma-separated list of steps `KEYS*FRAMES`. `KEYS` is any
//! combination of `L` (left), `R` (right), `U` (up/jump) and `A` (attack),
//! or `-` for no key. During a step exactly those keys are held for
//! `FRAMES` ticks. `*FRAMES` may be omitted for a single tick.
//!
//! ```text
//! R*30,RU*2,R*40,A,-*60
//! ```

use log::debug;
use smallvec::SmallVec;

use crate::events::input::{InputAction, InputEvent};
use crate::game::Game;

const KEYS: [(char, InputAction); 4] = [
    ('L', InputAction::Left),
    ('R', InputAction::Right),
    ('U', InputAction::Up),
    ('A', InputAction::Attack),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub keys: SmallVec<[InputAction; 4]>,
    pub frames: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Replay {
    pub steps: Vec<ReplayStep>,
}

impl Replay {
    pub fn parse(script: &str) -> Result<Self, String> {
        let mut steps = Vec::new();
        for token in script.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (keys_text, frames) = match token.split_once('*') {
                Some((keys, frames)) => {
                    let frames = frames
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| format!("bad frame count in '{}': {}", token, e))?;
                    (keys.trim(), frames)
                }
                None => (token, 1),
            };
            let mut keys: SmallVec<[InputAction; 4]> = SmallVec::new();
            if keys_text != "-" {
                for c in keys_text.chars() {
                    let action = KEYS
                        .iter()
                        .find(|(key, _)| *key == c.to_ascii_uppercase())
                        .map(|(_, action)| *action)
                        .ok_or_else(|| format!("unknown key '{}' in '{}'", c, token))?;
                    if !keys.contains(&action) {
                        keys.push(action);
                    }
                }
            }
            steps.push(ReplayStep { keys, frames });
        }
        Ok(Self { steps })
    }

    /// Total ticks the script lasts.
    pub fn frames(&self) -> u32 {
        self.steps.iter().map(|s| s.frames).sum()
    }

    /// Feed the script into `game`, ticking `dt` seconds per frame. Stops
    /// early once the attempt has an outcome. Returns the ticks run.
    pub fn drive(&self, game: &mut Game, dt: f32) -> u32 {
        let mut held: SmallVec<[InputAction; 4]> = SmallVec::new();
        let mut ticks = 0;
        for step in &self.steps {
            for action in held.iter().filter(|a| !step.keys.contains(*a)) {
                game.send(InputEvent::release(*action));
            }
            for action in step.keys.iter().filter(|a| !held.contains(*a)) {
                game.send(InputEvent::press(*action));
            }
            held = step.keys.clone();
            debug!("replay step {:?} for {} frames", step.keys, step.frames);

            for _ in 0..step.frames {
                game.tick(dt);
                ticks += 1;
                if game.progress().is_terminal() {
                    return ticks;
                }
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_and_defaults_to_one_frame() {
        let replay = Replay::parse("R*30, RU*2,A,-*10").unwrap();
        assert_eq!(replay.steps.len(), 4);
        assert_eq!(
            replay.steps[1].keys.as_slice(),
            &[InputAction::Right, InputAction::Up]
        );
        assert_eq!(replay.steps[2].frames, 1);
        assert!(replay.steps[3].keys.is_empty());
        assert_eq!(replay.frames(), 43);
    }

    #[test]
    fn lowercase_keys_are_accepted() {
        let replay = Replay::parse("lu*3").unwrap();
        assert_eq!(
            replay.steps[0].keys.as_slice(),
            &[InputAction::Left, InputAction::Up]
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_counts() {
        assert!(Replay::parse("X*3").is_err());
        assert!(Replay::parse("R*many").is_err());
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert_eq!(Replay::parse("").unwrap().frames(), 0);
    }
}
