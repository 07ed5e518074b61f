//! Fixed timestep simulation tick
//!
//! Advances one level session by a single frame: input, jump, physics,
//! collision, landing, animation, camera. Always in that order.

use super::collision::{self, Contact};
use super::cricket::CricketState;
use super::input::TickInput;
use super::jump;
use super::physics;
use super::state::GameState;

/// Something that happened during a tick, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped { strength: i32 },
    Bounced,
    Landed,
    Drowned,
    Won { jumps: u32 },
    LevelChanged { level: usize },
}

/// Result of a tick
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Player asked to quit
    pub quit: bool,
    /// Player asked to toggle fullscreen
    pub toggle_fullscreen: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut result = TickResult::default();

    // Frozen on the win screen until the player moves on
    if state.win {
        if input.advance {
            state.advance_level();
            result.events.push(GameEvent::LevelChanged { level: state.level });
        }
        return result;
    }

    if state.settings.debug_mode {
        // Skip ends the level as if the exit was reached
        if input.next_level {
            log::info!("Skipping level {}", state.level);
            state.win = true;
            result.events.push(GameEvent::Won { jumps: state.jumps });
            return result;
        }
        if input.reset_jumps {
            state.jumps = 0;
        }
    }

    state.time_ticks += 1;

    // Jump
    let press = input.press(state.settings.viewport_width);
    if let Some(strength) = jump::apply_press(&mut state.cricket, press, &state.settings) {
        state.record_jump(strength);
        result.events.push(GameEvent::Jumped { strength });
    }

    // Decay and motion
    let decay_tick = physics::step_counter(&mut state.wait, state.settings.wait_time);
    if decay_tick {
        physics::decay(&mut state.cricket);
    }

    let before = state.cricket.position;
    let level = &state.pack.levels[state.level];
    physics::integrate(&mut state.cricket, level.width);

    // Collision response
    let was_airborne = state.cricket.airborne;
    if let Some(&tile) = collision::detect(level, &state.cricket.hitbox()) {
        match collision::respond(&mut state.cricket, &tile, before, level, &state.pack.tiles) {
            Contact::Drowned => {
                log::info!("Hit water, restarting level");
                state.reset(state.level);
                result.events.push(GameEvent::Drowned);
                return result;
            }
            Contact::Won => {
                log::info!("Found the exit after {} jumps, you win!", state.jumps);
                state.win = true;
                result.events.push(GameEvent::Won { jumps: state.jumps });
                return result;
            }
            Contact::Bounced => result.events.push(GameEvent::Bounced),
            // Resting on a passable tile keeps reporting contact
            Contact::Landed if was_airborne => result.events.push(GameEvent::Landed),
            Contact::Landed => {}
        }
    }

    if state.cricket.airborne && state.cricket.velocity.y <= 0 {
        state.cricket.state = CricketState::Landing;
    }

    state.cricket.animate(decay_tick);

    let extent = state.current_level().size();
    state.camera.follow(state.cricket.focus(), extent);

    result
}
