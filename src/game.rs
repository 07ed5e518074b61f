//! Top-level game: loading lifecycle plus the per-frame update

use crate::loader::{LoadError, Loader, validate};
use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput, TickResult, tick};

/// Where the game is in its startup
#[derive(Debug)]
pub enum Lifecycle {
    /// Levels still loading in the background
    Loading(Loader),
    /// Playing
    Ready(Box<GameState>),
}

#[derive(Debug)]
pub struct Game {
    settings: Settings,
    seed: u64,
    lifecycle: Lifecycle,
}

impl Game {
    pub fn new(settings: Settings, seed: u64, loader: Loader) -> Self {
        Self {
            settings,
            seed,
            lifecycle: Lifecycle::Loading(loader),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Loading(_))
    }

    pub fn state(&self) -> Option<&GameState> {
        match &self.lifecycle {
            Lifecycle::Ready(state) => Some(state.as_ref()),
            Lifecycle::Loading(_) => None,
        }
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.lifecycle {
            Lifecycle::Ready(state) => Some(state.as_mut()),
            Lifecycle::Loading(_) => None,
        }
    }

    /// Run one frame
    ///
    /// Quit and fullscreen are honoured at any time. Gameplay waits for
    /// loading to finish. A failed load is returned as an error and should
    /// end the process.
    pub fn update(&mut self, input: &TickInput) -> Result<TickResult, LoadError> {
        let service = TickResult {
            quit: input.quit,
            toggle_fullscreen: input.toggle_fullscreen,
            ..Default::default()
        };
        if service.quit {
            log::info!("Game quit by player");
            return Ok(service);
        }

        if let Lifecycle::Loading(loader) = &self.lifecycle {
            match loader.poll() {
                None => return Ok(service),
                Some(result) => {
                    let pack = result?;
                    validate(&pack)?;
                    log::info!("Loaded {} levels", pack.levels.len());
                    let state = GameState::new(pack, self.settings.clone(), self.seed);
                    self.lifecycle = Lifecycle::Ready(Box::new(state));
                }
            }
        }

        let Lifecycle::Ready(state) = &mut self.lifecycle else {
            return Ok(service);
        };
        let mut result = tick(state, input);
        result.toggle_fullscreen = service.toggle_fullscreen;
        Ok(result)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        match &self.lifecycle {
            Lifecycle::Ready(state) => state.snapshot(),
            Lifecycle::Loading(_) => Snapshot::loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::tests::test_pack;
    use std::sync::mpsc;

    #[test]
    fn test_loading_then_ready() {
        let (release, gate) = mpsc::channel::<()>();
        let loader = Loader::spawn(move || {
            gate.recv().ok();
            Ok(test_pack())
        });
        let mut game = Game::new(Settings::default(), 5, loader);

        let input = TickInput {
            toggle_fullscreen: true,
            ..Default::default()
        };
        let result = game.update(&input).unwrap();
        assert!(game.is_loading());
        assert!(result.toggle_fullscreen);
        assert!(game.snapshot().loading);

        release.send(()).unwrap();
        for _ in 0..1000 {
            game.update(&TickInput::default()).unwrap();
            if !game.is_loading() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert!(!game.is_loading());
        let snapshot = game.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.level, 0);
    }

    #[test]
    fn test_quit_while_loading() {
        let (_hold, gate) = mpsc::channel::<()>();
        let loader = Loader::spawn(move || {
            gate.recv().ok();
            Ok(test_pack())
        });
        let mut game = Game::new(Settings::default(), 5, loader);
        let result = game
            .update(&TickInput {
                quit: true,
                ..Default::default()
            })
            .unwrap();
        assert!(result.quit);
    }

    #[test]
    fn test_failed_load_is_fatal() {
        let loader = Loader::spawn(|| Err(LoadError::NoLevels));
        let mut game = Game::new(Settings::default(), 5, loader);
        let mut outcome = Ok(TickResult::default());
        for _ in 0..1000 {
            outcome = game.update(&TickInput::default());
            if outcome.is_err() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert!(matches!(outcome, Err(LoadError::NoLevels)));
    }
}
