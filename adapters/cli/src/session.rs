//! Drives one process worth of play: world, achievements and the stored profile.

use std::time::Duration;

use log::{info, warn};
use snake_arcade_adapter_persistence::{Profile, ProfileStore};
use snake_arcade_core::{Command, Difficulty, Event, GameSummary};
use snake_arcade_rendering::{FrameInput, Scene};
use snake_arcade_system_achievements::{AchievementUnlocked, Achievements};
use snake_arcade_world::{self as world, query, Config, World};

use crate::scene;

/// Outcome of the most recent finished game, kept for the game-over screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LastGame {
    pub(crate) summary: GameSummary,
    pub(crate) unlocked: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct Session<S> {
    world: World,
    achievements: Achievements,
    store: S,
    last_game: Option<LastGame>,
    events: Vec<Event>,
    unlocked: Vec<AchievementUnlocked>,
}

impl<S: ProfileStore> Session<S> {
    /// Loads the profile from `store` and opens the menu at `difficulty`.
    ///
    /// An unreadable profile is reported and replaced by an empty one.
    pub(crate) fn new(config: Config, difficulty: Difficulty, store: S) -> Self {
        let profile = match store.load() {
            Ok(profile) => profile,
            Err(error) => {
                warn!("{error}; starting with an empty profile");
                Profile::default()
            }
        };
        info!(
            "loaded profile with high score {} and {} games played",
            profile.high_score, profile.stats.games_played
        );

        let mut session = Self {
            world: World::new(config),
            achievements: profile.achievements(),
            store,
            last_game: None,
            events: Vec::new(),
            unlocked: Vec::new(),
        };
        session.submit(Command::RestoreHighScore {
            high_score: profile.high_score,
        });
        session.submit(Command::SelectDifficulty { difficulty });
        session
    }

    /// Advances the session by one rendered frame and refreshes `scene`.
    ///
    /// Returns `false` once the player asked to quit.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) -> bool {
        for command in commands_for_input(input) {
            self.submit(command);
        }
        self.submit(Command::Tick { dt });

        scene::populate(
            scene,
            &self.world,
            &self.achievements,
            self.last_game.as_ref(),
        );

        if query::quit_requested(&self.world) {
            self.save();
            return false;
        }
        true
    }

    fn submit(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);

        self.unlocked.clear();
        self.achievements.handle(&self.events, &mut self.unlocked);

        let finished = self.events.iter().find_map(|event| match event {
            Event::GameOver { summary } => Some(*summary),
            _ => None,
        });
        if let Some(summary) = finished {
            self.last_game = Some(LastGame {
                summary,
                unlocked: self
                    .unlocked
                    .iter()
                    .map(|unlocked| unlocked.name.to_owned())
                    .collect(),
            });
            self.save();
        }
    }

    fn save(&mut self) {
        let profile = Profile::capture(query::high_score(&self.world), &self.achievements);
        if let Err(error) = self.store.save(&profile) {
            warn!("could not save profile: {error}");
        }
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn last_game(&self) -> Option<&LastGame> {
        self.last_game.as_ref()
    }
}

/// Translates one frame of input into world commands, applied in order.
fn commands_for_input(input: FrameInput) -> Vec<Command> {
    let mut commands = Vec::new();
    if input.quit {
        commands.push(Command::Quit);
    }
    if let Some(difficulty) = input.difficulty {
        commands.push(Command::SelectDifficulty { difficulty });
    }
    if let Some(direction) = input.direction {
        commands.push(Command::RequestDirection { direction });
    }
    if input.pause_toggle {
        commands.push(Command::TogglePause);
    }
    if input.confirm {
        commands.push(Command::Confirm);
    }
    if input.restart {
        commands.push(Command::Restart);
    }
    commands
}
