use std::{
    cell::{Cell, RefCell},
    io::BufRead,
    rc::Rc,
    time::Instant,
};

use anyhow::{Context, Result};
use tilt_2048_core::{Command, Event, EventKind, Notifier};
use tilt_2048_rendering::{Palette, RenderingBackend, Scene};
use tilt_2048_system_bootstrap::Bootstrap;
use tilt_2048_system_results::Results;
use tilt_2048_world::{self as world, World};

use crate::{
    config::CliConfig,
    keys::{Action, KeyBindings},
};

/// Terminal session: reads key lines, drives the world and redraws the board.
#[derive(Debug)]
pub(crate) struct App {
    world: World,
    bootstrap: Bootstrap,
    notifier: Notifier,
    results: Rc<RefCell<Results>>,
    game_over: Rc<Cell<bool>>,
    keys: KeyBindings,
    palette: Palette,
    last_input: Instant,
}

impl App {
    pub(crate) fn new(config: &CliConfig) -> Self {
        let results = Rc::new(RefCell::new(Results::new()));
        let game_over = Rc::new(Cell::new(false));
        let mut notifier = Notifier::new();

        let recorder = Rc::clone(&results);
        let flag = Rc::clone(&game_over);
        let _ = notifier.subscribe(EventKind::GameEnded, move |event| {
            recorder.borrow_mut().handle(std::slice::from_ref(event));
            flag.set(true);
        });
        let _ = notifier.subscribe(EventKind::PauseToggled, |event| {
            if let Event::PauseToggled { paused } = event {
                log::info!("paused: {paused}");
            }
        });
        let _ = notifier.subscribe(EventKind::AfterTilt, |event| {
            if let Event::AfterTilt { has_changed: false } = event {
                log::debug!("tilt left the board unchanged");
            }
        });

        Self {
            world: World::new(config.world_config()),
            bootstrap: Bootstrap,
            notifier,
            results,
            game_over,
            keys: config.keys.clone(),
            palette: Palette::default(),
            last_input: Instant::now(),
        }
    }

    /// Plays until the quit key is pressed or `input` is exhausted.
    pub(crate) fn run<R, B>(&mut self, input: R, backend: &mut B) -> Result<()>
    where
        R: BufRead,
        B: RenderingBackend,
    {
        backend.announce(self.bootstrap.welcome_banner(&self.world))?;
        backend.announce(&self.keys.help())?;
        for command in self.bootstrap.opening_commands(&self.world) {
            self.execute(command);
        }
        self.redraw(backend)?;

        for line in input.lines() {
            let line = line.context("failed to read player input")?;
            self.advance_clock();

            for key in line.chars().filter(|key| !key.is_whitespace()) {
                let Some(action) = self.keys.action_for(key) else {
                    backend.announce(&format!("unbound key {key:?}"))?;
                    continue;
                };
                if action == Action::Quit {
                    return self.farewell(backend);
                }
                let Some(command) = action.command() else {
                    continue;
                };
                self.execute(command);

                if self.game_over.replace(false) {
                    self.redraw(backend)?;
                    backend.announce(&format!("Game over. {}", self.summary()))?;
                    self.execute(Command::Start);
                }
            }

            self.redraw(backend)?;
        }

        self.farewell(backend)
    }

    fn execute(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        log::trace!("{command:?} -> {events:?}");
        self.notifier.dispatch(&events);
    }

    fn advance_clock(&mut self) {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_input);
        self.last_input = now;
        self.execute(Command::Tick { dt });
    }

    fn redraw<B: RenderingBackend>(&self, backend: &mut B) -> Result<()> {
        let scene = Scene::capture(&self.world, &self.palette)?;
        backend.present(&scene)
    }

    fn farewell<B: RenderingBackend>(&self, backend: &mut B) -> Result<()> {
        backend.announce(&format!("Bye. {}", self.summary()))
    }

    fn summary(&self) -> String {
        let results = self.results.borrow();
        match (
            results.average_score(),
            results.average_max_tile(),
            results.best_score(),
        ) {
            (Some(score), Some(max_tile), Some(best)) => format!(
                "games: {}, average score: {score:.1}, average max tile: {max_tile:.1}, best score: {best}",
                results.games_played()
            ),
            _ => String::from("games: 0"),
        }
    }

    #[cfg(test)]
    pub(crate) fn results(&self) -> std::cell::Ref<'_, Results> {
        self.results.borrow()
    }
}
