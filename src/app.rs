//! App: terminal init, main loop, tick and key handling.

use crate::input::{Command, key_to_command};
use crate::pit::Pit;
use crate::sim::{SimConfig, Simulation};
use crate::theme::Theme;
use crate::ui::{self, ViewOptions};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Upper bound on how long we wait for input before redrawing.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Leaves raw mode and the alternate screen when dropped, on every exit path.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

pub struct App {
    sim: Simulation,
    theme: Theme,
    view: ViewOptions,
}

impl App {
    pub fn new(pit: Pit, config: SimConfig, theme: Theme, view: ViewOptions) -> Self {
        Self {
            sim: Simulation::new(pit, config),
            theme,
            view,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let _restore = TerminalGuard;
        let mut terminal = ratatui::try_init()?;
        self.run_loop(&mut terminal)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.sim.start(Instant::now());
        loop {
            terminal.draw(|f| ui::draw(f, &self.sim, &self.theme, self.view))?;

            let now = Instant::now();
            let timeout = self
                .sim
                .ticker()
                .next_due()
                .map_or(FRAME_DURATION, |due| due.saturating_duration_since(now))
                .min(FRAME_DURATION);

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key_to_command(key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(command) => self.sim.handle(command),
                        None => {}
                    }
                }
            }

            self.sim.poll_tick(Instant::now());
        }
    }
}
