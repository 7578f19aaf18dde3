//! Pitblocks: falling-block pit simulation with a landing preview, in the terminal.

mod app;
mod collision;
mod input;
mod piece;
mod pit;
mod shape;
mod sim;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use pit::{HORIZONTAL_BLOCKS, Pit, VERTICAL_BLOCKS};
use sim::SimConfig;
use std::path::PathBuf;
use std::time::Duration;
use ui::ViewOptions;

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref()).unwrap_or_default();
    let pit = args.pit()?;
    let config = SimConfig {
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        seed: args.seed.unwrap_or_else(rand::random),
    };
    let view = ViewOptions {
        show_ghost: !args.no_ghost,
        show_collision_area: args.collision_area,
        show_box: args.show_box,
    };
    let mut app = App::new(pit, config, theme, view);
    app.run()?;
    Ok(())
}

/// Falling-block pit simulation in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "pitblocks",
    version,
    about = "Falling-block pit simulation in the terminal, with a landing preview.",
    long_about = "Pitblocks drops one piece at a time into a pit of settled blocks.\n\n\
        Steer and rotate the piece while a slow timer pulls it down. The ghost shows where \
        it would land. Pieces never settle into the pit: once a piece sinks past the bottom \
        a new one appears at the top."
)]
pub struct Args {
    /// Automatic descent interval in milliseconds.
    #[arg(long, default_value = "10000", value_name = "MS")]
    pub tick_ms: u64,

    /// Seed for piece selection. Random if not set; shown in the sidebar.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Load the pit from a layout file ('.' empty, '#' filled, one row per line).
    #[arg(short, long, value_name = "FILE", conflicts_with = "empty")]
    pub layout: Option<PathBuf>,

    /// Start from an empty 10x20 pit instead of the built-in layout.
    #[arg(long)]
    pub empty: bool,

    /// Hide the landing preview.
    #[arg(long)]
    pub no_ghost: bool,

    /// Shade the columns scanned under the piece for the landing point.
    #[arg(long)]
    pub collision_area: bool,

    /// Shade the empty cells of the piece's bounding box.
    #[arg(long)]
    pub show_box: bool,

    /// Path to theme file (btop-style theme[key]=\"value\").
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,
}

impl Args {
    fn pit(&self) -> Result<Pit> {
        match &self.layout {
            Some(path) => Pit::load(path)
                .with_context(|| format!("failed to load layout {}", path.display())),
            None if self.empty => Ok(Pit::empty(HORIZONTAL_BLOCKS, VERTICAL_BLOCKS)),
            None => Ok(Pit::initial()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_use_ten_second_ticks() {
        let args = Args::parse_from(["pitblocks"]);
        assert_eq!(args.tick_ms, 10_000);
        assert!(!args.no_ghost);
        assert_eq!(args.pit().unwrap(), Pit::initial());
    }

    #[test]
    fn empty_pit_flag() {
        let args = Args::parse_from(["pitblocks", "--empty", "--seed", "4"]);
        assert_eq!(args.seed, Some(4));
        assert_eq!(args.pit().unwrap().occupied_cells().count(), 0);
    }

    #[test]
    fn layout_conflicts_with_empty() {
        let res = Args::try_parse_from(["pitblocks", "--empty", "--layout", "pit.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn missing_layout_file_is_an_error() {
        let args = Args::parse_from(["pitblocks", "--layout", "/nonexistent/pit.txt"]);
        assert!(args.pit().is_err());
    }
}
