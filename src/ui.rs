//! Layout and drawing: pit, descending piece, landing preview and the debug sidebar.

use crate::collision::LandingScan;
use crate::piece::Piece;
use crate::sim::Simulation;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Each pit cell is two terminal columns wide so blocks look square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 30;
/// Piece (10) + Scan (4) + Run (5) + Keys (8), bordered, with gaps.
const SIDEBAR_HEIGHT: u16 = 30;

const BLOCK: &str = "[]";
const EMPTY: &str = " ·";
const BOX_PADDING: &str = "░░";

/// What to draw on top of the pit and the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Landing preview.
    pub show_ghost: bool,
    /// Columns under the piece box, from the piece down to the floor.
    pub show_collision_area: bool,
    /// Empty cells of the piece's bounding box.
    pub show_box: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_ghost: true,
            show_collision_area: false,
            show_box: false,
        }
    }
}

/// Board rect (inside the border) in pit coordinates.
struct Board {
    rect: Rect,
    width: i32,
    height: i32,
}

impl Board {
    /// Paint one pit cell; anything outside the pit or the buffer is skipped.
    fn paint(&self, buf: &mut Buffer, col: i32, row: i32, symbol: &str, style: Style) {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return;
        }
        let x0 = self.rect.x + col as u16 * CELL_WIDTH;
        let y = self.rect.y + row as u16;
        if y >= self.rect.bottom() {
            return;
        }
        for (i, ch) in symbol.chars().take(CELL_WIDTH as usize).enumerate() {
            let x = x0 + i as u16;
            if x >= self.rect.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

/// Pit size in terminal cells, border included.
fn playfield_size(sim: &Simulation) -> (u16, u16) {
    let pit = sim.pit();
    (pit.width() as u16 * CELL_WIDTH + 2, pit.height() as u16 + 2)
}

/// Draw pit and sidebar, centred in the frame.
pub fn draw(frame: &mut Frame, sim: &Simulation, theme: &Theme, view: ViewOptions) {
    let area = frame.area();
    let (pw, ph) = playfield_size(sim);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(pw + SIDEBAR_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph.max(SIDEBAR_HEIGHT)),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    let pit_area = Rect {
        height: ph.min(inner[0].height),
        ..inner[0]
    };

    draw_pit(frame, sim, theme, view, pit_area);
    draw_sidebar(frame, sim, theme, inner[1]);
}

fn draw_pit(frame: &mut Frame, sim: &Simulation, theme: &Theme, view: ViewOptions, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.arena_border).bg(theme.arena_bg))
        .title(Span::styled(" pitblocks ", Style::default().fg(theme.block_stroke)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let pit = sim.pit();
    let piece = sim.piece();
    let board = Board {
        rect: inner,
        width: pit.width() as i32,
        height: pit.height() as i32,
    };
    let buf = frame.buffer_mut();

    let empty_style = Style::default().fg(theme.grid_line).bg(theme.arena_bg);
    for row in 0..board.height {
        for col in 0..board.width {
            board.paint(buf, col, row, EMPTY, empty_style);
        }
    }

    if view.show_collision_area {
        let style = Style::default().fg(theme.grid_line).bg(theme.collision_area);
        let pos = piece.position;
        for row in pos.y..board.height {
            for col in pos.x..pos.x + piece.geometry().box_size {
                board.paint(buf, col, row, EMPTY, style);
            }
        }
    }

    if view.show_box {
        let style = Style::default().fg(theme.block_stroke).bg(theme.arena_bg);
        for (col, row) in box_padding(piece) {
            board.paint(buf, col, row, BOX_PADDING, style);
        }
    }

    let block_style = Style::default().fg(theme.block_stroke).bg(theme.block_fill);
    for (col, row) in piece.cells() {
        board.paint(buf, col, row, BLOCK, block_style);
    }

    if view.show_ghost {
        let style = Style::default().fg(theme.block_stroke).bg(theme.ghost_body);
        for (col, row) in piece.cells_at(sim.landing()) {
            board.paint(buf, col, row, BLOCK, style);
        }
    }

    for (col, row) in pit.occupied_cells() {
        board.paint(buf, col, row, BLOCK, block_style);
    }
}

/// Grid coordinates of the empty cells inside the piece's box.
fn box_padding(piece: &Piece) -> impl Iterator<Item = (i32, i32)> + '_ {
    let side = piece.geometry().box_size.max(1);
    let origin = piece.position;
    (0..piece.mask().len())
        .filter(move |&i| !piece.mask().is_filled(i))
        .map(move |i| {
            let i = i as i32;
            (origin.x + i % side, origin.y + i / side)
        })
}

/// `[_, 1, 1, _]` style listing for the per-column scan arrays.
fn fmt_columns(values: &[Option<i32>]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| v.map_or_else(|| "_".to_string(), |n| n.to_string()))
        .collect();
    format!("[{}]", items.join(", "))
}

fn scan_lines<'a>(scan: &LandingScan, label: Style, value: Style) -> Vec<Line<'a>> {
    vec![
        Line::from(vec![
            Span::styled("lowest:   ", label),
            Span::styled(fmt_columns(&scan.lowest_blocks), value),
        ]),
        Line::from(vec![
            Span::styled("pit tops: ", label),
            Span::styled(fmt_columns(&scan.pit_tops), value),
        ]),
    ]
}

fn field<'a>(name: &'a str, value: String, label: Style, fg: Style) -> Line<'a> {
    Line::from(vec![Span::styled(name, label), Span::styled(value, fg)])
}

fn draw_sidebar(frame: &mut Frame, sim: &Simulation, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.arena_border);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Piece
            Constraint::Length(1),
            Constraint::Length(4), // Scan
            Constraint::Length(1),
            Constraint::Length(5), // Run
            Constraint::Length(1),
            Constraint::Length(8), // Keys
        ])
        .split(area);

    let piece = sim.piece();
    let g = piece.geometry();
    let pos = piece.position;
    let landing = sim.landing();
    let piece_lines = vec![
        field("kind: ", format!("{:?}", piece.kind()), title_style, fg_style),
        field("pos: ", format!("{}, {}", pos.x, pos.y), title_style, fg_style),
        field("landing: ", format!("{}, {}", landing.x, landing.y), title_style, fg_style),
        field("direction: ", sim.direction().to_string(), title_style, fg_style),
        field("boxSize: ", g.box_size.to_string(), title_style, fg_style),
        field(
            "x: ",
            format!("{}..={} w {} gap {}", g.min_x, g.max_x, g.width, g.right_gap),
            title_style,
            fg_style,
        ),
        field(
            "y: ",
            format!("{}..={} h {} gap {}", g.min_y, g.max_y, g.height, g.bottom_gap),
            title_style,
            fg_style,
        ),
    ];
    let run_lines = vec![
        field("seed: ", sim.seed().to_string(), title_style, fg_style),
        field(
            "tick: ",
            format!("{} ms", sim.ticker().interval().as_millis()),
            title_style,
            fg_style,
        ),
        field("pieces: ", sim.pieces_spawned().to_string(), title_style, fg_style),
    ];
    let key_lines = vec![
        Line::styled("↑ / W      rotate", fg_style),
        Line::styled("← → / A D  move", fg_style),
        Line::styled("↓ / S      step down", fg_style),
        Line::styled("Space      drop", fg_style),
        Line::styled("Enter      restart", fg_style),
        Line::styled("q / Esc    quit", fg_style),
    ];

    let sections = [
        (chunks[0], " Piece ", piece_lines),
        (chunks[2], " Scan ", scan_lines(sim.scan(), title_style, fg_style)),
        (chunks[4], " Run ", run_lines),
        (chunks[6], " Keys ", key_lines),
    ];
    for (rect, title, lines) in sections {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, title_style));
        let inner = block.inner(rect);
        block.render(rect, frame.buffer_mut());
        Paragraph::new(Text::from(lines)).render(inner, frame.buffer_mut());
    }
}
