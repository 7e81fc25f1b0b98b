use std::collections::HashSet;
use std::time::Duration;

use crate::engine::board::Board;
use crate::engine::hint::AnimationHint;
use crate::engine::tile::{Idx, Tile};
use crate::engine::transform::Direction;
use crate::error::{Error, Result};
use crate::tui::colors::{board_background, board_foreground, TileColors};
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::frame::{Frame, Rectangle, Style};
use crate::tui::renderer::Renderer;

/// Generates a 2048 TUI layout with legible numbers. For a 4x4 board:
///
///  fuse48  moves 12  max 64
///  moved left
///  ╔══════════════════════════════════════╗
///  ║                                      ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║                                      ║
///  ║   ...      ...      ...      ...     ║
///  ╚══════════════════════════════════════╝
///  arrows or hjkl move, space auto-plays, r starts over, q quits
const BOARD_FIXED_X_OFFSET: usize = 1;
const BOARD_FIXED_Y_OFFSET: usize = 2;
const BOARD_BORDER_WIDTH: usize = 1;
const BOARD_X_PADDING: usize = 2;
const BOARD_Y_PADDING: usize = 1;
const TILE_HEIGHT: usize = 3;
const TILE_WIDTH: usize = 7;
const HELP_HEIGHT: usize = 2;

const HELP: &str = "arrows or hjkl move, space auto-plays, r starts over, q quits";

const ANIMATION_FRAMES: usize = 4;
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(40);
// Lch lightness taken off spawned tiles on the first animation frame
const HIGHLIGHT_DIM: f32 = 45.0;

fn board_rectangle(size: usize) -> Rectangle {
    Rectangle::new(
        BOARD_FIXED_X_OFFSET,
        BOARD_FIXED_Y_OFFSET,
        2 * BOARD_BORDER_WIDTH + BOARD_X_PADDING + size * (TILE_WIDTH + BOARD_X_PADDING),
        2 * BOARD_BORDER_WIDTH + BOARD_Y_PADDING + size * (TILE_HEIGHT + BOARD_Y_PADDING),
    )
}

fn tile_rectangle(idx: Idx) -> Rectangle {
    let x_offset = BOARD_FIXED_X_OFFSET + BOARD_BORDER_WIDTH + BOARD_X_PADDING;
    let y_offset = BOARD_FIXED_Y_OFFSET + BOARD_BORDER_WIDTH + BOARD_Y_PADDING;
    Rectangle::new(
        x_offset + (BOARD_X_PADDING + TILE_WIDTH) * idx.x(),
        y_offset + (BOARD_Y_PADDING + TILE_HEIGHT) * idx.y(),
        TILE_WIDTH,
        TILE_HEIGHT,
    )
}

/// Which cells to emphasise while a move settles, and how far along it is.
struct Highlight {
    spawned: HashSet<Idx>,
    merged: HashSet<Idx>,
    phantoms: Vec<Tile>,
    // 0.0 right after the move, approaching 1.0 as it settles
    progress: f32,
}

impl Highlight {
    fn new(hint: &AnimationHint, before: &[Tile]) -> Self {
        Self {
            spawned: hint.spawned().collect(),
            merged: hint.merged().collect(),
            phantoms: hint.phantoms(before),
            progress: 0.0,
        }
    }
}

fn draw_tile(frame: &mut Frame, tile: &Tile, highlight: Option<&Highlight>) {
    let (dim, bold) = match highlight {
        // phantoms fade out while spawned tiles fade in
        Some(h) if tile.is_phantom() => (h.progress * HIGHLIGHT_DIM, false),
        Some(h) if h.spawned.contains(&tile.idx()) => ((1.0 - h.progress) * HIGHLIGHT_DIM, false),
        Some(h) => (0.0, h.merged.contains(&tile.idx())),
        None => (0.0, false),
    };
    let colors = TileColors::for_value(tile.value()).dimmed(dim);
    let mut style = Style::colors(colors.fg(), colors.bg());
    if bold {
        style = style.bold();
    }
    let r = tile_rectangle(tile.idx());
    frame.fill(r, ' ', style);
    frame.write_center(r, &tile.value().to_string(), style);
}

/// Lay the whole board out into a `width` x `height` frame.
fn draw_board(
    board: &Board,
    status: &str,
    width: usize,
    height: usize,
    highlight: Option<&Highlight>,
) -> Result<Frame> {
    let board_rect = board_rectangle(board.size());
    let (x_extent, y_extent) = board_rect.extents();
    let y_extent = y_extent + HELP_HEIGHT;
    if width < x_extent || height < y_extent {
        return Err(Error::TerminalTooSmall(x_extent, y_extent));
    }

    let mut frame = Frame::new(width, height);
    let text = Style::default();
    let title = format!("fuse48  moves {}  max {}", board.moves(), board.max_value());
    frame.write_left(board_rect.x, 0, board_rect.width, &title, text.bold());
    frame.write_left(board_rect.x, 1, board_rect.width, status, text);

    let board_style = Style::colors(board_foreground(), board_background());
    frame.fill(board_rect.inner(), ' ', board_style);
    frame.draw_border(board_rect, board_style);
    for y in 0..board.size() {
        for x in 0..board.size() {
            frame.write_center(tile_rectangle(Idx(x, y)), "·", board_style);
        }
    }

    if let Some(h) = highlight {
        for phantom in &h.phantoms {
            if board.tile_at(phantom.x(), phantom.y()).is_none() {
                draw_tile(&mut frame, phantom, highlight);
            }
        }
    }

    for tile in board.tiles() {
        draw_tile(&mut frame, tile, highlight);
    }

    let help = Rectangle::new(board_rect.x, y_extent - HELP_HEIGHT, board_rect.width, HELP_HEIGHT);
    frame.write_wrapped(help, HELP, text);
    Ok(frame)
}

fn too_small(width: usize, height: usize, err: &Error) -> Frame {
    let mut frame = Frame::new(width, height);
    let message = format!("hey there! {}. try resizing your terminal!", err);
    frame.write_wrapped(Rectangle::new(0, 0, width, height), &message, Style::default());
    frame
}

pub(crate) struct Tui48<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    board: Board,
    status: String,
    frame_delay: Duration,
}

impl<R: Renderer, E: EventSource> Tui48<R, E> {
    pub(crate) fn new(board: Board, renderer: R, event_source: E) -> Self {
        Self {
            renderer,
            event_source,
            board,
            status: String::from("new game"),
            frame_delay: DEFAULT_FRAME_DELAY,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Run consumes the Tui48 instance and takes control of the terminal to begin gameplay.
    pub(crate) fn run(mut self) -> Result<()> {
        match self.inner_run() {
            Err(e) => {
                self.renderer.recover();
                Err(e)
            }
            Ok(_) => Ok(()),
        }
    }

    fn inner_run(&mut self) -> Result<()> {
        loop {
            self.draw(None)?;

            // one event at a time: a move and its animation finish before the next is read
            let event = self.event_source.next_event()?;
            log::debug!("event: {:?}", event);
            match event {
                Event::UserInput(UserInput::Direction(d)) => self.shift(d)?,
                Event::UserInput(UserInput::AutoPlay) => self.auto_play()?,
                Event::UserInput(UserInput::Reset) => self.reset()?,
                Event::UserInput(UserInput::Quit) => break,
                Event::Resize => self.renderer.clear()?,
            }
        }
        log::info!(
            "quitting after {} moves, max tile {}",
            self.board.moves(),
            self.board.max_value()
        );
        Ok(())
    }
}

impl<R: Renderer, E: EventSource> Tui48<R, E> {
    fn shift(&mut self, direction: Direction) -> Result<()> {
        let before = self.board.tiles().to_vec();
        match self.board.shift(direction) {
            Some(hint) => {
                self.status = format!("moved {}", direction);
                self.animate(&before, &hint)
            }
            None => {
                self.status = format!("moving {} changes nothing", direction);
                Ok(())
            }
        }
    }

    fn auto_play(&mut self) -> Result<()> {
        let before = self.board.tiles().to_vec();
        match self.board.auto_play() {
            Some((direction, hint)) => {
                self.status = format!("auto-play moved {}", direction);
                self.animate(&before, &hint)
            }
            None => {
                self.status = String::from("no direction changes the board");
                Ok(())
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.board.reset(self.board.size())?;
        self.status = String::from("new game");
        Ok(())
    }

    fn animate(&mut self, before: &[Tile], hint: &AnimationHint) -> Result<()> {
        if hint.is_empty() {
            return Ok(());
        }
        let mut highlight = Highlight::new(hint, before);
        for step in 0..ANIMATION_FRAMES {
            highlight.progress = step as f32 / ANIMATION_FRAMES as f32;
            self.draw(Some(&highlight))?;
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    fn draw(&mut self, highlight: Option<&Highlight>) -> Result<()> {
        let (width, height) = self.renderer.size_hint()?;
        let (width, height) = (width as usize, height as usize);
        let frame = match draw_board(&self.board, &self.status, width, height, highlight) {
            Ok(frame) => frame,
            Err(e @ Error::TerminalTooSmall(_, _)) => too_small(width, height, &e),
            Err(e) => return Err(e),
        };
        self.renderer.render(&frame)
    }
}
