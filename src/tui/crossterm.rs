use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Attribute},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::engine::transform::Direction;
use crate::error::Result;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::frame::{Frame, Style};
use crate::tui::renderer::Renderer;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }

    fn queue_style(&mut self, style: &Style) -> Result<()> {
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        if let Some(fg) = style.fg {
            self.w.queue(style::SetForegroundColor(fg.into()))?;
        }
        if let Some(bg) = style.bg {
            self.w.queue(style::SetBackgroundColor(bg.into()))?;
        }
        if style.bold {
            self.w.queue(style::SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        self.recover();
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, f: &Frame) -> Result<()> {
        log::trace!("rendering {:?} frame", f.dimensions());
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        let mut current: Option<Style> = None;
        for (y, row) in f.rows().enumerate() {
            self.w.queue(cursor::MoveTo(0, y as u16))?;
            for tuxel in row {
                if current != Some(tuxel.style) {
                    self.queue_style(&tuxel.style)?;
                    current = Some(tuxel.style);
                }
                self.w.queue(style::Print(tuxel.content))?;
            }
        }
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn recover(&mut self) {
        // best effort: the terminal may already be restored
        let _ = self.w.execute(style::ResetColor);
        let _ = self.w.execute(cursor::Show);
        let _ = self.w.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads key presses and resizes from the terminal.
#[derive(Default)]
pub(crate) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event that maps to a game event.
    fn next_event(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrosstermEvent::Key(ke) if ke.kind == KeyEventKind::Press => {
                    match handle_key_event(ke) {
                        Some(input) => return Ok(Event::UserInput(input)),
                        None => continue,
                    }
                }
                CrosstermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    let KeyEvent {
        code, modifiers, ..
    } = ke;
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(UserInput::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Direction(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Direction(Direction::Down)),
        KeyCode::Char(' ') => Some(UserInput::AutoPlay),
        KeyCode::Char('r') => Some(UserInput::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        _ => None,
    }
}
