use crate::error::Result;
use crate::tui::frame::Frame;

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, f: &Frame) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Hand the terminal back in a usable state after an error.
    fn recover(&mut self);
}
