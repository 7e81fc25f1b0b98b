use super::colors::Rgb;

/// Position and size of a region of the frame, in terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rectangle {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl Rectangle {
    pub(crate) fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline(always)]
    pub(crate) fn extents(&self) -> (usize, usize) {
        (self.x + self.width, self.y + self.height)
    }

    /// The rectangle shrunk by one cell on every side.
    pub(crate) fn inner(&self) -> Rectangle {
        Rectangle::new(
            self.x + 1,
            self.y + 1,
            self.width.saturating_sub(2),
            self.height.saturating_sub(2),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Style {
    pub(crate) fg: Option<Rgb>,
    pub(crate) bg: Option<Rgb>,
    pub(crate) bold: bool,
}

impl Style {
    pub(crate) fn colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            bold: false,
        }
    }

    pub(crate) fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// A single terminal cell: one character and how to draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tuxel {
    pub(crate) content: char,
    pub(crate) style: Style,
}

impl Default for Tuxel {
    fn default() -> Self {
        Self {
            content: ' ',
            style: Style::default(),
        }
    }
}

/// A full screen worth of tuxels, drawn into off screen and handed to a renderer in one piece.
/// Writes that fall outside the frame are clipped.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Frame {
    width: usize,
    height: usize,
    tuxels: Vec<Tuxel>,
}

impl Frame {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tuxels: vec![Tuxel::default(); width * height],
        }
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, x: usize, y: usize) -> Option<&Tuxel> {
        if x < self.width && y < self.height {
            self.tuxels.get(x + y * self.width)
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, content: char, style: Style) {
        if x < self.width && y < self.height {
            self.tuxels[x + y * self.width] = Tuxel { content, style };
        }
    }

    /// Rows of tuxels, top to bottom.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Tuxel]> {
        // chunks panics on a zero chunk size
        self.tuxels.chunks(self.width.max(1))
    }

    pub(crate) fn fill(&mut self, r: Rectangle, c: char, style: Style) {
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                self.set(x, y, c, style);
            }
        }
    }

    pub(crate) fn draw_border(&mut self, r: Rectangle, style: Style) {
        if r.width < 2 || r.height < 2 {
            // can only draw a border around at least a 2x2 area
            return;
        }
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let box_horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let box_vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();
        let (right, bottom) = (r.x + r.width - 1, r.y + r.height - 1);

        self.set(r.x, r.y, box_corner.clone().into(), style);
        self.set(right, r.y, box_corner.clone().rotate_cw(1).into(), style);
        self.set(right, bottom, box_corner.clone().rotate_cw(2).into(), style);
        self.set(r.x, bottom, box_corner.rotate_ccw(1).into(), style);

        for x in r.x + 1..right {
            self.set(x, r.y, box_horizontal, style);
            self.set(x, bottom, box_horizontal, style);
        }
        for y in r.y + 1..bottom {
            self.set(r.x, y, box_vertical, style);
            self.set(right, y, box_vertical, style);
        }
    }

    /// Write `s` on row `y` starting at column `x`, truncated to `max_width` characters.
    pub(crate) fn write_left(
        &mut self,
        x: usize,
        y: usize,
        max_width: usize,
        s: &str,
        style: Style,
    ) {
        for (offset, c) in s.chars().take(max_width).enumerate() {
            self.set(x + offset, y, c, style);
        }
    }

    /// Write `s` centered on the middle row of `r`.
    pub(crate) fn write_center(&mut self, r: Rectangle, s: &str, style: Style) {
        let len = s.chars().count();
        let x_offset = if len >= r.width {
            0
        } else {
            ((r.width - len) as f32 / 2.0).ceil() as usize
        };
        self.write_left(r.x + x_offset, r.y + r.height / 2, r.width, s, style);
    }

    /// Word wrap `s` into the rows of `r`, returning how many rows were written.
    pub(crate) fn write_wrapped(&mut self, r: Rectangle, s: &str, style: Style) -> usize {
        if r.width == 0 {
            return 0;
        }
        let lines = textwrap::wrap(s, r.width);
        let mut written = 0;
        for (dy, line) in lines.iter().take(r.height).enumerate() {
            self.write_left(r.x, r.y + dy, r.width, line, style);
            written += 1;
        }
        written
    }

    /// The characters of row `y`, without styling.
    pub(crate) fn row_text(&self, y: usize) -> String {
        self.rows()
            .nth(y)
            .map(|row| row.iter().map(|t| t.content).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            writeln!(f, "{}", self.row_text(y).trim_end())?;
        }
        Ok(())
    }
}
