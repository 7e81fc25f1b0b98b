use std::cmp::Reverse;
use std::str::FromStr;

use super::line::reduce;
use super::tile::Tile;
use crate::error::Error;

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// The coordinate a move slides tiles along.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Axis {
    /// Tiles slide along `y`; each column is an independent line.
    Vertical,
    /// Tiles slide along `x`; each row is an independent line.
    Horizontal,
}

/// Which end of a line tiles slide toward.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Polarity {
    TowardStart,
    TowardEnd,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub(crate) fn axis(&self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    pub(crate) fn polarity(&self) -> Polarity {
        match self {
            Self::Up | Self::Left => Polarity::TowardStart,
            Self::Down | Self::Right => Polarity::TowardEnd,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "h" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "up" | "u" | "k" => Ok(Self::Up),
            "down" | "d" | "j" => Ok(Self::Down),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// Slide every line of the board in `direction`, merging as it goes.
///
/// Tiles are grouped by their fixed coordinate (column for vertical moves, row for horizontal
/// ones), each group is sorted so the tile nearest the target edge comes first, then reduced and
/// laid back down from that edge. Lines never interact, so one routine covers all four
/// directions. The result is ordered line by line, not by id.
///
/// Every tile must lie within a `size` x `size` board.
pub(crate) fn transform(tiles: Vec<Tile>, size: usize, direction: Direction) -> Vec<Tile> {
    let axis = direction.axis();
    let polarity = direction.polarity();

    // (fixed, moving) coordinates of a tile for this axis
    let coords = |t: &Tile| match axis {
        Axis::Vertical => (t.x(), t.y()),
        Axis::Horizontal => (t.y(), t.x()),
    };

    let mut lines: Vec<Vec<Tile>> = (0..size).map(|_| Vec::with_capacity(size)).collect();
    for tile in tiles {
        let (fixed, _) = coords(&tile);
        lines[fixed].push(tile);
    }

    let mut out = Vec::with_capacity(size * size);
    for (fixed, mut line) in lines.into_iter().enumerate() {
        match polarity {
            Polarity::TowardStart => line.sort_by_key(|t| coords(t).1),
            Polarity::TowardEnd => line.sort_by_key(|t| Reverse(coords(t).1)),
        }
        for (index, tile) in reduce(line).into_iter().enumerate() {
            let moving = match polarity {
                Polarity::TowardStart => index,
                Polarity::TowardEnd => size - 1 - index,
            };
            let (x, y) = match axis {
                Axis::Vertical => (fixed, moving),
                Axis::Horizontal => (moving, fixed),
            };
            out.push(tile.with_position(x, y));
        }
    }
    out
}
