use std::io::Write;

use crate::engine::board::Board;
use crate::engine::transform::Direction;
use crate::error::Result;

/// Apply `directions` in order, printing the board after each one.
pub(crate) fn apply_moves<W: Write>(
    board: &mut Board,
    directions: &[Direction],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "start")?;
    write!(out, "{}", board)?;
    for &direction in directions {
        match board.shift(direction) {
            Some(hint) => {
                log::trace!("{}:{}", direction, hint);
                writeln!(out, "\n{} moved", direction)?;
            }
            None => writeln!(out, "\n{} changed nothing", direction)?,
        }
        write!(out, "{}", board)?;
    }
    summary(board, out)
}

/// Let auto-play move up to `steps` times, stopping early once no direction changes the board.
pub(crate) fn auto_play<W: Write>(board: &mut Board, steps: usize, out: &mut W) -> Result<()> {
    writeln!(out, "start")?;
    write!(out, "{}", board)?;
    for step in 1..=steps {
        let Some((direction, _)) = board.auto_play() else {
            writeln!(out, "\nno direction changes the board")?;
            break;
        };
        writeln!(out, "\n{} auto-play moved {}", step, direction)?;
        write!(out, "{}", board)?;
    }
    summary(board, out)
}

fn summary<W: Write>(board: &Board, out: &mut W) -> Result<()> {
    writeln!(out, "\nmoves {} max {}", board.moves(), board.max_value())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::spawn::SpawnPolicy;

    fn board(size: usize, cells: &[(usize, usize, u32)]) -> Board {
        Board::from_tiles(size, SpawnPolicy::Classic, cells, SmallRng::seed_from_u64(3))
            .expect("valid test board")
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("writing to a Vec succeeds");
        String::from_utf8(out).expect("board output is utf-8")
    }

    #[test]
    fn moves_print_each_board() {
        let mut b = board(2, &[(0, 0, 2)]);
        let text = output(|out| apply_moves(&mut b, &[Direction::Left, Direction::Right], out));
        let expected_start = "start\n2 .\n. .\n\nleft changed nothing\n2 .\n. .\n\nright moved\n";
        assert!(text.starts_with(expected_start));
        assert!(text.ends_with("\nmoves 1 max 2\n"));
    }

    #[test]
    fn merges_show_in_the_summary() {
        let mut b = board(4, &[(0, 0, 2), (1, 0, 2)]);
        let text = output(|out| apply_moves(&mut b, &[Direction::Left], out));
        assert!(text.contains("\nleft moved\n"));
        assert!(text.ends_with("\nmoves 1 max 4\n"));
    }

    #[test]
    fn auto_play_stops_when_stuck() {
        let mut b = board(2, &[(0, 0, 2), (1, 0, 4), (0, 1, 4), (1, 1, 2)]);
        let text = output(|out| auto_play(&mut b, 10, out));
        assert_eq!(
            text,
            "start\n2 4\n4 2\n\nno direction changes the board\n\nmoves 0 max 4\n"
        );
    }

    #[test]
    fn auto_play_takes_the_requested_steps() {
        let mut b = board(4, &[(0, 0, 2)]);
        let text = output(|out| auto_play(&mut b, 3, out));
        assert!(text.contains("\n3 auto-play moved "));
        assert!(text.ends_with("\nmoves 3 max 4\n") || text.ends_with("\nmoves 3 max 2\n"));
    }
}
