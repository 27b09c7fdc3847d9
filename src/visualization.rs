//! Terminal rendering of a cube as a coloured, unfolded net.
//!
//! Layout, with every face drawn as its outside view:
//! - Top above Front
//! - Left, Front, Right, Back in one band
//! - Bottom below Front

use owo_colors::OwoColorize;

use rubiks::{Colour, Cube, Side};

/// Width of one face in terminal columns.
const FACE_WIDTH: usize = 6;

/// Terminal colour for a facelet.
fn rgb(colour: Option<Colour>) -> (u8, u8, u8) {
    match colour {
        Some(Colour::White) => (240, 240, 240),
        Some(Colour::Yellow) => (255, 213, 0),
        Some(Colour::Red) => (196, 30, 58),
        Some(Colour::Orange) => (255, 88, 0),
        Some(Colour::Green) => (0, 158, 96),
        Some(Colour::Blue) => (0, 81, 186),
        None => (40, 40, 40),
    }
}

/// One row of a face view, two columns per facelet.
fn face_row(cube: &Cube, side: Side, row: usize) -> String {
    (0..3)
        .map(|col| {
            let (r, g, b) = rgb(cube.facelet(side, row, col));
            "  ".on_truecolor(r, g, b).to_string()
        })
        .collect()
}

/// Renders the net as nine lines of text.
pub fn render(cube: &Cube) -> String {
    let mut lines = Vec::with_capacity(9);
    let padding = " ".repeat(FACE_WIDTH);

    for row in 0..3 {
        lines.push(format!("{padding}{}", face_row(cube, Side::Top, row)));
    }
    for row in 0..3 {
        let band: String = [Side::Left, Side::Front, Side::Right, Side::Back]
            .into_iter()
            .map(|side| face_row(cube, side, row))
            .collect();
        lines.push(band);
    }
    for row in 0..3 {
        lines.push(format!("{padding}{}", face_row(cube, Side::Bottom, row)));
    }

    lines.join("\n")
}

/// Prints the net to stdout.
pub fn display(cube: &Cube) {
    println!("{}", render(cube));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubiks::Rotation;

    #[test]
    fn test_net_has_nine_rows() {
        let rendered = render(&Cube::solved());
        assert_eq!(rendered.lines().count(), 9);
    }

    #[test]
    fn test_turn_changes_rendering() {
        let mut cube = Cube::solved();
        let before = render(&cube);
        cube.apply(Rotation::clockwise(Side::Top));
        assert_ne!(render(&cube), before);
    }
}
