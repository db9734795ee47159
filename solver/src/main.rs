use std::num::NonZero;

use icefloe::{Board, EntityKind, Location, Solver};

fn main() {
    // one penguin, one hole, five bears on a 5x5 sheet
    let mut board = Board::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()));
    board.place(EntityKind::Penguin, Location(0, 2)).unwrap();
    board.place(EntityKind::Water, Location(2, 2)).unwrap();
    for location in [
        Location(0, 0),
        Location(1, 2),
        Location(2, 0),
        Location(3, 1),
        Location(3, 3),
    ] {
        board.place(EntityKind::Bear, location).unwrap();
    }

    assert_eq!(
        format!("{board}"),
        "B.B..
...B.
PBW..
...B.
.....
"
    );
    println!("{board}");

    let solution = Solver::from(&mut board).solve().unwrap();
    assert!(!solution.is_empty());

    println!("Solved in {} moves:", solution.len());
    for step in &solution {
        println!("  {} slides {}", board.entity(step.entity).unwrap(), step.direction);
        board.slide(step.entity, step.direction).unwrap();
    }

    println!();
    println!("{board}");
    assert!(board.is_won());
}
