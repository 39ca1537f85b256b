// Simple command-line application to play chess by clicking tiles
//
// Each line of input is a tile name, like `e2`. Run with `RUST_LOG=tilechess=debug` to see
// what the engine decides on each click.

use tilechess::{board::PrettyStyle, Coord, GameState, Transition};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut game = GameState::new();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        if let Some(mv) = game.last_move() {
            println!("Last move: {}", mv);
        }
        if let Some(tile) = game.selection() {
            let dsts: Vec<String> = game
                .legal_destinations(tile)
                .iter()
                .map(|c| c.to_string())
                .collect();
            let (file, rank) = tile.pair();
            println!(
                "Selected {} ({}, {}), destinations: {}",
                tile,
                file,
                rank,
                dsts.join(" ")
            );
        }
        print!("{} to move, click: ", game.side().name());
        io::stdout().flush()?;

        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }
        let s = s.trim();
        if s == "new" {
            game.reset();
            continue;
        }

        let tile: Coord = match s.parse() {
            Ok(tile) => tile,
            Err(e) => {
                println!("Bad tile: {}", e);
                println!();
                continue;
            }
        };

        match game.select_or_move(tile) {
            Transition::Moved(mv) => println!("Moved {}", mv),
            Transition::Ignored => println!("Nothing to select on {}", tile),
            _ => {}
        }
        println!();
    }

    Ok(())
}
