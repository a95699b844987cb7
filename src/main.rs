//! Veggie Match entry point
//!
//! The browser build is driven through `veggie_match::web`. Natively this
//! binary autoplays a level with hints and prints each cascade step.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use veggie_match::{CascadeStep, GamePhase, GameSession, LevelConfig, Progress};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let number = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);

    let Some(level) = LevelConfig::builtin(number) else {
        eprintln!("No level {} (1-{})", number, veggie_match::level::LEVEL_COUNT);
        std::process::exit(1);
    };
    log::info!("Veggie Match (native) level {} seed {}", number, seed);
    println!("Level {}: {}", level.number, level.description);

    let mut session = GameSession::new(level, seed);
    print_board(&session);

    while !session.phase().is_over() {
        let Some(hint) = session.hint() else {
            log::warn!("No move available, stopping");
            break;
        };
        if let Err(e) = session.try_swap(hint.from, hint.to) {
            log::warn!("Hinted swap rejected: {}", e);
            break;
        }
        println!(
            "\nSwap ({}, {}) <-> ({}, {})",
            hint.from.row, hint.from.col, hint.to.row, hint.to.col
        );
        for step in session.resolve() {
            match step {
                CascadeStep::RainbowBlast { activation, points, .. } => {
                    println!("  rainbow clears {} (+{})", activation.removed.len(), points)
                }
                CascadeStep::Matched {
                    cascade,
                    outcome,
                    points,
                    ..
                } => println!(
                    "  cascade {}: {} cleared, {} specials (+{})",
                    cascade,
                    outcome.removed.len(),
                    outcome.specials.len(),
                    points
                ),
                CascadeStep::LineBlast { activation, points, .. } => {
                    println!("  stripe clears {} (+{})", activation.removed.len(), points)
                }
                CascadeStep::Settled { falls, spawns } => {
                    println!("  {} fell, {} spawned", falls.len(), spawns.len())
                }
                CascadeStep::TurnEnded { shuffled, .. } => {
                    if let Some(outcome) = shuffled {
                        println!("  board {:?}", outcome);
                    }
                }
            }
        }
        println!(
            "Score {} | moves left {} | stars {}",
            session.score(),
            session.moves_left(),
            session.stars()
        );
    }

    print_board(&session);
    match session.phase() {
        GamePhase::Complete { stars } => {
            let mut progress = Progress::load();
            progress.record(number, stars);
            progress.save();
            println!("Level complete with {} stars", stars);
        }
        GamePhase::Failed => println!("Out of moves at {} points", session.score()),
        GamePhase::Playing | GamePhase::Resolving => {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_board(session: &veggie_match::GameSession) {
    use veggie_match::SpecialKind;

    for row in session.board().snapshot() {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                None => '.',
                Some(cell) => match (cell.special(), cell.veggie()) {
                    (SpecialKind::Rainbow, _) => '*',
                    (SpecialKind::None, Some(v)) => v.symbol(),
                    (_, Some(v)) => v.symbol().to_ascii_uppercase(),
                    (_, None) => '?',
                },
            })
            .collect();
        println!("{}", line);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is veggie_match::web::start, this is just to satisfy the compiler
}
