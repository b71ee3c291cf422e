use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use rand::rngs::StdRng;
use rand::SeedableRng;

use twenty48::engine::Move;
use twenty48::game::{GameMode, GameSession};
use twenty48::score::ScoreStore;

#[derive(Parser, Debug)]
#[command(
    name = "twenty48",
    version,
    about = "Play 2048 in the terminal, with per-user best scores"
)]
struct Cli {
    /// Player name; prompted for interactively when omitted
    #[arg(short, long, value_name = "NAME")]
    user: Option<String>,

    /// Game mode; the mode menu is shown when omitted
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,

    /// Best-score file
    #[arg(long, value_name = "FILE", default_value = "best_scores.csv")]
    score_file: PathBuf,

    /// Seed the RNG for a deterministic game
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = ScoreStore::new(&cli.score_file);

    let username = match cli.user.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => prompt_username()?,
    };

    loop {
        let mode = match cli.mode {
            Some(mode) => mode,
            None => match prompt_mode(&username)? {
                Some(mode) => mode,
                None => break,
            },
        };
        play(mode, &username, &store, &mut rng)?;
        // A mode fixed on the command line means one sitting, no menu.
        if cli.mode.is_some() {
            break;
        }
    }
    Ok(())
}

/// Ask for a username until a non-empty one is entered.
fn prompt_username() -> io::Result<String> {
    let stdin = io::stdin();
    loop {
        print!("Enter your username: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no username entered",
            ));
        }
        let name = line.trim();
        if name.is_empty() {
            println!("Please enter a username.");
            continue;
        }
        return Ok(name.to_string());
    }
}

/// Mode menu; `None` means quit.
fn prompt_mode(username: &str) -> io::Result<Option<GameMode>> {
    let stdin = io::stdin();
    loop {
        println!("\nHello {username}, pick a mode:");
        println!("  1) Normal       (new tiles are 2s)");
        println!("  2) Easy         (everything is 8s)");
        println!("  3) Competition  (moves are counted)");
        println!("  q) Quit");
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim() {
            "1" => return Ok(Some(GameMode::Normal)),
            "2" => return Ok(Some(GameMode::Easy)),
            "3" => return Ok(Some(GameMode::Competition)),
            "q" | "Q" => return Ok(None),
            _ => println!("Unrecognized choice."),
        }
    }
}

/// One sitting: raw-mode play loop, score save on terminal states, replay
/// prompt. Raw mode is always released, even on error.
fn play(
    mode: GameMode,
    username: &str,
    store: &ScoreStore,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    let prior_best = store.load(username, mode)?;
    let mut session = GameSession::new(mode, rng);

    terminal::enable_raw_mode()?;
    let result = run_loop(&mut session, username, prior_best, store, rng);
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn run_loop(
    session: &mut GameSession,
    username: &str,
    prior_best: u32,
    store: &ScoreStore,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    draw(session, username, prior_best)?;
    loop {
        let key = read_key()?;
        let direction = match key.code {
            KeyCode::Up | KeyCode::Char('w') => Move::Up,
            KeyCode::Down | KeyCode::Char('s') => Move::Down,
            KeyCode::Left | KeyCode::Char('a') => Move::Left,
            KeyCode::Right | KeyCode::Char('d') => Move::Right,
            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(());
            }
            _ => continue,
        };

        let state = session.apply_move(direction, rng);
        draw(session, username, prior_best)?;

        if let Some(message) = session.outcome_message(state) {
            store.save(username, session.mode(), session.best_score())?;
            let mut out = io::stdout();
            write!(out, "\r\n{message}\r\n")?;
            write!(out, "Play again? [y/n] ")?;
            out.flush()?;
            loop {
                match read_key()?.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        session.replay(rng);
                        draw(session, username, prior_best)?;
                        break;
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Next key press; repeats and releases are skipped.
fn read_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn draw(session: &GameSession, username: &str, prior_best: u32) -> io::Result<()> {
    let mut out = io::stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(
        out,
        "2048 - {} - {}\r\n",
        session.mode().label(),
        username
    )?;
    write!(out, "Arrows/WASD to move, q to leave\r\n\r\n")?;

    let grid = session.board().rows();
    for row in &grid {
        write!(out, "  ")?;
        for &value in row {
            let text = if value == 0 {
                "      ".to_string()
            } else {
                format!("{value:^6}")
            };
            write!(out, "{}", text.with(Color::Black).on(tile_color(value)))?;
        }
        write!(out, "\r\n")?;
    }

    let best = prior_best.max(session.best_score());
    write!(out, "\r\nBest score: {best}\r\n")?;
    if session.mode().counts_moves() {
        write!(out, "Moves: {}\r\n", session.moves())?;
    }
    out.flush()
}

/// The original pink palette, one shade per tile value.
fn tile_color(value: u32) -> Color {
    match value {
        2 => Color::Rgb { r: 0xfd, g: 0xd0, b: 0xdc },
        4 => Color::Rgb { r: 0xfc, g: 0xb3, b: 0xc2 },
        8 => Color::Rgb { r: 0xf8, g: 0xa2, b: 0xb7 },
        16 => Color::Rgb { r: 0xf7, g: 0x81, b: 0x9f },
        32 => Color::Rgb { r: 0xf7, g: 0x6c, b: 0x7c },
        64 => Color::Rgb { r: 0xf6, g: 0x4d, b: 0x65 },
        128 => Color::Rgb { r: 0xf6, g: 0x4d, b: 0x6f },
        256 => Color::Rgb { r: 0xf6, g: 0x5f, b: 0x6f },
        512 => Color::Rgb { r: 0xf6, g: 0x72, b: 0x72 },
        1024 => Color::Rgb { r: 0xf6, g: 0x7d, b: 0x7d },
        2048 => Color::Rgb { r: 0xf6, g: 0x88, b: 0x88 },
        _ => Color::Rgb { r: 0xfa, g: 0xf8, b: 0xef },
    }
}
