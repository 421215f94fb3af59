//! Raw-mode terminal frontend for the dungeon mini-game.
//!
//! All game rules live in `chirp-dungeon`; this file only reads keys, maps
//! them to commands, and redraws. The terminal is restored on every exit
//! path, including errors.

use std::io::{self, Write};

use colored::Colorize;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use chirp_dungeon::{
    ClassKind, Command, Direction, GameState, HEIGHT, Outcome, PlayerAction, Pos, Tile, WIDTH,
};

use crate::style;

/// How many log lines the frame shows.
const LOG_TAIL: usize = 6;

pub fn run() -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)
        .map_err(|e| format!("terminal error: {e}"))?;

    let result = play();

    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen, Show).ok();

    match result {
        Ok(Some(summary)) => {
            println!("{summary}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    }
}

/// The full game: class menu, then the command loop. Returns the end-of-run
/// summary, or `None` if the player quit from the menu.
fn play() -> Result<Option<String>, String> {
    let Some(class) = choose_class()? else {
        return Ok(None);
    };

    let mut rng = StdRng::from_os_rng();
    let mut state = GameState::new(class, &mut rng);

    loop {
        draw(&frame(&state))?;
        if state.outcome().is_some() {
            // Leave the final frame up until a key is pressed.
            wait_for_key()?;
            return Ok(Some(summary(&state)));
        }
        match read_input(&state)? {
            Input::Quit => return Ok(Some(summary(&state))),
            Input::Game(command) => state.handle(command, &mut rng),
        }
    }
}

enum Input {
    Quit,
    Game(Command),
}

/// Block until a key maps to something meaningful for the current state.
fn read_input(state: &GameState) -> Result<Input, String> {
    loop {
        let ev = event::read().map_err(|e| format!("event error: {e}"))?;
        let Event::Key(key) = ev else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Input::Quit);
        }
        let input = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Up => Some(Input::Game(Command::Move(Direction::Up))),
            KeyCode::Down => Some(Input::Game(Command::Move(Direction::Down))),
            KeyCode::Left => Some(Input::Game(Command::Move(Direction::Left))),
            KeyCode::Right => Some(Input::Game(Command::Move(Direction::Right))),
            KeyCode::Char('a') if state.in_combat() => {
                Some(Input::Game(Command::Combat(PlayerAction::Attack)))
            }
            KeyCode::Char('s') if state.in_combat() => {
                Some(Input::Game(Command::Combat(PlayerAction::Skill)))
            }
            KeyCode::Char('p') if state.in_combat() => {
                Some(Input::Game(Command::Combat(PlayerAction::Potion)))
            }
            KeyCode::Char('r') if state.in_combat() => {
                Some(Input::Game(Command::Combat(PlayerAction::Run)))
            }
            _ => None,
        };
        if let Some(input) = input {
            return Ok(input);
        }
    }
}

/// The class selection menu. `None` means the player quit.
fn choose_class() -> Result<Option<ClassKind>, String> {
    let mut lines = vec![
        "Choose your class:".bold().to_string(),
        String::new(),
    ];
    for (i, class) in ClassKind::ALL.iter().enumerate() {
        let stats = class.stats();
        lines.push(format!(
            "  [{}] {:<7} {} hp, {} atk, {} def, {:.0}% crit, skill: {}",
            i + 1,
            class.to_string(),
            stats.hp,
            stats.atk,
            stats.def,
            stats.crit * 100.0,
            stats.skill,
        ));
    }
    lines.push(String::new());
    lines.push("  press 1-3 to choose, q to quit".dimmed().to_string());
    draw(&lines.join("\r\n"))?;

    loop {
        let ev = event::read().map_err(|e| format!("event error: {e}"))?;
        let Event::Key(key) = ev else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('1') => return Ok(Some(ClassKind::Knight)),
            KeyCode::Char('2') => return Ok(Some(ClassKind::Wizard)),
            KeyCode::Char('3') => return Ok(Some(ClassKind::Rogue)),
            KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            _ => {}
        }
    }
}

fn wait_for_key() -> Result<(), String> {
    loop {
        let ev = event::read().map_err(|e| format!("event error: {e}"))?;
        if let Event::Key(key) = ev
            && key.kind == KeyEventKind::Press
        {
            return Ok(());
        }
    }
}

/// Clear the screen and print one frame. Raw mode needs explicit `\r\n`.
fn draw(frame: &str) -> Result<(), String> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))
        .map_err(|e| format!("terminal error: {e}"))?;
    write!(stdout, "{frame}\r\n").map_err(|e| format!("terminal error: {e}"))?;
    stdout.flush().map_err(|e| format!("terminal error: {e}"))?;
    Ok(())
}

/// Render the whole game screen into one string with `\r\n` line endings.
fn frame(state: &GameState) -> String {
    let mut lines = Vec::new();
    let p = &state.player;

    lines.push(format!(
        "{}  {}",
        "dungeon".bold(),
        format!("level {} {}", p.level, p.class).dimmed()
    ));
    lines.push(format!(
        "hp {}/{}  atk {}  def {}  gold {}  potions {}  xp {}",
        p.hp, p.max_hp, p.atk, p.def, p.gold, p.potions, p.xp
    ));
    lines.push(String::new());

    for y in 0..HEIGHT {
        let mut row = String::from(" ");
        for x in 0..WIDTH {
            let pos = Pos { x, y };
            if pos == p.pos {
                row.push_str(&"@".cyan().bold().to_string());
            } else {
                row.push_str(&tile_glyph(state.map.tile(pos)));
            }
        }
        lines.push(row);
    }
    lines.push(String::new());

    if let Some(monster) = state.monster() {
        lines.push(format!(
            "{} {} — {} hp, {} atk, {} def",
            "fighting:".red().bold(),
            monster.name,
            monster.hp,
            monster.atk,
            monster.def
        ));
        lines.push(
            "[a]ttack  [s]kill  [p]otion  [r]un"
                .yellow()
                .to_string(),
        );
    } else if state.outcome().is_none() {
        lines.push("arrows move, q quits".dimmed().to_string());
    } else {
        lines.push("press any key".dimmed().to_string());
    }
    lines.push(String::new());

    let tail = state.log.len().saturating_sub(LOG_TAIL);
    for line in &state.log[tail..] {
        lines.push(format!("  {}", style::colorize_log(line)));
    }

    lines.join("\r\n")
}

fn tile_glyph(tile: Tile) -> String {
    match tile {
        Tile::Wall => "#".white().dimmed().to_string(),
        Tile::Floor => ".".dimmed().to_string(),
        Tile::Monster => "M".red().to_string(),
        Tile::Chest => "C".yellow().to_string(),
        Tile::Exit => "E".green().bold().to_string(),
    }
}

/// One-line run summary printed back on the normal screen.
fn summary(state: &GameState) -> String {
    let p = &state.player;
    let headline = match state.outcome() {
        Some(Outcome::Won) => "You escaped the dungeon!".green().bold().to_string(),
        Some(Outcome::Dead) => "You died in the dark.".red().bold().to_string(),
        None => "You slink back to the surface.".dimmed().to_string(),
    };
    format!(
        "{headline}\nlevel {}, {} gold, {} potions left",
        p.level, p.gold, p.potions
    )
}
