use std::{io, time::{Duration, Instant}};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use snake::engine::{GameEngine, GameState, Phase, TickOutcome};
use snake::input::{classify_tap, SwipeTracker};
use snake::{log, Cell, Direction, SpeedProfile};

use crate::term::{TermInt, TermManager, TermPos};

/// How long to wait for input when no tick is due.
const IDLE_POLL: Duration = Duration::from_millis(50);
/// Each board cell takes this many terminal columns, to look roughly square.
const CELL_WIDTH: TermInt = 2;

const SNAKE_BODY_CHAR: char = '█';
const DEAD_SNAKE_CHAR: char = 'X';
const FOOD_CHARS: [char; 2] = ['(', ')'];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    Reset,
    Speed(SpeedProfile),
    TogglePause,
    Quit,
}

/// Key bindings. `None` for keys the game doesn't use.
pub fn command_for_key(ev: &KeyEvent) -> Option<Command> {
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let cmd = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char(c @ '1'..='4') => {
            Command::Speed(SpeedProfile::ALL[c as usize - '1' as usize])
        }
        KeyCode::Esc => Command::TogglePause,
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };

    Some(cmd)
}

/// Layout of the board on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    /// Top left corner of the frame.
    origin: TermPos,
    board_size: TermInt,
}

impl BoardView {
    /// Centres a board of `board_size` cells in a terminal of `term_size`,
    /// leaving a row above for the score line and one below for help.
    pub fn fit(board_size: TermInt, term_size: TermPos) -> Option<Self> {
        let (width, height) = Self::outer_size(board_size);
        let (tw, th) = term_size;
        if tw < width || th < height + 2 {
            return None;
        }

        let origin = ((tw - width) / 2, (th - height) / 2);
        Some(BoardView { origin, board_size })
    }

    pub fn outer_size(board_size: TermInt) -> TermPos {
        (board_size * CELL_WIDTH + 2, board_size + 2)
    }

    pub fn frame_size(&self) -> TermPos {
        Self::outer_size(self.board_size)
    }

    /// First terminal column and the row of a board cell.
    pub fn to_screen(&self, (x, y): Cell) -> TermPos {
        (
            self.origin.0 + 1 + x as TermInt * CELL_WIDTH,
            self.origin.1 + 1 + y as TermInt,
        )
    }

    /// Terminal position in board units, relative to the top left of the
    /// playing area. Columns are scaled so both axes use cell units.
    pub fn to_board_units(&self, (col, row): TermPos) -> (f32, f32) {
        let x = (col as f32 - (self.origin.0 + 1) as f32) / CELL_WIDTH as f32;
        let y = row as f32 - (self.origin.1 + 1) as f32;
        (x, y)
    }
}

pub struct SnakeGame {
    term: TermManager,
    engine: GameEngine,
    view: BoardView,
    swipe: SwipeTracker,
    swipe_threshold: f32,
    paused: bool,
    next_tick: Instant,
}

impl SnakeGame {
    pub fn new(term: TermManager, engine: GameEngine, view: BoardView, swipe_threshold: f32) -> Self {
        SnakeGame {
            term,
            engine,
            view,
            swipe: SwipeTracker::new(),
            swipe_threshold,
            paused: false,
            next_tick: Instant::now(),
        }
    }

    pub fn term_mut(&mut self) -> &mut TermManager {
        &mut self.term
    }

    pub fn show_intro(&mut self) -> io::Result<()> {
        self.term.clear()?;
        self.draw()?;
        self.term.show_message(&[
            "Arrow keys, WASD or mouse to move",
            "Click a side of the board or drag to turn",
            "1-4 to pick a speed",
            "Esc to pause, r to reset",
            "q or CTRL+C to quit",
            "",
            "Press Space to begin",
        ])?;
        self.term.flush()
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.tick_due() {
                let outcome = self.engine.tick();
                self.next_tick = Instant::now() + self.engine.speed().interval();
                self.on_tick(outcome)?;
            }

            let timeout = if self.ticking() {
                self.next_tick.saturating_duration_since(Instant::now())
            } else {
                IDLE_POLL
            };

            for ev in self.term.read_events(timeout)? {
                let cmd = match ev {
                    Event::Key(key) if key.kind != KeyEventKind::Release => command_for_key(&key),
                    Event::Mouse(mouse) => self.command_for_mouse(&mouse),
                    _ => None,
                };

                match cmd {
                    Some(Command::Quit) => return Ok(()),
                    Some(cmd) => self.apply(cmd)?,
                    None => {}
                }
            }

            self.draw()?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn ticking(&self) -> bool {
        self.engine.phase() == Phase::Playing && !self.paused
    }

    fn tick_due(&self) -> bool {
        self.ticking() && Instant::now() >= self.next_tick
    }

    fn apply(&mut self, cmd: Command) -> io::Result<()> {
        match cmd {
            Command::Turn(dir) => {
                if !self.paused {
                    self.engine.set_direction(dir);
                }
            }
            Command::Start => {
                if self.engine.phase() != Phase::Playing {
                    self.engine.start();
                    self.paused = false;
                    self.next_tick = Instant::now() + self.engine.speed().interval();
                    self.term.hide_message()?;
                }
            }
            Command::Reset => {
                self.engine.reset();
                self.paused = false;
                self.show_intro()?;
            }
            Command::Speed(speed) => {
                self.engine.set_speed(speed);
            }
            Command::TogglePause => self.toggle_pause()?,
            Command::Quit => {}
        }

        Ok(())
    }

    fn command_for_mouse(&mut self, ev: &MouseEvent) -> Option<Command> {
        let pos = self.view.to_board_units((ev.column, ev.row));

        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.press(pos.0, pos.1);
                None
            }
            MouseEventKind::Up(MouseButton::Left) if self.swipe.is_pressed() => {
                let swipe = self.swipe.release(pos.0, pos.1, self.swipe_threshold);
                let size = self.engine.config().board_size() as f32;
                // A press that barely moved is a tap on one side of the board
                let dir = swipe.unwrap_or_else(|| classify_tap(pos.0, pos.1, size, size));
                Some(Command::Turn(dir))
            }
            _ => None,
        }
    }

    fn on_tick(&mut self, outcome: TickOutcome) -> io::Result<()> {
        let score = self.engine.state().score;

        match outcome {
            TickOutcome::Crashed(_) => {
                self.draw()?;
                self.game_over(score, false)?;
            }
            TickOutcome::BoardFull => {
                self.draw()?;
                self.game_over(score, true)?;
            }
            TickOutcome::Ate { points } => log!("ate food for {} points, score {}", points, score),
            TickOutcome::Moved | TickOutcome::Ignored => {}
        }

        Ok(())
    }

    fn game_over(&mut self, score: u32, win: bool) -> io::Result<()> {
        let s = if win {"You won!"} else {"Game over!"};
        let high = self.engine.state().high_score;

        self.term.show_message(&[
            s,
            &*format!("Score: {}", score),
            &*format!("Best: {}", high),
            "",
            "Press Space to play again,",
            "r to reset or q to quit.",
        ])?;
        self.term.flush()
    }

    fn toggle_pause(&mut self) -> io::Result<()> {
        if self.engine.phase() != Phase::Playing {
            return Ok(());
        }

        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
            self.next_tick = Instant::now() + self.engine.speed().interval();
        }

        self.paused = !self.paused;
        self.term.flush()
    }

    fn draw(&mut self) -> io::Result<()> {
        let state = self.engine.state();
        let (left, top) = self.view.origin;
        let (frame_w, frame_h) = self.view.frame_size();

        self.term.draw_borders(self.view.origin, self.view.frame_size())?;
        let hud = format!("{:<w$}", status_line(&state), w = frame_w as usize);
        self.term.print_str_at((left, top.saturating_sub(1)), &hud)?;
        let help = format!("{:<w$}", speed_line(&state), w = frame_w as usize);
        self.term.print_str_at((left, top + frame_h), &help)?;

        let size = self.view.board_size as i32;
        for y in 0..size {
            for x in 0..size {
                let glyph = cell_glyph(&state, (x, y));
                let (col, row) = self.view.to_screen((x, y));
                self.term.print_at((col, row), glyph[0])?;
                self.term.print_at((col + 1, row), glyph[1])?;
            }
        }

        self.term.flush()
    }
}

fn cell_glyph(state: &GameState, cell: Cell) -> [char; 2] {
    if let Some(i) = state.snake.iter().position(|c| *c == cell) {
        if state.phase == Phase::GameOver {
            return [DEAD_SNAKE_CHAR; 2];
        }
        if i == 0 {
            return [state.heading.head_char(); 2];
        }
        return [SNAKE_BODY_CHAR; 2];
    }

    if cell == state.food && state.phase != Phase::Won {
        return FOOD_CHARS;
    }

    [' '; 2]
}

fn status_line(state: &GameState) -> String {
    format!("Score: {}  Best: {}  Length: {}", state.score, state.high_score, state.snake.len())
}

fn speed_line(state: &GameState) -> String {
    let lock = if state.phase == Phase::Playing {" (locked)"} else {""};
    format!("Speed: {}{}", state.speed.label(), lock)
}
