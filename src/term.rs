use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, poll, read, EnableMouseCapture, DisableMouseCapture};

pub type TermInt = u16;
pub type TermPos = (TermInt, TermInt);

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermPos,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    /// Waits up to `timeout` for the first event, then drains whatever else is queued.
    pub fn read_events(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = vec![];

        if !poll(timeout)? {
            return Ok(events);
        }

        events.push(read()?);
        while poll(Duration::ZERO)? {
            events.push(read()?);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> TermPos {
        (self.width, self.height)
    }

    /// Frame with `top_left` as its corner and `size` outer dimensions.
    pub fn draw_borders(&mut self, top_left: TermPos, size: TermPos) -> io::Result<()> {
        let (left, top) = top_left;
        let (width, height) = size;
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        Ok(())
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(idx) = self.index(pos) {
                    let ch = self.screen[idx];
                    self.print_at_no_save(pos, ch)?;
                }
            }
        }

        Ok(())
    }

    /// Writes `ch` unless the cell already shows it. Cells under an open
    /// message only update the buffer and appear once the message is hidden.
    pub fn print_at(&mut self, pos: TermPos, ch: char) -> io::Result<()> {
        let idx = match self.index(pos) {
            Some(idx) => idx,
            None => return Ok(()),
        };
        if self.screen[idx] == ch {
            return Ok(());
        }

        self.screen[idx] = ch;
        if self.covered_by_message(pos) {
            return Ok(());
        }

        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    pub fn print_str_at(&mut self, pos: TermPos, text: &str) -> io::Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: TermPos) -> Option<usize> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return None;
        }
        Some(self.width as usize * pos.1 as usize + pos.0 as usize)
    }

    fn covered_by_message(&self, pos: TermPos) -> bool {
        self.current_msg.as_ref().map_or(false, |msg| {
            let (left, top) = msg.top_left();
            (left..left + msg.width()).contains(&pos.0) && (top..top + msg.height()).contains(&pos.1)
        })
    }

    fn print_at_no_save(&mut self, pos: TermPos, ch: char) -> io::Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        if self.index(pos).is_none() {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: TermPos) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> TermPos {
        self.top_left
    }
}
