use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Game, Nav};
use crate::ui::dialog;

const WIDTH: i16 = 24;
const HEIGHT: i16 = 14;
const START_STEP_MS: u64 = 180;
const MIN_STEP_MS: u64 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    fn delta(self) -> (i16, i16) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

pub struct Snake {
    body: VecDeque<(i16, i16)>,
    dir: Dir,
    queued: Option<Dir>,
    food: (i16, i16),
    score: u32,
    best: u32,
    game_over: bool,
    paused: bool,
    since_step: Duration,
    rng: StdRng,
}

impl Snake {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mid = (WIDTH / 2, HEIGHT / 2);
        let mut s = Self {
            body: VecDeque::from(vec![mid, (mid.0 - 1, mid.1), (mid.0 - 2, mid.1)]),
            dir: Dir::Right,
            queued: None,
            food: (0, 0),
            score: 0,
            best: 0,
            game_over: false,
            paused: false,
            since_step: Duration::ZERO,
            rng,
        };
        s.place_food();
        s
    }

    pub fn head(&self) -> (i16, i16) {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> (i16, i16) {
        self.food
    }

    pub fn set_food(&mut self, food: (i16, i16)) {
        self.food = food;
    }

    /// Queue a turn for the next step. Reversing onto the neck is ignored.
    pub fn turn(&mut self, dir: Dir) {
        if dir != self.dir.opposite() {
            self.queued = Some(dir);
        }
    }

    fn step_interval(&self) -> Duration {
        let ms = START_STEP_MS.saturating_sub(u64::from(self.score) * 5).max(MIN_STEP_MS);
        Duration::from_millis(ms)
    }

    fn place_food(&mut self) {
        let free = (WIDTH * HEIGHT) as usize - self.body.len();
        if free == 0 {
            self.game_over = true;
            return;
        }
        let pick = self.rng.gen_range(0..free);
        let cell = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|c| !self.body.contains(c))
            .nth(pick);
        if let Some(cell) = cell {
            self.food = cell;
        }
    }

    /// Move one cell.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        if let Some(dir) = self.queued.take() {
            self.dir = dir;
        }
        let (dx, dy) = self.dir.delta();
        let (hx, hy) = self.head();
        let next = (hx + dx, hy + dy);
        let grows = next == self.food;

        let hits_wall = next.0 < 0 || next.1 < 0 || next.0 >= WIDTH || next.1 >= HEIGHT;
        // The tail moves out of the way unless the snake is growing.
        let body_len = if grows { self.body.len() } else { self.body.len() - 1 };
        let hits_self = self.body.iter().take(body_len).any(|c| *c == next);
        if hits_wall || hits_self {
            self.game_over = true;
            self.best = self.best.max(self.score);
            log::debug!("snake crashed with length {}", self.body.len());
            return;
        }

        self.body.push_front(next);
        if grows {
            self.score += 1;
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(10, 20, 10);
        let mut lines = Vec::with_capacity(height);
        for y in 0..HEIGHT {
            if lines.len() >= height {
                break;
            }
            let mut spans = Vec::with_capacity(WIDTH as usize);
            for x in 0..WIDTH {
                if spans.len() * 2 + 2 > width {
                    break;
                }
                let cell = (x, y);
                let span = if cell == self.head() {
                    Span::styled("◉ ", Style::default().fg(Color::Rgb(150, 255, 150)).bg(bg).add_modifier(Modifier::BOLD))
                } else if self.body.contains(&cell) {
                    Span::styled("██", Style::default().fg(Color::Rgb(60, 190, 60)).bg(bg))
                } else if cell == self.food {
                    Span::styled("🍎", Style::default().bg(bg))
                } else {
                    Span::styled("· ", Style::default().fg(Color::Rgb(30, 50, 30)).bg(bg))
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Snake {
    fn update(&mut self, elapsed: Duration) {
        if self.game_over || self.paused {
            return;
        }
        self.since_step += elapsed;
        let interval = self.step_interval();
        if self.since_step >= interval {
            self.since_step -= interval;
            self.step();
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Nav {
        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.game_over => self.reset(),
            KeyCode::Up | KeyCode::Char('w') => self.turn(Dir::Up),
            KeyCode::Down | KeyCode::Char('s') => self.turn(Dir::Down),
            KeyCode::Left | KeyCode::Char('a') => self.turn(Dir::Left),
            KeyCode::Right | KeyCode::Char('d') => self.turn(Dir::Right),
            _ => {}
        }
        Nav::Stay
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 220, 80)))
            .title(" 🐍 Snake ")
            .title_style(Style::default().fg(Color::Rgb(120, 255, 120)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(4), Constraint::Length(1)])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" 🍎 Apples: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Length: {} ", self.body.len()), Style::default().fg(Color::Green)),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🏆 Best: {} ", self.best), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let lines = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        let help = if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(" ←↑↓→ Steer ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
            ])
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.game_over {
            dialog::render_banner(
                frame,
                area,
                "💥 Oh no, crash!",
                &format!("You ate {} apples", self.score),
                Color::Rgb(230, 70, 70),
            );
        }
    }

    fn reset(&mut self) {
        let best = self.best.max(self.score);
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        *self = Snake::with_rng(rng);
        self.best = best;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_finished(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eating_grows_by_one() {
        let mut s = Snake::with_seed(1);
        let (hx, hy) = s.head();
        s.set_food((hx + 1, hy));
        s.step();
        assert_eq!(s.len(), 4);
        assert_eq!(s.score(), 1);
        assert_ne!(s.food(), s.head());

        s.set_food((0, 0));
        s.step();
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn reversing_is_ignored() {
        let mut s = Snake::with_seed(2);
        s.set_food((0, 0));
        let (hx, hy) = s.head();
        s.turn(Dir::Left);
        s.step();
        assert_eq!(s.head(), (hx + 1, hy));
        assert!(!s.is_finished());
    }

    #[test]
    fn wall_ends_the_game() {
        let mut s = Snake::with_seed(3);
        s.set_food((0, 0));
        for _ in 0..WIDTH {
            s.step();
        }
        assert!(s.is_finished());
    }

    #[test]
    fn biting_itself_ends_the_game() {
        let mut s = Snake::with_seed(4);
        s.set_food((0, 0));
        let (hx, hy) = s.head();
        // Grow to five cells, then curl back into the body.
        s.set_food((hx + 1, hy));
        s.step();
        s.set_food((hx + 2, hy));
        s.step();
        s.set_food((0, 0));
        s.turn(Dir::Down);
        s.step();
        s.turn(Dir::Left);
        s.step();
        s.turn(Dir::Up);
        s.step();
        assert!(s.is_finished());
    }

    #[test]
    fn update_steps_on_interval() {
        let mut s = Snake::with_seed(5);
        s.set_food((0, 0));
        let start = s.head();
        s.update(Duration::from_millis(100));
        assert_eq!(s.head(), start);
        s.update(Duration::from_millis(100));
        assert_eq!(s.head(), (start.0 + 1, start.1));
    }
}
