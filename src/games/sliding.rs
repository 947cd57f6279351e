use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Game, Nav};
use crate::progress::{ProgressReporter, QuestType};
use crate::ui::dialog;

const SIZE: usize = 3;
const SHUFFLE_MOVES: usize = 120;

/// Direction a tile slides into the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

/// 3x3 fifteen-style puzzle. `0` is the gap.
pub struct SlidingPuzzle {
    tiles: [u8; SIZE * SIZE],
    moves: u32,
    best: Option<u32>,
    solved: bool,
    rng: StdRng,
    reporter: ProgressReporter,
}

fn solved_layout() -> [u8; SIZE * SIZE] {
    let mut tiles = [0u8; SIZE * SIZE];
    for (i, t) in tiles.iter_mut().enumerate().take(SIZE * SIZE - 1) {
        *t = i as u8 + 1;
    }
    tiles
}

impl SlidingPuzzle {
    pub fn new(reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::from_entropy(), reporter)
    }

    pub fn with_seed(seed: u64, reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), reporter)
    }

    fn with_rng(rng: StdRng, reporter: ProgressReporter) -> Self {
        let mut p = Self {
            tiles: solved_layout(),
            moves: 0,
            best: None,
            solved: false,
            rng,
            reporter,
        };
        p.shuffle();
        p
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.tiles == solved_layout()
    }

    fn gap(&self) -> usize {
        self.tiles.iter().position(|t| *t == 0).unwrap_or(SIZE * SIZE - 1)
    }

    /// Index of the tile that would slide into the gap, if any.
    fn source(&self, slide: Slide) -> Option<usize> {
        let gap = self.gap();
        let (row, col) = (gap / SIZE, gap % SIZE);
        match slide {
            Slide::Up if row + 1 < SIZE => Some(gap + SIZE),
            Slide::Down if row > 0 => Some(gap - SIZE),
            Slide::Left if col + 1 < SIZE => Some(gap + 1),
            Slide::Right if col > 0 => Some(gap - 1),
            _ => None,
        }
    }

    // Random legal moves from the goal keep the puzzle solvable.
    fn shuffle(&mut self) {
        self.tiles = solved_layout();
        let mut last: Option<Slide> = None;
        let all = [Slide::Up, Slide::Down, Slide::Left, Slide::Right];
        let mut done = 0;
        while done < SHUFFLE_MOVES || self.is_solved() {
            let Some(&slide) = all.choose(&mut self.rng) else { break };
            let undo = matches!(
                (last, slide),
                (Some(Slide::Up), Slide::Down)
                    | (Some(Slide::Down), Slide::Up)
                    | (Some(Slide::Left), Slide::Right)
                    | (Some(Slide::Right), Slide::Left)
            );
            if undo {
                continue;
            }
            if let Some(src) = self.source(slide) {
                let gap = self.gap();
                self.tiles.swap(gap, src);
                last = Some(slide);
                done += 1;
            }
        }
        self.moves = 0;
        self.solved = false;
    }

    /// Slide a tile into the gap. Returns false when no tile can move that way.
    pub fn slide(&mut self, slide: Slide) -> bool {
        if self.solved {
            return false;
        }
        let Some(src) = self.source(slide) else { return false };
        let gap = self.gap();
        self.tiles.swap(gap, src);
        self.moves += 1;
        if self.is_solved() {
            self.solved = true;
            self.best = Some(self.best.map_or(self.moves, |b| b.min(self.moves)));
            log::info!("sliding puzzle solved in {} moves", self.moves);
            self.reporter.report(QuestType::CompleteGames, 1);
        }
        true
    }

    #[cfg(test)]
    fn set_tiles(&mut self, tiles: [u8; SIZE * SIZE]) {
        self.tiles = tiles;
        self.solved = false;
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let edge = Style::default().fg(Color::Rgb(140, 120, 40));
        lines.push(Line::from(Span::styled("╔═══════╦═══════╦═══════╗", edge)));
        for row in 0..SIZE {
            for sub in 0..3 {
                let mut spans = vec![Span::styled("║", edge)];
                for col in 0..SIZE {
                    let t = self.tiles[row * SIZE + col];
                    let in_place = t != 0 && t as usize == row * SIZE + col + 1;
                    let (fg, bg) = if t == 0 {
                        (Color::Rgb(20, 20, 30), Color::Rgb(20, 20, 30))
                    } else if in_place {
                        (Color::Rgb(20, 20, 30), Color::Rgb(220, 200, 80))
                    } else {
                        (Color::Rgb(255, 255, 255), Color::Rgb(90, 80, 160))
                    };
                    let text = if sub == 1 && t != 0 { format!("   {t}   ") } else { "       ".to_string() };
                    spans.push(Span::styled(text, Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)));
                    spans.push(Span::styled("║", edge));
                }
                lines.push(Line::from(spans));
            }
            let sep = if row + 1 < SIZE { "╠═══════╬═══════╬═══════╣" } else { "╚═══════╩═══════╩═══════╝" };
            lines.push(Line::from(Span::styled(sep, edge)));
        }
        lines
    }
}

impl Game for SlidingPuzzle {
    fn update(&mut self, _elapsed: Duration) {}

    fn handle_input(&mut self, key: KeyEvent) -> Nav {
        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Enter | KeyCode::Char(' ') if self.solved => self.reset(),
            KeyCode::Up | KeyCode::Char('w') => {
                self.slide(Slide::Up);
            }
            KeyCode::Down | KeyCode::Char('s') => {
                self.slide(Slide::Down);
            }
            KeyCode::Left | KeyCode::Char('a') => {
                self.slide(Slide::Left);
            }
            KeyCode::Right | KeyCode::Char('d') => {
                self.slide(Slide::Right);
            }
            _ => {}
        }
        Nav::Stay
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(220, 200, 80)))
            .title(" 🔲 Sliding Puzzle ")
            .title_style(Style::default().fg(Color::Rgb(255, 230, 100)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(13), Constraint::Length(1)])
            .split(inner);

        let best = self.best.map_or("-".to_string(), |b| b.to_string());
        let status = Line::from(vec![
            Span::styled(format!(" Moves: {} ", self.moves), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🏆 Best: {best} "), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let board = self.render_board();
        let pad = chunks[1].height.saturating_sub(board.len() as u16) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
        lines.extend(board);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        let help = Line::from(vec![
            Span::styled(" ←↑↓→ Slide a tile ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R New puzzle ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.solved {
            dialog::render_banner(
                frame,
                area,
                "🎉 Puzzle solved!",
                &format!("You did it in {} moves", self.moves),
                Color::Rgb(80, 220, 100),
            );
        }
    }

    fn reset(&mut self) {
        self.shuffle();
    }

    fn score(&self) -> u32 {
        if self.solved {
            self.moves
        } else {
            0
        }
    }

    fn is_finished(&self) -> bool {
        self.solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Player;

    fn puzzle(seed: u64) -> SlidingPuzzle {
        SlidingPuzzle::with_seed(seed, ProgressReporter::disabled(Player::default()))
    }

    // Inversion parity check for odd-width boards.
    fn solvable(tiles: &[u8]) -> bool {
        let nums: Vec<u8> = tiles.iter().copied().filter(|t| *t != 0).collect();
        let mut inversions = 0;
        for i in 0..nums.len() {
            for j in i + 1..nums.len() {
                if nums[i] > nums[j] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 0
    }

    #[test]
    fn shuffles_are_solvable_and_unsolved() {
        for seed in 0..50 {
            let p = puzzle(seed);
            assert!(!p.is_solved());
            assert!(solvable(p.tiles()));
            let mut seen = p.tiles().to_vec();
            seen.sort_unstable();
            assert_eq!(seen, (0..9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn last_slide_solves() {
        let mut p = puzzle(1);
        p.set_tiles([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(p.slide(Slide::Left));
        assert!(p.is_solved());
        assert!(p.is_finished());
        assert!(!p.slide(Slide::Right));
    }

    #[test]
    fn edge_moves_are_rejected() {
        let mut p = puzzle(2);
        p.set_tiles([1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!p.slide(Slide::Up));
        assert!(!p.slide(Slide::Left));
        assert_eq!(p.moves(), 0);
    }
}
