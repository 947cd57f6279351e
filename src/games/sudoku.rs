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

const N: usize = 9;
const BOX: usize = 3;
const HOLES: usize = 40;

pub type Grid = [[u8; N]; N];

/// A full valid grid: the base pattern with digits relabelled and rows,
/// columns, bands and stacks shuffled.
pub fn generate_solution(rng: &mut StdRng) -> Grid {
    let mut digits: Vec<u8> = (1..=N as u8).collect();
    digits.shuffle(rng);

    let axis = |rng: &mut StdRng| -> Vec<usize> {
        let mut groups: Vec<usize> = (0..BOX).collect();
        groups.shuffle(rng);
        let mut order = Vec::with_capacity(N);
        for g in groups {
            let mut inner: Vec<usize> = (0..BOX).collect();
            inner.shuffle(rng);
            order.extend(inner.into_iter().map(|i| g * BOX + i));
        }
        order
    };
    let rows = axis(rng);
    let cols = axis(rng);

    let mut grid = [[0u8; N]; N];
    for (r, &src_r) in rows.iter().enumerate() {
        for (c, &src_c) in cols.iter().enumerate() {
            let base = (BOX * (src_r % BOX) + src_r / BOX + src_c) % N;
            grid[r][c] = digits[base];
        }
    }
    grid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub value: u8,
    pub given: bool,
}

pub struct Sudoku {
    cells: [[Cell; N]; N],
    cursor: (usize, usize),
    solved: bool,
    rng: StdRng,
    reporter: ProgressReporter,
}

impl Sudoku {
    pub fn new(reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::from_entropy(), reporter)
    }

    pub fn with_seed(seed: u64, reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), reporter)
    }

    fn with_rng(rng: StdRng, reporter: ProgressReporter) -> Self {
        let mut s = Self {
            cells: [[Cell::default(); N]; N],
            cursor: (0, 0),
            solved: false,
            rng,
            reporter,
        };
        s.new_puzzle();
        s
    }

    fn new_puzzle(&mut self) {
        let solution = generate_solution(&mut self.rng);
        let mut positions: Vec<(usize, usize)> = (0..N).flat_map(|r| (0..N).map(move |c| (r, c))).collect();
        positions.shuffle(&mut self.rng);
        for r in 0..N {
            for c in 0..N {
                self.cells[r][c] = Cell { value: solution[r][c], given: true };
            }
        }
        for &(r, c) in positions.iter().take(HOLES) {
            self.cells[r][c] = Cell { value: 0, given: false };
        }
        self.cursor = (0, 0);
        self.solved = false;
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.value == 0).count()
    }

    /// True when another cell in the same row, column or box holds the same
    /// value.
    pub fn conflicts(&self, row: usize, col: usize) -> bool {
        let v = self.cells[row][col].value;
        if v == 0 {
            return false;
        }
        let (br, bc) = (row / BOX * BOX, col / BOX * BOX);
        (0..N).any(|i| {
            (i != col && self.cells[row][i].value == v)
                || (i != row && self.cells[i][col].value == v)
                || {
                    let (r, c) = (br + i / BOX, bc + i % BOX);
                    (r, c) != (row, col) && self.cells[r][c].value == v
                }
        })
    }

    pub fn is_solved(&self) -> bool {
        (0..N).all(|r| (0..N).all(|c| self.cells[r][c].value != 0 && !self.conflicts(r, c)))
    }

    /// Write `value` (0 clears) at a non-given cell. Returns false for givens.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        if self.solved || self.cells[row][col].given || value as usize > N {
            return false;
        }
        self.cells[row][col].value = value;
        if self.is_solved() {
            self.solved = true;
            log::info!("sudoku solved");
            self.reporter.report(QuestType::CompleteGames, 1);
        }
        true
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let (r, c) = self.cursor;
        self.cursor = (
            (r as isize + dr).rem_euclid(N as isize) as usize,
            (c as isize + dc).rem_euclid(N as isize) as usize,
        );
    }

    fn render_grid(&self) -> Vec<Line<'static>> {
        let edge = Style::default().fg(Color::Rgb(100, 110, 180));
        let mut lines = vec![Line::from(Span::styled("┏━━━━━━━━━┳━━━━━━━━━┳━━━━━━━━━┓", edge))];
        for r in 0..N {
            let mut spans = vec![Span::styled("┃", edge)];
            for c in 0..N {
                let cell = self.cells[r][c];
                let text = if cell.value == 0 { " · ".to_string() } else { format!(" {} ", cell.value) };
                let mut style = if cell.given {
                    Style::default().fg(Color::Rgb(220, 220, 240)).add_modifier(Modifier::BOLD)
                } else if self.conflicts(r, c) {
                    Style::default().fg(Color::Rgb(240, 80, 80)).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Rgb(120, 200, 255))
                };
                if (r, c) == self.cursor {
                    style = style.bg(Color::Rgb(70, 70, 120));
                }
                spans.push(Span::styled(text, style));
                if c % BOX == BOX - 1 {
                    spans.push(Span::styled("┃", edge));
                }
            }
            lines.push(Line::from(spans));
            if r == N - 1 {
                lines.push(Line::from(Span::styled("┗━━━━━━━━━┻━━━━━━━━━┻━━━━━━━━━┛", edge)));
            } else if r % BOX == BOX - 1 {
                lines.push(Line::from(Span::styled("┣━━━━━━━━━╋━━━━━━━━━╋━━━━━━━━━┫", edge)));
            }
        }
        lines
    }
}

impl Game for Sudoku {
    fn update(&mut self, _elapsed: Duration) {}

    fn handle_input(&mut self, key: KeyEvent) -> Nav {
        let (r, c) = self.cursor;
        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Enter | KeyCode::Char(' ') if self.solved => self.reset(),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('0') => {
                self.set(r, c, 0);
            }
            KeyCode::Char(ch) => {
                if let Some(d) = ch.to_digit(10) {
                    self.set(r, c, d as u8);
                }
            }
            _ => {}
        }
        Nav::Stay
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(150, 170, 255)))
            .title(" 🔳 Sudoku ")
            .title_style(Style::default().fg(Color::Rgb(170, 190, 255)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(13), Constraint::Length(1)])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" Empty cells: {} ", self.empty_cells()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Row {} Col {} ", self.cursor.0 + 1, self.cursor.1 + 1),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let grid = self.render_grid();
        let pad = chunks[1].height.saturating_sub(grid.len() as u16) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
        lines.extend(grid);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        let help = Line::from(vec![
            Span::styled(" ←↑↓→ Move ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("1-9 Fill ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("0/Del Clear ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R New ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.solved {
            dialog::render_banner(frame, area, "🎉 Sudoku solved!", "Every row, column and box!", Color::Rgb(80, 220, 100));
        }
    }

    fn reset(&mut self) {
        self.new_puzzle();
    }

    fn score(&self) -> u32 {
        u32::from(self.solved)
    }

    fn is_finished(&self) -> bool {
        self.solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Player;

    fn valid(grid: &Grid) -> bool {
        let full = |vals: Vec<u8>| {
            let mut v = vals;
            v.sort_unstable();
            v == (1..=9).collect::<Vec<u8>>()
        };
        (0..N).all(|i| {
            full(grid[i].to_vec())
                && full((0..N).map(|r| grid[r][i]).collect())
                && full((0..N).map(|k| grid[i / 3 * 3 + k / 3][i % 3 * 3 + k % 3]).collect())
        })
    }

    fn sudoku(seed: u64) -> Sudoku {
        Sudoku::with_seed(seed, ProgressReporter::disabled(Player::default()))
    }

    #[test]
    fn generated_solutions_are_valid() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(valid(&generate_solution(&mut rng)));
        }
    }

    #[test]
    fn puzzle_has_holes_and_no_conflicts() {
        let s = sudoku(8);
        assert_eq!(s.empty_cells(), HOLES);
        for r in 0..N {
            for c in 0..N {
                assert!(!s.conflicts(r, c));
                let cell = s.cell(r, c);
                assert_eq!(cell.given, cell.value != 0);
            }
        }
        assert!(!s.is_solved());
    }

    #[test]
    fn duplicates_are_flagged_and_givens_locked() {
        let mut s = sudoku(3);
        let (r, c) = (0..N)
            .flat_map(|r| (0..N).map(move |c| (r, c)))
            .find(|&(r, c)| !s.cell(r, c).given && (0..N).any(|k| s.cell(r, k).given))
            .unwrap();
        let given_col = (0..N).find(|&k| s.cell(r, k).given).unwrap();
        let dup = s.cell(r, given_col).value;
        assert!(s.set(r, c, dup));
        assert!(s.conflicts(r, c));
        assert!(s.conflicts(r, given_col));
        assert!(!s.set(r, given_col, 1));
        assert!(s.set(r, c, 0));
        assert!(!s.conflicts(r, given_col));
    }

    #[test]
    fn filling_every_hole_solves() {
        let mut s = sudoku(5);
        let mut rng = StdRng::seed_from_u64(5);
        let solution = generate_solution(&mut rng);
        for r in 0..N {
            for c in 0..N {
                if !s.cell(r, c).given {
                    s.set(r, c, solution[r][c]);
                }
            }
        }
        assert!(s.is_solved());
        assert!(s.is_finished());
    }
}
