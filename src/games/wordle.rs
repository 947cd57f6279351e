use std::collections::HashMap;
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

pub const WORD_LEN: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

const WORDS: &[&str] = &[
    "APPLE", "BEACH", "BREAD", "BRUSH", "CANDY", "CHAIR", "CLOUD", "CLOWN", "CRANE", "DANCE",
    "DREAM", "EAGLE", "FAIRY", "FLOUR", "FRUIT", "GHOST", "GRAPE", "GRASS", "HAPPY", "HEART",
    "HONEY", "HORSE", "HOUSE", "JELLY", "KOALA", "LEMON", "LIGHT", "MAGIC", "MANGO", "MOUSE",
    "MUSIC", "OCEAN", "OTTER", "PANDA", "PAPER", "PARTY", "PEACH", "PIANO", "PIZZA", "PLANT",
    "QUEEN", "RIVER", "ROBOT", "SHARK", "SHEEP", "SMILE", "SNAKE", "SPOON", "STORM", "SUGAR",
    "TIGER", "TOAST", "TRAIN", "TRUCK", "WATER", "WHALE", "ZEBRA",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LetterState {
    Absent,
    Present,
    Correct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub guess: String,
    pub states: Vec<LetterState>,
}

/// Greens first, then yellows limited by the letters the greens left over.
pub fn evaluate_guess(secret: &str, guess: &str) -> Vec<LetterState> {
    let secret: Vec<char> = secret.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    let mut states = vec![LetterState::Absent; guess.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();

    for (i, &s) in secret.iter().enumerate() {
        if guess.get(i) == Some(&s) {
            states[i] = LetterState::Correct;
        } else {
            *remaining.entry(s).or_insert(0) += 1;
        }
    }
    for (i, ch) in guess.iter().enumerate() {
        if states[i] == LetterState::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(ch) {
            if *count > 0 {
                states[i] = LetterState::Present;
                *count -= 1;
            }
        }
    }
    states
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    TooShort,
    GameOver,
}

pub struct Wordle {
    secret: &'static str,
    attempts: Vec<Attempt>,
    current: String,
    message: Option<String>,
    rng: StdRng,
    reporter: ProgressReporter,
    wins: u32,
}

impl Wordle {
    pub fn new(reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::from_entropy(), reporter)
    }

    pub fn with_seed(seed: u64, reporter: ProgressReporter) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), reporter)
    }

    fn with_rng(mut rng: StdRng, reporter: ProgressReporter) -> Self {
        let secret = WORDS.choose(&mut rng).copied().unwrap_or("APPLE");
        Self {
            secret,
            attempts: Vec::new(),
            current: String::new(),
            message: None,
            rng,
            reporter,
            wins: 0,
        }
    }

    pub fn secret(&self) -> &str {
        self.secret
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn is_won(&self) -> bool {
        self.attempts.last().is_some_and(|a| a.guess == self.secret)
    }

    pub fn is_lost(&self) -> bool {
        !self.is_won() && self.attempts.len() >= MAX_ATTEMPTS
    }

    pub fn type_letter(&mut self, ch: char) {
        if self.is_won() || self.is_lost() {
            return;
        }
        if ch.is_ascii_alphabetic() && self.current.len() < WORD_LEN {
            self.current.push(ch.to_ascii_uppercase());
        }
    }

    pub fn backspace(&mut self) {
        self.current.pop();
    }

    pub fn submit(&mut self) -> Result<(), GuessError> {
        if self.is_won() || self.is_lost() {
            return Err(GuessError::GameOver);
        }
        if self.current.len() != WORD_LEN {
            self.message = Some(format!("Words have {WORD_LEN} letters"));
            return Err(GuessError::TooShort);
        }
        let guess = std::mem::take(&mut self.current);
        let states = evaluate_guess(self.secret, &guess);
        self.attempts.push(Attempt { guess, states });
        self.message = None;
        if self.is_won() {
            self.wins += 1;
            log::info!("wordle solved in {} attempts", self.attempts.len());
            self.reporter.report(QuestType::CompleteGames, 1);
        }
        Ok(())
    }

    /// Best known state per letter, for the on-screen keyboard.
    pub fn letter_hints(&self) -> HashMap<char, LetterState> {
        let mut hints: HashMap<char, LetterState> = HashMap::new();
        for attempt in &self.attempts {
            for (ch, state) in attempt.guess.chars().zip(attempt.states.iter()) {
                let entry = hints.entry(ch).or_insert(*state);
                if *state > *entry {
                    *entry = *state;
                }
            }
        }
        hints
    }

    fn state_colors(state: LetterState) -> (Color, Color) {
        match state {
            LetterState::Correct => (Color::Rgb(20, 20, 20), Color::Rgb(90, 190, 90)),
            LetterState::Present => (Color::Rgb(20, 20, 20), Color::Rgb(230, 200, 60)),
            LetterState::Absent => (Color::Rgb(200, 200, 200), Color::Rgb(70, 70, 80)),
        }
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for row in 0..MAX_ATTEMPTS {
            let mut spans = Vec::new();
            if let Some(attempt) = self.attempts.get(row) {
                for (ch, state) in attempt.guess.chars().zip(attempt.states.iter()) {
                    let (fg, bg) = Self::state_colors(*state);
                    spans.push(Span::styled(format!(" {ch} "), Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)));
                    spans.push(Span::raw(" "));
                }
            } else if row == self.attempts.len() && !self.is_lost() {
                let typed: Vec<char> = self.current.chars().collect();
                for i in 0..WORD_LEN {
                    let text = typed.get(i).map_or(" _ ".to_string(), |c| format!(" {c} "));
                    spans.push(Span::styled(
                        text,
                        Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(" "));
                }
            } else {
                for _ in 0..WORD_LEN {
                    spans.push(Span::styled("   ", Style::default().bg(Color::Rgb(25, 25, 35))));
                    spans.push(Span::raw(" "));
                }
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines
    }

    fn render_keyboard(&self) -> Vec<Line<'static>> {
        let hints = self.letter_hints();
        ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"]
            .iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .chars()
                    .map(|ch| {
                        let style = match hints.get(&ch) {
                            Some(state) => {
                                let (fg, bg) = Self::state_colors(*state);
                                Style::default().fg(fg).bg(bg)
                            }
                            None => Style::default().fg(Color::Rgb(200, 200, 220)).bg(Color::Rgb(45, 45, 60)),
                        };
                        Span::styled(format!(" {ch} "), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Game for Wordle {
    fn update(&mut self, _elapsed: Duration) {}

    fn handle_input(&mut self, key: KeyEvent) -> Nav {
        let over = self.is_won() || self.is_lost();
        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Enter if over => self.reset(),
            KeyCode::Enter => {
                let _ = self.submit();
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(ch) => self.type_letter(ch),
            _ => {}
        }
        Nav::Stay
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(120, 200, 120)))
            .title(" 📝 Wordle ")
            .title_style(Style::default().fg(Color::Rgb(150, 230, 150)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(12),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut status = vec![
            Span::styled(
                format!(" Try {}/{} ", (self.attempts.len() + 1).min(MAX_ATTEMPTS), MAX_ATTEMPTS),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🏆 Wins: {} ", self.wins), Style::default().fg(Color::Cyan)),
        ];
        if let Some(msg) = &self.message {
            status.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            status.push(Span::styled(msg.clone(), Style::default().fg(Color::Rgb(255, 180, 60))));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[0]);

        frame.render_widget(Paragraph::new(self.render_board()).alignment(Alignment::Center), chunks[1]);
        frame.render_widget(Paragraph::new(self.render_keyboard()).alignment(Alignment::Center), chunks[2]);

        let help = Line::from(vec![
            Span::styled(" A-Z Type ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("ENTER Guess ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("⌫ Erase ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);

        if self.is_won() {
            dialog::render_banner(
                frame,
                area,
                "🎉 You got it!",
                &format!("{} in {} tries", self.secret, self.attempts.len()),
                Color::Rgb(80, 220, 100),
            );
        } else if self.is_lost() {
            dialog::render_banner(
                frame,
                area,
                "So close!",
                &format!("The word was {}", self.secret),
                Color::Rgb(255, 180, 60),
            );
        }
    }

    fn reset(&mut self) {
        self.secret = WORDS.choose(&mut self.rng).copied().unwrap_or("APPLE");
        self.attempts.clear();
        self.current.clear();
        self.message = None;
    }

    fn score(&self) -> u32 {
        if self.is_won() {
            (MAX_ATTEMPTS + 1 - self.attempts.len()) as u32
        } else {
            0
        }
    }

    fn is_finished(&self) -> bool {
        self.is_won() || self.is_lost()
    }
}
