use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

const SYMBOLS: [(&str, Color); 6] = [
    ("●", Color::Rgb(230, 60, 60)),
    ("■", Color::Rgb(60, 120, 240)),
    ("▲", Color::Rgb(60, 200, 80)),
    ("★", Color::Rgb(250, 220, 50)),
    ("♥", Color::Rgb(240, 100, 180)),
    ("◆", Color::Rgb(250, 150, 40)),
];

// Repeating units, as indexes into the unit's own symbol picks.
const UNITS: [&[usize]; 5] = [&[0, 1], &[0, 0, 1], &[0, 1, 1], &[0, 1, 2], &[0, 1, 2, 1]];

const SHOWN: usize = 7;

/// A repeating sequence; the player picks the symbol after `shown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub shown: Vec<usize>,
    pub next: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Patterns;

impl Quiz for Patterns {
    type Content = Sequence;
    type Answer = usize;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        _previous: Option<&Sequence>,
    ) -> Result<Prompt<Sequence, usize>, GenerationError> {
        ensure_domain(SYMBOLS.len(), option_count)?;
        let unit = UNITS.choose(rng).copied().unwrap_or(UNITS[0]);
        let mut picks: Vec<usize> = (0..SYMBOLS.len()).collect();
        picks.shuffle(rng);
        let sequence: Vec<usize> = (0..=SHOWN).map(|i| picks[unit[i % unit.len()]]).collect();
        let content = Sequence {
            shown: sequence[..SHOWN].to_vec(),
            next: sequence[SHOWN],
        };
        let next = content.next;
        let distractors = distinct(rng, &next, option_count - 1, |r| r.gen_range(0..SYMBOLS.len()))?;
        Ok(Prompt::shuffled(content, next, distractors, rng))
    }

    fn is_correct(&self, content: &Sequence, answer: &usize) -> bool {
        content.next == *answer
    }
}

fn symbol(idx: usize) -> Span<'static> {
    let (glyph, color) = SYMBOLS[idx % SYMBOLS.len()];
    Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

impl QuizView for Patterns {
    fn title(&self) -> &'static str {
        "🧩 Patterns"
    }

    fn accent(&self) -> Color {
        Color::Rgb(120, 220, 120)
    }

    fn prompt_lines(&self, seq: &Sequence) -> Vec<Line<'static>> {
        let mut row: Vec<Span<'static>> = Vec::new();
        for &s in &seq.shown {
            row.push(symbol(s));
            row.push(Span::raw("  "));
        }
        row.push(Span::styled("?", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)));
        vec![
            Line::from(Span::styled(
                "What comes next?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(row),
        ]
    }

    fn option_label(&self, answer: &usize) -> Line<'static> {
        Line::from(symbol(*answer))
    }
}
