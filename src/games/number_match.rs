use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{avoid_repeat, distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

/// Count the dots, pick the numeral.
#[derive(Debug, Clone)]
pub struct NumberMatch {
    pub max: u32,
    pub max_offset: u32,
}

impl Default for NumberMatch {
    fn default() -> Self {
        Self { max: 20, max_offset: 5 }
    }
}

impl Quiz for NumberMatch {
    type Content = u32;
    type Answer = u32;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&u32>,
    ) -> Result<Prompt<u32, u32>, GenerationError> {
        // Distractors sit within max_offset of the target, never below 1.
        ensure_domain(self.max_offset as usize + 1, option_count)?;
        let max = self.max.max(1);
        let target = avoid_repeat(rng, previous, |r| r.gen_range(1..=max));
        let max_offset = self.max_offset.max(1);
        let distractors = distinct(rng, &target, option_count - 1, |r| {
            let offset = r.gen_range(1..=max_offset);
            if r.gen_bool(0.5) || target <= offset {
                target + offset
            } else {
                target - offset
            }
        })?;
        Ok(Prompt::shuffled(target, target, distractors, rng))
    }

    fn is_correct(&self, content: &u32, answer: &u32) -> bool {
        content == answer
    }
}

impl QuizView for NumberMatch {
    fn title(&self) -> &'static str {
        "🔢 Number Match"
    }

    fn accent(&self) -> Color {
        Color::Rgb(255, 180, 60)
    }

    fn prompt_lines(&self, target: &u32) -> Vec<Line<'static>> {
        let dot = Style::default().fg(Color::Rgb(255, 180, 60)).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled(
                "How many dots do you see?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        // Rows of five, like a counting frame.
        let mut left = *target;
        while left > 0 {
            let row = left.min(5);
            lines.push(Line::from(Span::styled(vec!["●"; row as usize].join(" "), dot)));
            left -= row;
        }
        lines
    }

    fn option_label(&self, answer: &u32) -> Line<'static> {
        let word = NUMBER_WORDS.get(*answer as usize).copied().unwrap_or("");
        Line::from(vec![
            Span::styled(answer.to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {word}"), Style::default().fg(Color::Rgb(120, 120, 140))),
        ])
    }
}
