use std::fmt;
use std::time::Duration;

use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{avoid_repeat, distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

const MAX_OFFSET: u32 = 4;
const BASE_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    pub lhs: u32,
    pub op: Op,
    pub rhs: u32,
}

impl Expression {
    pub fn value(&self) -> u32 {
        match self.op {
            Op::Add => self.lhs + self.rhs,
            Op::Sub => self.lhs - self.rhs,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self.op {
            Op::Add => '+',
            Op::Sub => '-',
        };
        write!(f, "{} {} {}", self.lhs, sym, self.rhs)
    }
}

/// Timed addition/subtraction. Faster answers score more.
#[derive(Debug, Clone)]
pub struct MathQuiz {
    pub max_operand: u32,
}

impl Default for MathQuiz {
    fn default() -> Self {
        Self { max_operand: 10 }
    }
}

impl MathQuiz {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Expression {
        let max = self.max_operand.max(1);
        let a = rng.gen_range(0..=max);
        let b = rng.gen_range(0..=max);
        if rng.gen_bool(0.5) {
            Expression { lhs: a, op: Op::Add, rhs: b }
        } else {
            // Keep results non-negative.
            Expression { lhs: a.max(b), op: Op::Sub, rhs: a.min(b) }
        }
    }
}

impl Quiz for MathQuiz {
    type Content = Expression;
    type Answer = u32;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&Expression>,
    ) -> Result<Prompt<Expression, u32>, GenerationError> {
        ensure_domain(MAX_OFFSET as usize + 1, option_count)?;
        let expr = avoid_repeat(rng, previous, |r| self.draw(r));
        let value = expr.value();
        let distractors = distinct(rng, &value, option_count - 1, |r| {
            let offset = r.gen_range(1..=MAX_OFFSET);
            if r.gen_bool(0.5) || value < offset {
                value + offset
            } else {
                value - offset
            }
        })?;
        Ok(Prompt::shuffled(expr, value, distractors, rng))
    }

    fn is_correct(&self, content: &Expression, answer: &u32) -> bool {
        content.value() == *answer
    }

    fn points(&self, remaining: Option<Duration>) -> u32 {
        BASE_POINTS + remaining.map_or(0, |d| d.as_secs() as u32)
    }
}

impl QuizView for MathQuiz {
    fn title(&self) -> &'static str {
        "➕ Math Quiz"
    }

    fn accent(&self) -> Color {
        Color::Rgb(80, 200, 255)
    }

    fn prompt_lines(&self, expr: &Expression) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Quick! What is",
                Style::default().fg(Color::Rgb(180, 180, 200)),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{expr} = ?"),
                Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
            )),
        ]
    }

    fn option_label(&self, answer: &u32) -> Line<'static> {
        Line::from(Span::styled(
            answer.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    }
}
