use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{avoid_repeat, distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Paint {
    pub const ALL: [Paint; 6] = [Paint::Red, Paint::Blue, Paint::Green, Paint::Yellow, Paint::Purple, Paint::Orange];

    pub fn name(self) -> &'static str {
        match self {
            Paint::Red => "red",
            Paint::Blue => "blue",
            Paint::Green => "green",
            Paint::Yellow => "yellow",
            Paint::Purple => "purple",
            Paint::Orange => "orange",
        }
    }

    pub fn rgb(self) -> Color {
        match self {
            Paint::Red => Color::Rgb(230, 60, 60),
            Paint::Blue => Color::Rgb(60, 120, 240),
            Paint::Green => Color::Rgb(60, 200, 80),
            Paint::Yellow => Color::Rgb(250, 220, 50),
            Paint::Purple => Color::Rgb(170, 80, 230),
            Paint::Orange => Color::Rgb(250, 150, 40),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
}

impl Shape {
    pub const ALL: [Shape; 5] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Star, Shape::Heart];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Star => "star",
            Shape::Heart => "heart",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Shape::Circle => "●",
            Shape::Square => "■",
            Shape::Triangle => "▲",
            Shape::Star => "★",
            Shape::Heart => "♥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub paint: Paint,
    pub shape: Shape,
}

impl Figure {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Figure {
            paint: Paint::ALL[rng.gen_range(0..Paint::ALL.len())],
            shape: Shape::ALL[rng.gen_range(0..Shape::ALL.len())],
        }
    }
}

/// "Find the blue star."
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorShape;

impl Quiz for ColorShape {
    type Content = Figure;
    type Answer = Figure;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&Figure>,
    ) -> Result<Prompt<Figure, Figure>, GenerationError> {
        ensure_domain(Paint::ALL.len() * Shape::ALL.len(), option_count)?;
        let target = avoid_repeat(rng, previous, |r| Figure::random(r));
        // Most distractors share a trait with the target so the choice
        // needs both color and shape.
        let distractors = distinct(rng, &target, option_count - 1, |r| {
            let mut f = Figure::random(r);
            match r.gen_range(0..3) {
                0 => f.paint = target.paint,
                1 => f.shape = target.shape,
                _ => {}
            }
            f
        })?;
        Ok(Prompt::shuffled(target, target, distractors, rng))
    }

    fn is_correct(&self, content: &Figure, answer: &Figure) -> bool {
        content == answer
    }
}

impl QuizView for ColorShape {
    fn title(&self) -> &'static str {
        "🎨 Colors & Shapes"
    }

    fn accent(&self) -> Color {
        Color::Rgb(255, 110, 150)
    }

    fn prompt_lines(&self, target: &Figure) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled("Can you find the", Style::default().fg(Color::Rgb(180, 180, 200)))),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    target.paint.name().to_uppercase(),
                    Style::default().fg(target.paint.rgb()).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    target.shape.name().to_uppercase(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
        ]
    }

    fn option_label(&self, answer: &Figure) -> Line<'static> {
        let big = std::iter::repeat(answer.shape.glyph()).take(3).collect::<Vec<_>>().join(" ");
        Line::from(Span::styled(big, Style::default().fg(answer.paint.rgb()).add_modifier(Modifier::BOLD)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn options_are_distinct_figures() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut previous = None;
        for _ in 0..100 {
            let prompt = ColorShape.generate(&mut rng, 4, previous.as_ref()).unwrap();
            let opts = &prompt.options;
            for i in 0..opts.len() {
                for j in i + 1..opts.len() {
                    assert_ne!(opts[i], opts[j]);
                }
            }
            assert!(opts.contains(&prompt.content));
            assert_ne!(Some(prompt.content), previous);
            previous = Some(prompt.content);
        }
    }

    #[test]
    fn more_options_than_figures_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(ColorShape.generate(&mut rng, 31, None).is_err());
    }
}
