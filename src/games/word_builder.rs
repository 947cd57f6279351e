use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{avoid_repeat, distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const WORDS: &[(&str, &str)] = &[
    ("CAT", "🐱"),
    ("DOG", "🐶"),
    ("SUN", "🌞"),
    ("BEE", "🐝"),
    ("FISH", "🐟"),
    ("FROG", "🐸"),
    ("STAR", "⭐"),
    ("MOON", "🌙"),
    ("CAKE", "🎂"),
    ("BOOK", "📘"),
    ("DUCK", "🦆"),
    ("TREE", "🌳"),
    ("BALL", "⚽"),
    ("APPLE", "🍎"),
    ("HOUSE", "🏠"),
    ("TRAIN", "🚂"),
    ("HORSE", "🐴"),
    ("CLOUD", "☁"),
    ("PIZZA", "🍕"),
    ("ROBOT", "🤖"),
];

/// A picture word with one letter blanked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingLetter {
    pub word: &'static str,
    pub picture: &'static str,
    pub gap: usize,
}

impl MissingLetter {
    pub fn letter(&self) -> char {
        self.word.as_bytes()[self.gap] as char
    }

    /// `C _ T` style rendering.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .enumerate()
            .map(|(i, c)| if i == self.gap { '_' } else { c })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct WordBuilder {
    words: &'static [(&'static str, &'static str)],
}

impl Default for WordBuilder {
    fn default() -> Self {
        Self { words: WORDS }
    }
}

impl Quiz for WordBuilder {
    type Content = MissingLetter;
    type Answer = char;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&MissingLetter>,
    ) -> Result<Prompt<MissingLetter, char>, GenerationError> {
        ensure_domain(ALPHABET.len(), option_count)?;
        let previous_pick = previous.map(|p| (p.word, p.picture));
        let (word, picture) = avoid_repeat(rng, previous_pick.as_ref(), |r| {
            *self.words.choose(r).unwrap_or(&WORDS[0])
        });
        let gap = rng.gen_range(0..word.len());
        let content = MissingLetter { word, picture, gap };
        let letter = content.letter();
        let distractors = distinct(rng, &letter, option_count - 1, |r| {
            ALPHABET[r.gen_range(0..ALPHABET.len())] as char
        })?;
        Ok(Prompt::shuffled(content, letter, distractors, rng))
    }

    fn is_correct(&self, content: &MissingLetter, answer: &char) -> bool {
        content.letter() == *answer
    }
}

impl QuizView for WordBuilder {
    fn title(&self) -> &'static str {
        "🔤 Word Builder"
    }

    fn accent(&self) -> Color {
        Color::Rgb(200, 120, 255)
    }

    fn prompt_lines(&self, content: &MissingLetter) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Which letter is missing?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(content.picture),
            Line::from(""),
            Line::from(Span::styled(
                content.masked(),
                Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD),
            )),
        ]
    }

    fn option_label(&self, answer: &char) -> Line<'static> {
        Line::from(Span::styled(
            answer.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn masked_word_hides_the_gap() {
        let m = MissingLetter { word: "CAT", picture: "🐱", gap: 1 };
        assert_eq!(m.masked(), "C _ T");
        assert_eq!(m.letter(), 'A');
    }

    #[test]
    fn generated_rounds_have_one_matching_letter() {
        let quiz = WordBuilder::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut previous: Option<MissingLetter> = None;
        for _ in 0..100 {
            let prompt = quiz.generate(&mut rng, 4, previous.as_ref()).unwrap();
            let c = prompt.content;
            assert!(c.gap < c.word.len());
            assert!(!c.picture.is_empty());
            assert_eq!(prompt.options.iter().filter(|l| quiz.is_correct(&c, l)).count(), 1);
            if let Some(p) = previous {
                assert_ne!(p.word, c.word);
            }
            previous = Some(c);
        }
    }
}
