use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::prelude::*;

use crate::games::quiz::QuizView;
use crate::round::sampling::{avoid_repeat, distinct, ensure_domain};
use crate::round::{GenerationError, Prompt, Quiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub capital: &'static str,
    pub flag: &'static str,
}

const fn country(name: &'static str, capital: &'static str, flag: &'static str) -> Country {
    Country { name, capital, flag }
}

pub const COUNTRIES: &[Country] = &[
    country("France", "Paris", "🇫🇷"),
    country("Italy", "Rome", "🇮🇹"),
    country("Spain", "Madrid", "🇪🇸"),
    country("Germany", "Berlin", "🇩🇪"),
    country("Japan", "Tokyo", "🇯🇵"),
    country("Egypt", "Cairo", "🇪🇬"),
    country("Kenya", "Nairobi", "🇰🇪"),
    country("Canada", "Ottawa", "🇨🇦"),
    country("Mexico", "Mexico City", "🇲🇽"),
    country("Brazil", "Brasília", "🇧🇷"),
    country("Peru", "Lima", "🇵🇪"),
    country("India", "New Delhi", "🇮🇳"),
    country("China", "Beijing", "🇨🇳"),
    country("Australia", "Canberra", "🇦🇺"),
    country("Norway", "Oslo", "🇳🇴"),
    country("Greece", "Athens", "🇬🇷"),
    country("Ireland", "Dublin", "🇮🇪"),
    country("Portugal", "Lisbon", "🇵🇹"),
    country("Thailand", "Bangkok", "🇹🇭"),
    country("Argentina", "Buenos Aires", "🇦🇷"),
];

/// Timed country/capital matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capitals;

impl Quiz for Capitals {
    type Content = Country;
    type Answer = &'static str;

    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&Country>,
    ) -> Result<Prompt<Country, &'static str>, GenerationError> {
        ensure_domain(COUNTRIES.len(), option_count)?;
        let target = avoid_repeat(rng, previous, |r| *COUNTRIES.choose(r).unwrap_or(&COUNTRIES[0]));
        let distractors = distinct(rng, &target.capital, option_count - 1, |r| {
            COUNTRIES[r.gen_range(0..COUNTRIES.len())].capital
        })?;
        Ok(Prompt::shuffled(target, target.capital, distractors, rng))
    }

    fn is_correct(&self, content: &Country, answer: &&'static str) -> bool {
        content.capital == *answer
    }
}

impl QuizView for Capitals {
    fn title(&self) -> &'static str {
        "🌍 Capitals"
    }

    fn accent(&self) -> Color {
        Color::Rgb(90, 170, 255)
    }

    fn prompt_lines(&self, c: &Country) -> Vec<Line<'static>> {
        vec![
            Line::from(c.flag),
            Line::from(""),
            Line::from(vec![
                Span::styled("What is the capital of ", Style::default().fg(Color::Rgb(180, 180, 200))),
                Span::styled(c.name, Style::default().fg(Color::Rgb(90, 170, 255)).add_modifier(Modifier::BOLD)),
                Span::styled("?", Style::default().fg(Color::Rgb(180, 180, 200))),
            ]),
        ]
    }

    fn option_label(&self, answer: &&'static str) -> Line<'static> {
        Line::from(Span::styled(*answer, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn capitals_are_unique_in_the_pool() {
        for (i, a) in COUNTRIES.iter().enumerate() {
            for b in &COUNTRIES[i + 1..] {
                assert_ne!(a.capital, b.capital);
            }
        }
    }

    #[test]
    fn no_country_twice_in_a_row() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut previous: Option<Country> = None;
        for _ in 0..100 {
            let prompt = Capitals.generate(&mut rng, 4, previous.as_ref()).unwrap();
            assert_ne!(Some(prompt.content), previous);
            assert!(prompt.options.contains(&prompt.content.capital));
            previous = Some(prompt.content);
        }
    }
}
