/// Star rating shown on the completion dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    NoStars,
    OneStar,
    TwoStars,
    ThreeStars,
}

impl Tier {
    /// Rate `correct` out of `total`: 90% and up earns three stars, 70% two,
    /// 50% one.
    pub fn from_score(correct: u32, total: u32) -> Self {
        if total == 0 {
            return Tier::NoStars;
        }
        let pct = u64::from(correct) * 100;
        let total = u64::from(total);
        if pct >= 90 * total {
            Tier::ThreeStars
        } else if pct >= 70 * total {
            Tier::TwoStars
        } else if pct >= 50 * total {
            Tier::OneStar
        } else {
            Tier::NoStars
        }
    }

    pub fn stars(self) -> u32 {
        match self {
            Tier::NoStars => 0,
            Tier::OneStar => 1,
            Tier::TwoStars => 2,
            Tier::ThreeStars => 3,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::ThreeStars => "Amazing! You're a superstar!",
            Tier::TwoStars => "Great job! Almost perfect!",
            Tier::OneStar => "Good work! Keep practicing!",
            Tier::NoStars => "Nice try! Let's play again!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_out_of_ten() {
        assert_eq!(Tier::from_score(10, 10), Tier::ThreeStars);
        assert_eq!(Tier::from_score(9, 10), Tier::ThreeStars);
        assert_eq!(Tier::from_score(8, 10), Tier::TwoStars);
        assert_eq!(Tier::from_score(7, 10), Tier::TwoStars);
        assert_eq!(Tier::from_score(6, 10), Tier::OneStar);
        assert_eq!(Tier::from_score(5, 10), Tier::OneStar);
        assert_eq!(Tier::from_score(4, 10), Tier::NoStars);
        assert_eq!(Tier::from_score(0, 10), Tier::NoStars);
    }

    #[test]
    fn empty_session_has_no_stars() {
        assert_eq!(Tier::from_score(0, 0), Tier::NoStars);
        assert_eq!(Tier::NoStars.stars(), 0);
        assert_eq!(Tier::ThreeStars.stars(), 3);
    }
}
