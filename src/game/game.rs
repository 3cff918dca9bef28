use rand::seq::IndexedRandom;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }

    fn random() -> Choice {
        Self::ALL
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(Choice::Rock)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    UserWin,
    ComputerWin,
    Tie,
}

impl Outcome {
    pub fn decide(user: Choice, opponent: Choice) -> Outcome {
        if user == opponent {
            Outcome::Tie
        } else if user.beats(opponent) {
            Outcome::UserWin
        } else {
            Outcome::ComputerWin
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Outcome::UserWin => "You win!",
            Outcome::ComputerWin => "Computer wins!",
            Outcome::Tie => "Tie!",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Round {
    pub user: Choice,
    pub opponent: Choice,
    pub outcome: Outcome,
}

impl Round {
    pub fn summary(&self) -> String {
        format!(
            "{}\nYou: {} vs PC: {}",
            self.outcome.verdict(),
            self.user,
            self.opponent
        )
    }
}

/// Wins per side since process start. Only ever increases.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Score {
    pub user: u32,
    pub computer: u32,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} - {}", self.user, self.computer)
    }
}

#[derive(Debug, Default)]
pub struct Game {
    score: Score,
    last_round: Option<Round>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays one round against a uniformly random opponent.
    pub fn play(&mut self, user: Choice) -> Round {
        self.play_against(user, Choice::random())
    }

    pub fn play_against(&mut self, user: Choice, opponent: Choice) -> Round {
        let outcome = Outcome::decide(user, opponent);
        match outcome {
            Outcome::UserWin => self.score.user += 1,
            Outcome::ComputerWin => self.score.computer += 1,
            Outcome::Tie => {}
        }

        let round = Round {
            user,
            opponent,
            outcome,
        };
        log::debug!("round: {user} vs {opponent} -> {outcome:?}, {}", self.score);
        self.last_round = Some(round);
        round
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn result_text(&self) -> String {
        self.last_round
            .map(|r| r.summary())
            .unwrap_or_else(|| "Choose your move!".to_string())
    }
}
