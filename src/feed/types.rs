use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

// Normalized play-by-play types used by the engine (provider-agnostic).

/// A single snap as reported by the data provider. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub play_id: String,
    pub description: String,
    /// Provider yard-line descriptor: `"NE 35"`, or `"50"` at midfield.
    pub yard_line: String,
    pub yards_to_go: u8,
    /// 1-4 regulation, 5 overtime.
    pub quarter: u8,
    /// Time left in the quarter, `"MM:SS"`.
    pub clock: String,
    pub possessing_team: String,
    /// Index into the owning game's `drives`.
    pub drive: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drive {
    pub index: usize,
    pub possessing_team: String,
    /// Indices into the owning game's chronological `plays`.
    pub plays: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub game_id: String,
    pub date: Option<NaiveDate>,
    pub home: String,
    pub away: String,
    pub drives: Vec<Drive>,
    /// Every play across every drive, in game order.
    pub plays: Vec<Play>,
}

impl Game {
    /// Build a game from drives given in chronological order. Each play's
    /// `drive` field is overwritten with the index of the drive it came from.
    pub fn from_drives(
        game_id: impl Into<String>,
        date: Option<NaiveDate>,
        home: impl Into<String>,
        away: impl Into<String>,
        drives: Vec<(String, Vec<Play>)>,
    ) -> Self {
        let mut game = Game {
            game_id: game_id.into(),
            date,
            home: home.into(),
            away: away.into(),
            drives: Vec::with_capacity(drives.len()),
            plays: Vec::new(),
        };
        for (index, (possessing_team, plays)) in drives.into_iter().enumerate() {
            let mut drive = Drive { index, possessing_team, plays: Vec::with_capacity(plays.len()) };
            for mut play in plays {
                play.drive = index;
                drive.plays.push(game.plays.len());
                game.plays.push(play);
            }
            game.drives.push(drive);
        }
        game
    }

    /// The team that is not `team`. Unknown codes map to the home side.
    pub fn opponent_of(&self, team: &str) -> &str {
        if team == self.home {
            &self.away
        } else {
            &self.home
        }
    }

    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away, self.home)
    }
}

/// A play together with its back-reference to the game that owns it.
#[derive(Debug, Clone)]
pub struct PlayHandle {
    game: Arc<Game>,
    index: usize,
}

impl PlayHandle {
    /// Returns `None` when `index` is outside the game's play list.
    pub fn new(game: Arc<Game>, index: usize) -> Option<Self> {
        (index < game.plays.len()).then_some(Self { game, index })
    }

    pub fn play(&self) -> &Play {
        &self.game.plays[self.index]
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn shared_game(&self) -> &Arc<Game> {
        &self.game
    }

    pub fn drive(&self) -> &Drive {
        &self.game.drives[self.play().drive]
    }

    pub fn same_play(&self, other: &PlayHandle) -> bool {
        Arc::ptr_eq(&self.game, &other.game) && self.index == other.index
    }
}

impl fmt::Display for PlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game.game_id, self.play().play_id)
    }
}
