//! Per-visitor vote state machine.
//!
//! A visitor holds one of three states per article. The state itself lives
//! client-side (a cookie); this module only decides which counter deltas a
//! requested transition implies, or rejects it as a repeat.
//!
//! | current  | like                 | dislike              |
//! |----------|----------------------|----------------------|
//! | none     | liked, +1 pos        | disliked, +1 neg     |
//! | liked    | duplicate            | disliked, +1 neg -1 pos |
//! | disliked | liked, +1 pos -1 neg | duplicate            |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::article::ArticleId;

/// Direction of a vote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Like,
    Dislike,
}

impl VoteDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Like => "like",
            VoteDirection::Dislike => "dislike",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(VoteDirection::Like),
            "dislike" => Ok(VoteDirection::Dislike),
            other => Err(Error::InvalidInput(format!("unknown vote direction: {other}"))),
        }
    }
}

/// What a visitor has committed to for one article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorVoteState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl VisitorVoteState {
    /// Interpret a stored cookie value. Anything unrecognized counts as no vote.
    pub fn from_cookie_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("like") => VisitorVoteState::Liked,
            Some("dislike") => VisitorVoteState::Disliked,
            _ => VisitorVoteState::None,
        }
    }

    /// The committed direction, if any.
    pub fn direction(self) -> Option<VoteDirection> {
        match self {
            VisitorVoteState::None => None,
            VisitorVoteState::Liked => Some(VoteDirection::Like),
            VisitorVoteState::Disliked => Some(VoteDirection::Dislike),
        }
    }

    pub fn is_liked(self) -> bool {
        self == VisitorVoteState::Liked
    }

    pub fn is_disliked(self) -> bool {
        self == VisitorVoteState::Disliked
    }
}

impl From<VoteDirection> for VisitorVoteState {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Like => VisitorVoteState::Liked,
            VoteDirection::Dislike => VisitorVoteState::Disliked,
        }
    }
}

/// Signed counter changes to apply to an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteDelta {
    pub positive: i64,
    pub negative: i64,
}

/// An accepted transition: the deltas to persist and the state to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub delta: VoteDelta,
    pub next: VisitorVoteState,
}

/// Resolve a vote request against the visitor's current state.
///
/// # Errors
///
/// Returns `Error::DuplicateVote` when `direction` equals the committed one.
pub fn transition(id: ArticleId, current: VisitorVoteState, direction: VoteDirection) -> Result<Transition, Error> {
    let delta = match (current, direction) {
        (VisitorVoteState::Liked, VoteDirection::Like) | (VisitorVoteState::Disliked, VoteDirection::Dislike) => {
            return Err(Error::DuplicateVote(id));
        }
        (VisitorVoteState::None, VoteDirection::Like) => VoteDelta { positive: 1, negative: 0 },
        (VisitorVoteState::None, VoteDirection::Dislike) => VoteDelta { positive: 0, negative: 1 },
        (VisitorVoteState::Disliked, VoteDirection::Like) => VoteDelta { positive: 1, negative: -1 },
        (VisitorVoteState::Liked, VoteDirection::Dislike) => VoteDelta { positive: -1, negative: 1 },
    };

    Ok(Transition { delta, next: direction.into() })
}

/// Apply a delta to a counter, flooring at zero.
pub fn apply_counter(current: u32, delta: i64) -> u32 {
    (i64::from(current) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
