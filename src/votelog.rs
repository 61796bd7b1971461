// 🗳️ Vote-Log Join - People × PersonVote × VoteLog
// Denormalizes per-person vote choices onto the vote logs they belong to, so
// each log can be shown as a compact card with the party's choices.
//
// Output order is the input vote-log order (newest first, as supplied).

use crate::records::{Person, PersonVote, VoteChoice, VoteLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// DISPLAY WINDOW
// ============================================================================

/// Which joined vote logs reach the page.
///
/// A log is kept when a member voted on it or when it is one of the first
/// `recent` logs; the kept logs are then cut to `limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinWindow {
    /// Leading logs kept even without member choices (default: 0)
    pub recent: usize,

    /// Maximum number of cards (default: None, unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl JoinWindow {
    /// Keep only logs with at least one member choice
    pub fn voted_only() -> Self {
        JoinWindow::default()
    }

    /// Keep every log in the input
    pub fn everything() -> Self {
        JoinWindow {
            recent: usize::MAX,
            limit: None,
        }
    }

    /// Builder pattern: cap the number of cards
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn retains(&self, position: usize, has_choices: bool) -> bool {
        has_choices || position < self.recent
    }
}

// ============================================================================
// ENRICHED VOTE LOG
// ============================================================================

/// One member's recorded choice on a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberChoice {
    pub person_id: String,
    pub name: String,
    pub lastname: String,
    pub choice: VoteChoice,
}

/// Per-choice counts for one log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub approve: usize,
    pub disprove: usize,
    pub abstain: usize,
    pub no_vote: usize,
    pub absent: usize,
    pub other: usize,
}

impl VoteTally {
    pub fn record(&mut self, choice: &VoteChoice) {
        match choice {
            VoteChoice::Approve => self.approve += 1,
            VoteChoice::Disprove => self.disprove += 1,
            VoteChoice::Abstain => self.abstain += 1,
            VoteChoice::NoVote => self.no_vote += 1,
            VoteChoice::Absent => self.absent += 1,
            VoteChoice::Other(_) => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.approve + self.disprove + self.abstain + self.no_vote + self.absent + self.other
    }
}

/// A vote log with the party members' choices attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVoteLog {
    #[serde(rename = "yamlId")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_th: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_date: Option<NaiveDate>,

    /// Member choices in member order
    pub choices: Vec<MemberChoice>,

    pub tally: VoteTally,
}

impl EnrichedVoteLog {
    fn from_log(log: &VoteLog, choices: Vec<MemberChoice>) -> Self {
        let mut tally = VoteTally::default();
        for member_choice in &choices {
            tally.record(&member_choice.choice);
        }

        EnrichedVoteLog {
            id: log.id.clone(),
            slug: log.slug.clone(),
            title: log.title.clone(),
            description_th: log.description_th.clone(),
            passed: log.passed,
            vote_date: log.vote_date,
            choices,
            tally,
        }
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}

// ============================================================================
// JOIN
// ============================================================================

/// person id → (vote-log id → choice); the first entry for a key wins
fn build_choice_lookup(people_votes: &[PersonVote]) -> HashMap<&str, HashMap<&str, &VoteChoice>> {
    let mut lookup: HashMap<&str, HashMap<&str, &VoteChoice>> = HashMap::new();

    for person_vote in people_votes {
        let choices = lookup.entry(person_vote.id.as_str()).or_default();
        for entry in &person_vote.votelog {
            choices.entry(entry.key.as_str()).or_insert(&entry.value);
        }
    }

    lookup
}

/// Attach each member's choice to the vote logs, keeping input order.
///
/// Keys in `people_votes` that name no supplied vote log are never visited.
/// Members without a PersonVote record simply contribute nothing.
pub fn join_people_votelog(
    members: &[&Person],
    people_votes: &[PersonVote],
    votelogs: &[VoteLog],
    window: &JoinWindow,
) -> Vec<EnrichedVoteLog> {
    let lookup = build_choice_lookup(people_votes);

    // Resolve each member's map once instead of per log
    let member_choices: Vec<(&Person, &HashMap<&str, &VoteChoice>)> = members
        .iter()
        .filter_map(|&member| lookup.get(member.id.as_str()).map(|c| (member, c)))
        .collect();

    let mut joined = Vec::new();

    for (position, log) in votelogs.iter().enumerate() {
        if window.limit.is_some_and(|limit| joined.len() >= limit) {
            break;
        }

        let choices: Vec<MemberChoice> = member_choices
            .iter()
            .filter_map(|(member, choices)| {
                choices.get(log.id.as_str()).map(|&choice| MemberChoice {
                    person_id: member.id.clone(),
                    name: member.name.clone(),
                    lastname: member.lastname.clone(),
                    choice: choice.clone(),
                })
            })
            .collect();

        let enriched = EnrichedVoteLog::from_log(log, choices);
        if window.retains(position, enriched.has_choices()) {
            joined.push(enriched);
        }
    }

    tracing::debug!(
        votelogs = votelogs.len(),
        retained = joined.len(),
        "joined people votes onto vote logs"
    );

    joined
}

// ============================================================================
// TESTS
// ============================================================================
