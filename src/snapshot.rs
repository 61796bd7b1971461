// 📦 Party Snapshot - Everything one profile render reads
// The data layer hands over a JSON snapshot (party, people, vote logs, person
// votes). A people roster can also come from a CSV export.

use crate::records::{Image, MpType, Party, Person, PersonVote, VoteLog};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

// ============================================================================
// SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySnapshot {
    pub party: Party,

    /// People records; may include other parties until `normalize` (default: empty)
    #[serde(default)]
    pub people: Vec<Person>,

    /// Vote logs, newest first after `normalize` (default: empty)
    #[serde(default)]
    pub votelogs: Vec<VoteLog>,

    /// Default: empty
    #[serde(default)]
    pub people_votes: Vec<PersonVote>,
}

impl PartySnapshot {
    pub fn new(party: Party) -> Self {
        PartySnapshot {
            party,
            people: Vec::new(),
            votelogs: Vec::new(),
            people_votes: Vec::new(),
        }
    }

    /// Load a JSON snapshot file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read snapshot file: {:?}", path.as_ref()))?;

        let snapshot: PartySnapshot =
            serde_json::from_str(&content).context("Failed to parse snapshot JSON")?;

        tracing::info!(
            party = %snapshot.party.name,
            people = snapshot.people.len(),
            votelogs = snapshot.votelogs.len(),
            people_votes = snapshot.people_votes.len(),
            "loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Keep only this party's people and order vote logs newest first.
    ///
    /// The sort is stable; undated logs go last.
    pub fn normalize(mut self) -> Self {
        let before = self.people.len();
        let party_name = self.party.name.clone();
        self.people.retain(|p| p.party == party_name);

        self.votelogs
            .sort_by(|a, b| compare_newest_first(a.vote_date, b.vote_date));

        if before != self.people.len() {
            tracing::debug!(
                dropped = before - self.people.len(),
                "dropped people from other parties"
            );
        }

        self
    }

    /// Sitting MPs of the party
    pub fn mps(&self) -> Vec<&Person> {
        crate::members::active_members(&self.people)
    }
}

fn compare_newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// PEOPLE CSV
// ============================================================================

/// One CSV row; flat columns, a single optional image URL
#[derive(Debug, Deserialize)]
struct PersonRow {
    #[serde(alias = "yamlId")]
    id: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    name: String,
    #[serde(default)]
    lastname: Option<String>,
    #[serde(default)]
    party: Option<String>,
    #[serde(default)]
    party_group: Option<String>,
    #[serde(default)]
    mp_type: Option<String>,
    #[serde(default)]
    mp_province: Option<String>,
    #[serde(default)]
    mp_zone: Option<u32>,
    #[serde(default)]
    mp_list: Option<u32>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    is_mp: Option<bool>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    education: Option<String>,
    #[serde(default)]
    occupation_group: Option<String>,
    #[serde(default, deserialize_with = "crate::records::deserialize_optional_date")]
    birthdate: Option<NaiveDate>,
    #[serde(default)]
    asset: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            slug: non_blank(row.slug),
            title: non_blank(row.title),
            name: row.name,
            lastname: row.lastname.unwrap_or_default(),
            party: row.party.unwrap_or_default(),
            party_group: non_blank(row.party_group),
            mp_type: MpType::from(row.mp_type),
            mp_province: non_blank(row.mp_province),
            mp_zone: row.mp_zone,
            mp_list: row.mp_list,
            is_active: row.is_active.unwrap_or(false),
            is_mp: row.is_mp.unwrap_or(false),
            gender: non_blank(row.gender),
            education: non_blank(row.education),
            occupation_group: non_blank(row.occupation_group),
            birthdate: row.birthdate,
            asset: row.asset,
            images: non_blank(row.image_url)
                .map(|url| vec![Image { url }])
                .unwrap_or_default(),
        }
    }
}

/// Read a people roster CSV (header row required)
pub fn load_people_csv(csv_path: &Path) -> Result<Vec<Person>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open people CSV: {:?}", csv_path))?;

    let mut people = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let row: PersonRow =
            result.with_context(|| format!("Failed to deserialize person on line {}", line + 2))?;
        people.push(Person::from(row));
    }

    tracing::info!(people = people.len(), path = ?csv_path, "loaded people CSV");

    Ok(people)
}

// ============================================================================
// TESTS
// ============================================================================
