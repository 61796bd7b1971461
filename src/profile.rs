// 🏛️ Party Profile - One render's worth of derived data
// Pulls the filter/sort, statistics, vote-log join and key members together
// into a single serializable view for the presentation layer.

use crate::config::ProfileConfig;
use crate::leadership::{key_members, KeyMember};
use crate::members::{member_tabs, sorted_members, MemberFilter, MemberTab};
use crate::records::{Party, Person};
use crate::snapshot::PartySnapshot;
use crate::stats::{CategoryStats, StatsEngine};
use crate::votelog::{join_people_votelog, EnrichedVoteLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// PROFILE VIEW
// ============================================================================

/// Official links; absent ones are omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyHeader {
    pub id: String,
    pub name: String,

    /// "พรรค<name>"
    pub display_name: String,

    /// "<english name> Party"; None without an English name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub links: PartyLinks,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissolved_date: Option<NaiveDate>,

    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyProfile {
    pub party: PartyHeader,

    /// Everyone on record for the party, MPs or not
    pub total_people: usize,

    pub key_members: Vec<KeyMember>,

    /// Sitting MPs
    pub mp_count: usize,

    pub stats: CategoryStats,

    pub filter: MemberFilter,
    pub tabs: Vec<MemberTab>,

    /// MPs matching `filter`, in display order
    pub members: Vec<Person>,

    pub votelogs: Vec<EnrichedVoteLog>,
}

impl PartyProfile {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} people, {} MPs ({} shown), {} vote logs, {} key members",
            self.party.display_name,
            self.total_people,
            self.mp_count,
            self.members.len(),
            self.votelogs.len(),
            self.key_members.len()
        )
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Build the profile for one render.
///
/// `snapshot` is expected to be normalized (party people only, vote logs
/// newest first). Ages are computed on `as_of`.
pub fn build_party_profile(
    snapshot: &PartySnapshot,
    filter: &MemberFilter,
    config: &ProfileConfig,
    as_of: NaiveDate,
) -> PartyProfile {
    let party = &snapshot.party;
    let mps = snapshot.mps();

    let stats = StatsEngine::with_config(config.stats.clone()).load_category_stats(&mps, as_of);

    // Votes are joined against every party person, not only sitting MPs
    let everyone: Vec<&Person> = snapshot.people.iter().collect();
    let votelogs = join_people_votelog(
        &everyone,
        &snapshot.people_votes,
        &snapshot.votelogs,
        &config.votelog_window,
    );

    let members: Vec<Person> = sorted_members(&mps, filter).into_iter().cloned().collect();

    let profile = PartyProfile {
        party: PartyHeader::from(party),
        total_people: snapshot.people.len(),
        key_members: key_members(party, &snapshot.people),
        mp_count: mps.len(),
        stats,
        filter: filter.clone(),
        tabs: member_tabs(&mps, filter),
        members,
        votelogs,
    };

    tracing::debug!(summary = %profile.summary(), "built party profile");

    profile
}

impl From<&Party> for PartyHeader {
    fn from(party: &Party) -> Self {
        PartyHeader {
            id: party.id.clone(),
            name: party.name.clone(),
            display_name: format!("พรรค{}", party.name),
            english_title: party.en.name.as_ref().map(|en| format!("{} Party", en)),
            description: party.description.clone(),
            color: party.color.clone(),
            links: PartyLinks {
                website: party.website.clone(),
                facebook: party.facebook.clone(),
                twitter: party.twitter.clone(),
            },
            established_date: party.established_date,
            dissolved_date: party.dissolved_date,
            is_active: party.is_active,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{MpType, PersonVote, VoteChoice, VoteLog};
    use crate::votelog::JoinWindow;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn create_test_snapshot() -> PartySnapshot {
        let mut party = Party::new("progress", "ก้าวหน้า");
        party.en.name = Some("Progress".to_string());
        party.party_leader = Some("นาย ขจร ดีงาม".to_string());
        party.website = Some("https://example.org".to_string());

        let mut first = Person::new("1", "ก", "");
        first.mp_type = MpType::PartyList;
        first.mp_list = Some(3);

        let mut second = Person::new("2", "ข", "");
        second.mp_type = MpType::PartyList;
        second.mp_list = Some(1);

        let mut third = Person::new("3", "ขจร", "ดีงาม");
        third.mp_type = MpType::Constituency;
        third.mp_province = Some("ขอนแก่น".to_string());
        third.mp_zone = Some(1);

        let mut former = Person::new("4", "ง", "");
        former.is_mp = false;

        let mut people = vec![first, second, third];
        for person in people.iter_mut() {
            person.is_mp = true;
        }
        people.push(former);
        for person in people.iter_mut() {
            person.party = "ก้าวหน้า".to_string();
        }

        let mut snapshot = PartySnapshot::new(party);
        snapshot.people = people;
        snapshot.votelogs = vec![VoteLog::new("v1", "ร่าง พ.ร.บ."), VoteLog::new("v2", "ญัตติ")];
        snapshot.people_votes = vec![
            PersonVote::new("1").with_choice("v1", VoteChoice::Approve),
            PersonVote::new("4").with_choice("v1", VoteChoice::Disprove),
        ];
        snapshot
    }

    #[test]
    fn test_build_profile_with_list_filter() {
        let snapshot = create_test_snapshot();
        let config = ProfileConfig {
            votelog_window: JoinWindow {
                recent: 2,
                limit: None,
            },
            ..ProfileConfig::default()
        };

        let profile = build_party_profile(
            &snapshot,
            &MemberFilter::by_type(MpType::PartyList),
            &config,
            as_of(),
        );

        assert_eq!(profile.party.display_name, "พรรคก้าวหน้า");
        assert_eq!(profile.party.english_title.as_deref(), Some("Progress Party"));
        assert_eq!(profile.party.links.website.as_deref(), Some("https://example.org"));
        assert_eq!(profile.total_people, 4);
        assert_eq!(profile.mp_count, 3);

        let shown: Vec<&str> = profile.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(shown, vec!["ข", "ก"]);
        assert!(profile.tabs[1].active);
        assert_eq!(profile.tabs[0].count, 3);

        // Former members' votes still count toward the party's record
        assert_eq!(profile.votelogs.len(), 2);
        assert_eq!(profile.votelogs[0].tally.approve, 1);
        assert_eq!(profile.votelogs[0].tally.disprove, 1);
        assert!(profile.votelogs[1].choices.is_empty());

        assert_eq!(profile.key_members.len(), 1);
        assert_eq!(profile.key_members[0].slug, "ขจร-ดีงาม");

        assert_eq!(profile.stats.mp_type.get("บัญชีรายชื่อ"), Some(2));
        assert_eq!(profile.stats.mp_type.get("แบ่งเขต"), Some(1));
        assert_eq!(profile.stats.gender.total(), 3);
    }

    #[test]
    fn test_default_window_hides_unvoted_logs() {
        let snapshot = create_test_snapshot();

        let profile = build_party_profile(
            &snapshot,
            &MemberFilter::all(),
            &ProfileConfig::default(),
            as_of(),
        );

        let ids: Vec<&str> = profile.votelogs.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1"]);
        assert!(profile.tabs[0].active);
        assert_eq!(profile.members.len(), 3);
    }

    #[test]
    fn test_empty_party() {
        let snapshot = PartySnapshot::new(Party::new("empty", "ว่าง"));

        let profile = build_party_profile(
            &snapshot,
            &MemberFilter::all(),
            &ProfileConfig::default(),
            as_of(),
        );

        assert_eq!(profile.total_people, 0);
        assert_eq!(profile.mp_count, 0);
        assert!(profile.members.is_empty());
        assert!(profile.votelogs.is_empty());
        assert!(profile.key_members.is_empty());
        assert_eq!(profile.party.english_title, None);
        assert!(profile.tabs.iter().all(|t| t.count == 0));
    }

    #[test]
    fn test_example_snapshot() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/snapshot.example.json");
        let snapshot = PartySnapshot::from_file(path).unwrap().normalize();

        let profile = build_party_profile(
            &snapshot,
            &MemberFilter::by_type(MpType::Constituency),
            &ProfileConfig::default(),
            as_of(),
        );

        assert_eq!(profile.total_people, 5);
        assert_eq!(profile.mp_count, 4);

        // กรุงเทพมหานคร before ขอนแก่น
        let shown: Vec<&str> = profile.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(shown, vec!["4", "3"]);

        // v2 has no member choices; v9 is not a known vote log
        let ids: Vec<&str> = profile.votelogs.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v3", "v1"]);
        assert_eq!(profile.votelogs[0].tally.total(), 3);

        assert_eq!(profile.key_members.len(), 2);
        assert_eq!(profile.key_members[0].images.len(), 1);

        for (_, dimension) in profile.stats.dimensions() {
            assert_eq!(dimension.total(), 4);
        }
    }

    #[test]
    fn test_profile_serializes() {
        let snapshot = create_test_snapshot();
        let profile = build_party_profile(
            &snapshot,
            &MemberFilter::all(),
            &ProfileConfig::default(),
            as_of(),
        );

        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["party"]["display_name"], "พรรคก้าวหน้า");
        assert_eq!(value["votelogs"][0]["yamlId"], "v1");
        assert_eq!(value["votelogs"][0]["choices"][0]["choice"], "เห็นด้วย");
        assert!(value["party"]["links"].get("twitter").is_none());
    }
}
