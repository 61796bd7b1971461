// 🗂️ Records - Typed snapshot of party, people and vote data
// Everything here is read-only input supplied by the data layer.
//
// Loosely-typed source records become explicit structs. Every optional field
// is an `Option` (default: None) or a documented default.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Label of list-seat MPs in the source data
pub const MP_TYPE_PARTY_LIST: &str = "บัญชีรายชื่อ";

/// Label of constituency MPs in the source data
pub const MP_TYPE_CONSTITUENCY: &str = "แบ่งเขต";

// ============================================================================
// MEMBERSHIP TYPE
// ============================================================================

/// How an MP holds their seat.
///
/// Deserialized from an optional string: `null`, missing or blank values
/// become `Unassigned`, unknown labels are preserved in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum MpType {
    /// List seat ("บัญชีรายชื่อ")
    PartyList,

    /// Constituency seat ("แบ่งเขต")
    Constituency,

    /// Any other label, kept verbatim
    Other(String),

    /// No membership type recorded
    #[default]
    Unassigned,
}

impl MpType {
    /// Parse a source label
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" => MpType::Unassigned,
            MP_TYPE_PARTY_LIST => MpType::PartyList,
            MP_TYPE_CONSTITUENCY => MpType::Constituency,
            other => MpType::Other(other.to_string()),
        }
    }

    /// Source label, None when unassigned
    pub fn label(&self) -> Option<&str> {
        match self {
            MpType::PartyList => Some(MP_TYPE_PARTY_LIST),
            MpType::Constituency => Some(MP_TYPE_CONSTITUENCY),
            MpType::Other(label) => Some(label.as_str()),
            MpType::Unassigned => None,
        }
    }
}

impl From<Option<String>> for MpType {
    fn from(value: Option<String>) -> Self {
        value
            .map(|label| MpType::from_label(&label))
            .unwrap_or(MpType::Unassigned)
    }
}

impl From<MpType> for Option<String> {
    fn from(value: MpType) -> Self {
        value.label().map(str::to_string)
    }
}

// ============================================================================
// PERSON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Person - one politician as supplied by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Source identifier (`yamlId`); numbers are accepted and stored as text
    #[serde(rename = "yamlId", alias = "id", deserialize_with = "deserialize_id")]
    pub id: String,

    /// Page slug (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Honorific, e.g. "นาย" (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub name: String,

    /// Last name (default: empty)
    #[serde(default)]
    pub lastname: String,

    /// Party name this person currently belongs to (default: empty)
    #[serde(default)]
    pub party: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_group: Option<String>,

    /// Membership type (default: Unassigned)
    #[serde(default)]
    pub mp_type: MpType,

    /// Province of a constituency seat (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_province: Option<String>,

    /// Zone number within the province (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_zone: Option<u32>,

    /// Party-list position (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_list: Option<u32>,

    /// Default: false
    #[serde(default)]
    pub is_active: bool,

    /// Sitting MP flag (default: false)
    #[serde(default)]
    pub is_mp: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation_group: Option<String>,

    /// Birth date; empty strings are treated as missing (default: None)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthdate: Option<NaiveDate>,

    /// Declared asset value in baht (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<f64>,

    /// Default: empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

impl Person {
    /// Minimal person with only identity and name set
    pub fn new(id: impl Into<String>, name: impl Into<String>, lastname: impl Into<String>) -> Self {
        Person {
            id: id.into(),
            slug: None,
            title: None,
            name: name.into(),
            lastname: lastname.into(),
            party: String::new(),
            party_group: None,
            mp_type: MpType::Unassigned,
            mp_province: None,
            mp_zone: None,
            mp_list: None,
            is_active: false,
            is_mp: false,
            gender: None,
            education: None,
            occupation_group: None,
            birthdate: None,
            asset: None,
            images: Vec::new(),
        }
    }

    /// "name lastname", without a trailing space when lastname is empty
    pub fn full_name(&self) -> String {
        if self.lastname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.lastname)
        }
    }

    /// Age in whole calendar years on `as_of`; None without a birthdate or
    /// when the birthdate lies after `as_of`
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        self.birthdate.and_then(|birthdate| as_of.years_since(birthdate))
    }
}

// ============================================================================
// VOTE LOG
// ============================================================================

/// VoteLog - one recorded legislative vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteLog {
    #[serde(rename = "yamlId", alias = "id", deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_th: Option<String>,

    /// Outcome; None when not yet recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub vote_date: Option<NaiveDate>,
}

impl VoteLog {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        VoteLog {
            id: id.into(),
            slug: None,
            title: title.into(),
            description_th: None,
            passed: None,
            vote_date: None,
        }
    }
}

// ============================================================================
// PERSON VOTE
// ============================================================================

/// A recorded vote choice.
///
/// Labels outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VoteChoice {
    /// "เห็นด้วย"
    Approve,
    /// "ไม่เห็นด้วย"
    Disprove,
    /// "งดออกเสียง"
    Abstain,
    /// "ไม่ลงคะแนนเสียง"
    NoVote,
    /// "ขาด"
    Absent,
    Other(String),
}

impl VoteChoice {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "เห็นด้วย" => VoteChoice::Approve,
            "ไม่เห็นด้วย" => VoteChoice::Disprove,
            "งดออกเสียง" => VoteChoice::Abstain,
            "ไม่ลงคะแนนเสียง" | "ไม่ลงคะแนน" => VoteChoice::NoVote,
            "ขาด" | "ขาดประชุม" => VoteChoice::Absent,
            other => VoteChoice::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            VoteChoice::Approve => "เห็นด้วย",
            VoteChoice::Disprove => "ไม่เห็นด้วย",
            VoteChoice::Abstain => "งดออกเสียง",
            VoteChoice::NoVote => "ไม่ลงคะแนนเสียง",
            VoteChoice::Absent => "ขาด",
            VoteChoice::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for VoteChoice {
    fn from(value: String) -> Self {
        VoteChoice::from_label(&value)
    }
}

impl From<VoteChoice> for String {
    fn from(value: VoteChoice) -> Self {
        value.label().to_string()
    }
}

/// One `{key, value}` entry: vote-log id → choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteChoiceEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub key: String,
    pub value: VoteChoice,
}

/// PersonVote - all recorded choices of one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonVote {
    /// Person identifier this record belongs to
    #[serde(rename = "yamlId", alias = "id", deserialize_with = "deserialize_id")]
    pub id: String,

    /// Default: empty
    #[serde(default)]
    pub votelog: Vec<VoteChoiceEntry>,
}

impl PersonVote {
    pub fn new(id: impl Into<String>) -> Self {
        PersonVote {
            id: id.into(),
            votelog: Vec::new(),
        }
    }

    /// Builder pattern: add one recorded choice
    pub fn with_choice(mut self, votelog_id: impl Into<String>, choice: VoteChoice) -> Self {
        self.votelog.push(VoteChoiceEntry {
            key: votelog_id.into(),
            value: choice,
        });
        self
    }
}

// ============================================================================
// PARTY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyEnglish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Party - the profile subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "yamlId", alias = "id", deserialize_with = "deserialize_id")]
    pub id: String,

    /// Thai name, without the "พรรค" prefix
    pub name: String,

    /// English names (default: all None)
    #[serde(default)]
    pub en: PartyEnglish,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub established_date: Option<NaiveDate>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub dissolved_date: Option<NaiveDate>,

    /// Page background color, e.g. "#FF0000" (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_group: Option<String>,

    /// Leader as "<title> <name> <lastname>" (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_leader: Option<String>,

    /// Secretary-general, same format as the leader (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_secretary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    /// Default: false
    #[serde(default)]
    pub is_active: bool,

    /// e.g. "พรรค" (default: None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_type: Option<String>,
}

impl Party {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Party {
            id: id.into(),
            name: name.into(),
            en: PartyEnglish::default(),
            description: None,
            established_date: None,
            dissolved_date: None,
            color: None,
            party_group: None,
            party_leader: None,
            party_secretary: None,
            website: None,
            facebook: None,
            twitter: None,
            is_active: false,
            party_type: None,
        }
    }
}

// ============================================================================
// SERDE HELPERS
// ============================================================================

/// Accept identifiers written either as text or as numbers
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

/// `YYYY-MM-DD`, with null and blank strings mapped to None
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp_type_from_label() {
        assert_eq!(MpType::from_label("บัญชีรายชื่อ"), MpType::PartyList);
        assert_eq!(MpType::from_label("แบ่งเขต"), MpType::Constituency);
        assert_eq!(MpType::from_label("  "), MpType::Unassigned);
        assert_eq!(
            MpType::from_label("สว."),
            MpType::Other("สว.".to_string())
        );
    }

    #[test]
    fn test_person_deserialize_with_numeric_id_and_missing_fields() {
        let json = r#"{
            "yamlId": 1,
            "name": "สมชาย",
            "lastname": "ใจดี",
            "mp_type": "บัญชีรายชื่อ",
            "mp_list": 3,
            "is_mp": true,
            "birthdate": ""
        }"#;

        let person: Person = serde_json::from_str(json).unwrap();

        assert_eq!(person.id, "1");
        assert_eq!(person.mp_type, MpType::PartyList);
        assert_eq!(person.mp_list, Some(3));
        assert_eq!(person.birthdate, None);
        assert!(person.images.is_empty());
        assert!(!person.is_active);
    }

    #[test]
    fn test_person_null_mp_type_is_unassigned() {
        let json = r#"{"yamlId": "p1", "name": "ก", "mp_type": null}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.mp_type, MpType::Unassigned);
    }

    #[test]
    fn test_person_serializes_mp_type_as_label() {
        let mut person = Person::new("p1", "ก", "ข");
        person.mp_type = MpType::Constituency;

        let value = serde_json::to_value(&person).unwrap();

        assert_eq!(value["yamlId"], "p1");
        assert_eq!(value["mp_type"], "แบ่งเขต");
        assert!(value.get("mp_zone").is_none());
    }

    #[test]
    fn test_age_on() {
        let mut person = Person::new("p1", "ก", "ข");
        person.birthdate = NaiveDate::from_ymd_opt(1980, 6, 15);

        let before_birthday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let before_birth = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

        assert_eq!(person.age_on(before_birthday), Some(43));
        assert_eq!(person.age_on(on_birthday), Some(44));
        assert_eq!(person.age_on(before_birth), None);
    }

    #[test]
    fn test_vote_choice_labels() {
        assert_eq!(VoteChoice::from_label("เห็นด้วย"), VoteChoice::Approve);
        assert_eq!(VoteChoice::from_label("ขาด"), VoteChoice::Absent);
        assert_eq!(
            VoteChoice::from_label("ลา"),
            VoteChoice::Other("ลา".to_string())
        );
        assert_eq!(VoteChoice::Disprove.label(), "ไม่เห็นด้วย");
    }

    #[test]
    fn test_person_vote_deserialize() {
        let json = r#"{"yamlId": 1, "votelog": [{"key": "v1", "value": "เห็นด้วย"}]}"#;
        let vote: PersonVote = serde_json::from_str(json).unwrap();

        assert_eq!(vote.id, "1");
        assert_eq!(vote.votelog.len(), 1);
        assert_eq!(vote.votelog[0].key, "v1");
        assert_eq!(vote.votelog[0].value, VoteChoice::Approve);
    }

    #[test]
    fn test_party_deserialize_optional_fields() {
        let json = r#"{
            "yamlId": "party-a",
            "name": "ก้าวหน้า",
            "en": {"name": "Progress"},
            "established_date": "2018-03-15",
            "party_leader": null
        }"#;

        let party: Party = serde_json::from_str(json).unwrap();

        assert_eq!(party.en.name.as_deref(), Some("Progress"));
        assert_eq!(party.established_date, NaiveDate::from_ymd_opt(2018, 3, 15));
        assert_eq!(party.party_leader, None);
        assert_eq!(party.dissolved_date, None);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let json = r#"{"yamlId": "v1", "title": "x", "vote_date": "15/03/2020"}"#;
        assert!(serde_json::from_str::<VoteLog>(json).is_err());
    }
}
