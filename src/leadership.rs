// 🎖️ Key Members - Party leader and secretary-general
// The party record names its leaders as free text ("<title> <name> <lastname>");
// resolve them into cards, borrowing images from the matching person record.

use crate::records::{Image, Party, Person};
use serde::{Deserialize, Serialize};

/// Position label of the party leader
pub const POSITION_LEADER: &str = "หัวหน้าพรรค";

/// Position label of the secretary-general
pub const POSITION_SECRETARY: &str = "เลขาธิการพรรค";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMember {
    /// Position index: 0 leader, 1 secretary
    pub id: usize,
    pub name: String,
    pub lastname: String,
    pub position: String,
    pub slug: String,

    /// Images of the matching person; empty when nobody matches
    pub images: Vec<Image>,
}

/// Slug of a person page: trimmed, whitespace runs replaced by "-"
pub fn people_slug(full_name: &str) -> String {
    full_name.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Split "<title> <name> <lastname...>" into (name, lastname).
///
/// None when nothing follows the title.
fn split_title_name(raw: &str) -> Option<(String, String)> {
    let mut parts = raw.split_whitespace().skip(1);
    let name = parts.next()?.to_string();
    let lastname = parts.collect::<Vec<_>>().join(" ");
    Some((name, lastname))
}

/// Leader then secretary; positions without a usable name are skipped
pub fn key_members(party: &Party, people: &[Person]) -> Vec<KeyMember> {
    let positions = [
        (party.party_leader.as_deref(), POSITION_LEADER),
        (party.party_secretary.as_deref(), POSITION_SECRETARY),
    ];

    positions
        .into_iter()
        .enumerate()
        .filter_map(|(id, (raw, position))| {
            let (name, lastname) = split_title_name(raw?)?;

            let images = people
                .iter()
                .find(|p| p.name == name && p.lastname == lastname)
                .map(|p| p.images.clone())
                .unwrap_or_default();

            Some(KeyMember {
                id,
                slug: people_slug(&format!("{} {}", name, lastname)),
                name,
                lastname,
                position: position.to_string(),
                images,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_party(leader: Option<&str>, secretary: Option<&str>) -> Party {
        let mut party = Party::new("p", "ทดสอบ");
        party.party_leader = leader.map(str::to_string);
        party.party_secretary = secretary.map(str::to_string);
        party
    }

    #[test]
    fn test_people_slug() {
        assert_eq!(people_slug("สมชาย ใจดี"), "สมชาย-ใจดี");
        assert_eq!(people_slug("  สมชาย   ณ  อยุธยา "), "สมชาย-ณ-อยุธยา");
        assert_eq!(people_slug(""), "");
    }

    #[test]
    fn test_leader_and_secretary() {
        let party = create_test_party(Some("นาย สมชาย ใจดี"), Some("นางสาว สมหญิง ณ อยุธยา"));
        let mut leader = Person::new("1", "สมชาย", "ใจดี");
        leader.images.push(Image {
            url: "/people/1.jpg".to_string(),
        });

        let members = key_members(&party, &[leader]);

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, 0);
        assert_eq!(members[0].position, POSITION_LEADER);
        assert_eq!(members[0].name, "สมชาย");
        assert_eq!(members[0].lastname, "ใจดี");
        assert_eq!(members[0].slug, "สมชาย-ใจดี");
        assert_eq!(members[0].images.len(), 1);

        assert_eq!(members[1].id, 1);
        assert_eq!(members[1].lastname, "ณ อยุธยา");
        assert_eq!(members[1].slug, "สมหญิง-ณ-อยุธยา");
        assert!(members[1].images.is_empty());
    }

    #[test]
    fn test_missing_positions_skipped() {
        let party = create_test_party(None, Some("นาย สมศักดิ์ รักชาติ"));
        let members = key_members(&party, &[]);

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, 1);
        assert_eq!(members[0].position, POSITION_SECRETARY);
    }

    #[test]
    fn test_title_only_is_skipped() {
        let party = create_test_party(Some("นาย"), Some("   "));
        assert!(key_members(&party, &[]).is_empty());
    }
}
