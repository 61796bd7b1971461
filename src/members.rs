// 👥 Member Filter & Sort - Which MPs to show, and in what order
// Filter by membership type, then sort with a policy chosen by the filter:
// list position, province + zone, or name.

use crate::collation::{thai_compare, thai_compare_opt};
use crate::records::{MpType, Person};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// MEMBER FILTER
// ============================================================================

/// Current member selection. An empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_type: Option<MpType>,
}

impl MemberFilter {
    /// Matches every member
    pub fn all() -> Self {
        MemberFilter { mp_type: None }
    }

    pub fn by_type(mp_type: MpType) -> Self {
        MemberFilter {
            mp_type: Some(mp_type),
        }
    }

    /// Parse a CLI/source label; blank means no filter
    pub fn from_label(label: &str) -> Self {
        match MpType::from_label(label) {
            MpType::Unassigned => MemberFilter::all(),
            mp_type => MemberFilter::by_type(mp_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mp_type.is_none()
    }

    pub fn matches(&self, person: &Person) -> bool {
        match &self.mp_type {
            None => true,
            Some(mp_type) => &person.mp_type == mp_type,
        }
    }
}

// ============================================================================
// SORT POLICY
// ============================================================================

/// Display order for a member list, one comparator per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// Ascending party-list position
    ListSeat,

    /// Province (Thai order), then zone
    ConstituencySeat,

    /// First name, then last name (Thai order)
    ByName,
}

impl SortPolicy {
    pub fn for_filter(filter: &MemberFilter) -> Self {
        match filter.mp_type {
            Some(MpType::PartyList) => SortPolicy::ListSeat,
            Some(MpType::Constituency) => SortPolicy::ConstituencySeat,
            _ => SortPolicy::ByName,
        }
    }

    pub fn compare(&self, a: &Person, b: &Person) -> Ordering {
        match self {
            SortPolicy::ListSeat => compare_missing_last(a.mp_list, b.mp_list),
            SortPolicy::ConstituencySeat => {
                if a.mp_province == b.mp_province {
                    compare_missing_last(a.mp_zone, b.mp_zone)
                } else {
                    thai_compare_opt(a.mp_province.as_deref(), b.mp_province.as_deref())
                }
            }
            SortPolicy::ByName => {
                if a.name == b.name {
                    thai_compare(&a.lastname, &b.lastname)
                } else {
                    thai_compare(&a.name, &b.name)
                }
            }
        }
    }
}

fn compare_missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Sitting MPs only
pub fn active_members(people: &[Person]) -> Vec<&Person> {
    people.iter().filter(|p| p.is_mp).collect()
}

/// Number of members matching `filter`
pub fn count_members(members: &[&Person], filter: &MemberFilter) -> usize {
    members.iter().filter(|m| filter.matches(m)).count()
}

/// Members matching `filter`, in display order (stable sort)
pub fn sorted_members<'a>(members: &[&'a Person], filter: &MemberFilter) -> Vec<&'a Person> {
    let policy = SortPolicy::for_filter(filter);

    let mut selected: Vec<&Person> = members
        .iter()
        .copied()
        .filter(|m| filter.matches(m))
        .collect();

    selected.sort_by(|a, b| policy.compare(a, b));
    selected
}

// ============================================================================
// MEMBER TABS
// ============================================================================

/// One entry of the member tab bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTab {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub filter: MemberFilter,
    pub active: bool,
}

/// Label of the tab without a membership-type filter
pub const TAB_ALL: &str = "ทั้งหมด";

/// Tabs in display order: all, list seats, constituency seats.
///
/// The all-tab is active whenever the selection has no membership type.
pub fn member_tabs(members: &[&Person], selected: &MemberFilter) -> Vec<MemberTab> {
    let filters = [
        MemberFilter::all(),
        MemberFilter::by_type(MpType::PartyList),
        MemberFilter::by_type(MpType::Constituency),
    ];

    filters
        .into_iter()
        .map(|filter| {
            let label = filter
                .mp_type
                .as_ref()
                .and_then(MpType::label)
                .unwrap_or(TAB_ALL)
                .to_string();

            let active = match &filter.mp_type {
                None => selected.is_empty(),
                Some(mp_type) => selected.mp_type.as_ref() == Some(mp_type),
            };

            MemberTab {
                id: label.clone(),
                label,
                count: count_members(members, &filter),
                filter,
                active,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
