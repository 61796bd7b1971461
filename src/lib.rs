// Party Profile - Core Library
// Data-shaping behind a party profile page: member filter/sort, category
// statistics, vote-log join, key members.

pub mod records;     // Typed input records
pub mod collation;   // Thai collation
pub mod members;     // Member filter, sort policy, tabs
pub mod stats;       // Category statistics
pub mod votelog;     // People × PersonVote × VoteLog join
pub mod leadership;  // Key members
pub mod config;      // Presentation policy
pub mod snapshot;    // Input boundary: JSON snapshot, people CSV
pub mod profile;     // One render's view

// Re-export commonly used types
pub use records::{
    Image, MpType, Party, PartyEnglish, Person, PersonVote, VoteChoice, VoteChoiceEntry, VoteLog,
    MP_TYPE_CONSTITUENCY, MP_TYPE_PARTY_LIST,
};
pub use collation::{thai_compare, thai_compare_opt, ThaiSortKey};
pub use members::{
    active_members, count_members, member_tabs, sorted_members, MemberFilter, MemberTab,
    SortPolicy,
};
pub use stats::{
    CategoryCount, CategoryStats, DimensionStats, MissingPolicy, RangeBucket, StatsConfig,
    StatsEngine,
};
pub use votelog::{join_people_votelog, EnrichedVoteLog, JoinWindow, MemberChoice, VoteTally};
pub use leadership::{key_members, people_slug, KeyMember};
pub use config::ProfileConfig;
pub use snapshot::{load_people_csv, PartySnapshot};
pub use profile::{build_party_profile, PartyHeader, PartyLinks, PartyProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
