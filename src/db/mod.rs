//! Database layer (Firestore).

pub mod firestore;
pub mod live;

pub use firestore::FirestoreDb;
pub use live::LiveFeed;

/// Collection names as constants.
pub mod collections {
    pub const BREWS: &str = "brews";
    pub const COFFEES: &str = "coffees";
}

/// Number of entries in the recent-brews list.
pub const RECENT_BREWS_LIMIT: u32 = 10;
