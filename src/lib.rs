pub mod config;
pub mod error;
pub mod ingest;
pub mod matching;
pub mod sync;
pub mod types;

pub use config::SyncConfig;
pub use error::SyncError;
pub use ingest::{parse_aligned_lyrics, parse_aligned_words, AlignedLyrics};
pub use matching::boundary::{
    align_section_boundaries, extract_time_range, BoundaryAlignment, BoundaryOptions, RangeLyrics,
};
pub use matching::locator::{match_section_to_words, MatchOptions};
pub use matching::normalize::{normalize, tokenize};
pub use sync::builder::SyncEngineBuilder;
pub use sync::lines::group_into_lines;
pub use sync::resolver::{ActiveIndexResolver, ResolverState};
pub use sync::runtime::SyncEngine;
pub use sync::traits::{PlaybackClock, SyncObserver, TickScheduler};
pub use types::{Line, MatchDetails, SectionMatch, SyncState, TimestampedWord};
