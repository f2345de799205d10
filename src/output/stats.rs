//! Run statistics
//!
//! Counters accumulated by the driver and the tree builder during a run,
//! printed once the channel has been written.

use serde::Serialize;

/// What happened to the languages and videos of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Languages that produced at least one node
    pub languages_processed: u64,

    /// Language blocks with no id or an unknown language
    pub languages_skipped: u64,

    /// Language blocks whose processing failed
    pub languages_failed: u64,

    /// Topic nodes created under standard languages
    pub topics: u64,

    /// Videos added to the tree
    pub videos_added: u64,

    /// Videos that failed to resolve or had a non-permissive license
    pub videos_skipped: u64,

    /// Videos resolved twice within one topic
    pub videos_duplicate: u64,

    /// Videos excluded by the persisted skip-list
    pub videos_previously_skipped: u64,

    /// Video links without a recognizable video id
    pub videos_unidentified: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Video links seen, whatever happened to them
    pub fn videos_seen(&self) -> u64 {
        self.videos_added
            + self.videos_skipped
            + self.videos_duplicate
            + self.videos_previously_skipped
            + self.videos_unidentified
    }

    /// Share of seen videos that made it into the tree, as a percentage
    pub fn inclusion_rate(&self) -> f64 {
        let seen = self.videos_seen();
        if seen == 0 {
            return 0.0;
        }
        (self.videos_added as f64 / seen as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStats) {
    println!("=== Chef Run Statistics ===\n");

    println!("Languages:");
    println!("  Processed: {}", stats.languages_processed);
    println!("  Skipped: {}", stats.languages_skipped);
    println!("  Failed: {}", stats.languages_failed);
    println!();

    println!("Videos:");
    println!("  Added: {}", stats.videos_added);
    println!("  Skipped (unresolved or license): {}", stats.videos_skipped);
    println!("  Skipped (earlier runs): {}", stats.videos_previously_skipped);
    println!("  Duplicates: {}", stats.videos_duplicate);
    println!("  Without video id: {}", stats.videos_unidentified);
    println!("  Topics: {}", stats.topics);
    println!();

    println!(
        "Inclusion Rate: {:.1}% ({} / {} videos added)",
        stats.inclusion_rate(),
        stats.videos_added,
        stats.videos_seen()
    );
}
