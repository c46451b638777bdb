use serde::{Deserialize, Serialize};

use crate::watched::WatchedEntry;

/// Aggregate view over the watched shelf. Always recomputed from the
/// current entries, never cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchedStats {
    pub count: usize,
    pub avg_critic_rating: f32,
    pub avg_user_rating: f32,
    pub avg_runtime: f32,
}

impl WatchedStats {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_critic_rating: mean(entries, |e| e.critic_rating),
            avg_user_rating: mean(entries, |e| e.user_rating),
            avg_runtime: mean(entries, |e| e.runtime_minutes as f32),
        }
    }
}

// Sum-over-length reduction; an empty slice never enters the fold, so every
// mean of an empty shelf is 0 rather than a division error.
fn mean<F>(entries: &[WatchedEntry], value: F) -> f32
where
    F: Fn(&WatchedEntry) -> f32,
{
    entries
        .iter()
        .fold(0.0, |acc, entry| acc + value(entry) / entries.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_entry(imdb_id: &str, critic: f32, user: f32, runtime: u32) -> WatchedEntry {
        WatchedEntry {
            imdb_id: imdb_id.to_string(),
            title: format!("Movie {}", imdb_id),
            year: "2020".to_string(),
            poster_url: String::new(),
            critic_rating: critic,
            runtime_minutes: runtime,
            user_rating: user,
            rating_change_count: 1,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_empty_shelf_is_all_zero() {
        let stats = WatchedStats::from_entries(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg_critic_rating, 0.0);
        assert_eq!(stats.avg_user_rating, 0.0);
        assert_eq!(stats.avg_runtime, 0.0);
    }

    #[test]
    fn test_stats_two_entries() {
        let entries = vec![
            create_entry("tt001", 8.0, 9.0, 120),
            create_entry("tt002", 6.0, 7.0, 100),
        ];

        let stats = WatchedStats::from_entries(&entries);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg_critic_rating, 7.0);
        assert_eq!(stats.avg_user_rating, 8.0);
        assert_eq!(stats.avg_runtime, 110.0);
    }

    #[test]
    fn test_stats_single_entry_means_are_the_entry() {
        let entries = vec![create_entry("tt001", 7.5, 9.0, 142)];

        let stats = WatchedStats::from_entries(&entries);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.avg_critic_rating, 7.5);
        assert_eq!(stats.avg_user_rating, 9.0);
        assert_eq!(stats.avg_runtime, 142.0);
    }
}
