//! Video candidates returned by search and the selection applied before attaching them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::pathway::Video;
use super::text::truncate_chars;

/// Longest description kept on an attached video.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// A search hit, not yet attached to any module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
}

/// Query handed to a video search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    pub query: String,
    pub count: usize,
    pub exclude: BTreeSet<String>,
}

/// Keep at most `count` candidates, in rank order, skipping excluded and
/// repeated identifiers. Returned videos carry their 0-based rank as `order`.
pub fn select_videos(
    candidates: Vec<VideoCandidate>,
    exclude: &BTreeSet<String>,
    count: usize,
) -> Vec<Video> {
    let mut seen = BTreeSet::new();

    candidates
        .into_iter()
        .filter(|c| !c.id.trim().is_empty() && !exclude.contains(&c.id))
        .filter(|c| seen.insert(c.id.clone()))
        .take(count)
        .enumerate()
        .map(|(rank, c)| Video {
            external_id: c.id,
            title: c.title,
            url: c.url,
            description: truncate_chars(&c.description, MAX_DESCRIPTION_CHARS),
            order: rank as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn candidate(id: &str) -> VideoCandidate {
        VideoCandidate {
            id: id.to_string(),
            url: format!("https://www.youtube.com/watch?v={}", id),
            title: format!("Video {}", id),
            description: format!("About {}", id),
        }
    }

    #[test]
    fn skips_excluded_and_caps_count() {
        let candidates = ["a", "b", "c", "d", "e", "f"].into_iter().map(candidate).collect();
        let exclude: BTreeSet<String> = ["b", "d"].into_iter().map(String::from).collect();

        let videos = select_videos(candidates, &exclude, 4);

        let ids: Vec<_> = videos.iter().map(|v| v.external_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "e", "f"]);
        let orders: Vec<_> = videos.iter().map(|v| v.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn drops_duplicates_within_batch() {
        let candidates = vec![candidate("a"), candidate("a"), candidate("b")];
        let videos = select_videos(candidates, &BTreeSet::new(), 4);
        assert_eq!(videos.len(), 2);
    }

    #[test]
    fn fewer_candidates_than_requested() {
        let videos = select_videos(vec![candidate("a")], &BTreeSet::new(), 4);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Video a");
    }

    #[test]
    fn description_is_truncated_on_char_boundary() {
        let mut long = candidate("a");
        long.description = "é".repeat(250);
        let videos = select_videos(vec![long], &BTreeSet::new(), 1);
        assert_eq!(videos[0].description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    proptest! {
        #[test]
        fn never_returns_excluded_ids(
            ids in proptest::collection::vec("[a-h]", 0..15),
            excluded in proptest::collection::btree_set("[a-h]", 0..6),
            count in 1usize..6,
        ) {
            let candidates = ids.iter().map(|id| candidate(id)).collect();
            let videos = select_videos(candidates, &excluded, count);

            prop_assert!(videos.len() <= count);
            for video in &videos {
                prop_assert!(!excluded.contains(&video.external_id));
            }
            let unique: BTreeSet<_> = videos.iter().map(|v| v.external_id.clone()).collect();
            prop_assert_eq!(unique.len(), videos.len());
        }
    }
}
