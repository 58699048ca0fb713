//! Dense competition ranking.
//!
//! Tied scores share a rank and the next distinct score continues at the
//! following integer, so `[50, 50, 30]` ranks as `[1, 1, 2]`.

use serde::Serialize;

use crate::store::Score;

/// A stored score annotated with its position on the current leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    #[serde(flatten)]
    pub score: Score,
    /// 1-based dense rank.
    #[serde(rename = "position")]
    pub rank: u32,
}

/// Assigns dense ranks to `scores`, which must already be sorted by points,
/// highest first.
pub fn rank(scores: Vec<Score>) -> Vec<RankedScore> {
    let mut current_rank = 0;
    // None sits below every possible score, so a leading 0 still ranks 1.
    let mut last_points: Option<i64> = None;

    scores
        .into_iter()
        .map(|score| {
            if last_points != Some(score.points) {
                current_rank += 1;
                last_points = Some(score.points);
            }
            RankedScore {
                score,
                rank: current_rank,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn rows(points: &[i64]) -> Vec<Score> {
        points
            .iter()
            .enumerate()
            .map(|(i, &points)| Score {
                id: i as i64 + 1,
                username: format!("player{i}"),
                points,
            })
            .collect()
    }

    fn ranks(points: &[i64]) -> Vec<u32> {
        rank(rows(points)).into_iter().map(|r| r.rank).collect()
    }

    #[test]
    fn ties_share_a_rank() {
        assert_eq!(ranks(&[50, 50, 30]), vec![1, 1, 2]);
    }

    #[test]
    fn rank_advances_by_distinct_values_not_rows() {
        assert_eq!(ranks(&[9, 9, 9, 7, 7, 3, 1]), vec![1, 1, 1, 2, 2, 3, 4]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn single_row_is_first() {
        assert_eq!(ranks(&[42]), vec![1]);
    }

    #[test]
    fn zero_and_negative_top_scores_still_rank_first() {
        assert_eq!(ranks(&[0, 0, -5]), vec![1, 1, 2]);
        assert_eq!(ranks(&[-3, -10]), vec![1, 2]);
    }

    #[test]
    fn distinct_rank_count_matches_distinct_points() {
        let inputs: [&[i64]; 4] = [&[5, 4, 4, 2, 2, 2, 1], &[7, 7, 7], &[3, 2, 1], &[10, 0, 0]];
        for points in inputs {
            let ranked = rank(rows(points));
            let distinct_ranks: HashSet<u32> = ranked.iter().map(|r| r.rank).collect();
            let distinct_points: HashSet<i64> = points.iter().copied().collect();
            assert_eq!(distinct_ranks.len(), distinct_points.len(), "input {points:?}");
            assert_eq!(ranked[0].rank, 1);
            for pair in ranked.windows(2) {
                if pair[0].score.points == pair[1].score.points {
                    assert_eq!(pair[0].rank, pair[1].rank);
                }
            }
        }
    }

    #[test]
    fn serializes_with_public_field_names() {
        let ranked = rank(rows(&[12]));
        let json = serde_json::to_value(&ranked[0]).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "username": "player0", "score": 12, "position": 1})
        );
    }
}
