use std::collections::HashMap;
use shared::models::{Poll, PollStats};

pub struct PollProcessor;

impl PollProcessor {
    /// Vote totals and shares for every option of the poll, including options without votes.
    pub fn calculate_stats(poll: &Poll) -> PollStats {
        let total_votes = poll.total_votes();

        let votes: HashMap<String, u64> = poll
            .options
            .iter()
            .map(|option| (option.clone(), poll.votes_for(option)))
            .collect();

        let percent = votes
            .iter()
            .map(|(option, &count)| {
                let share = if total_votes > 0 {
                    count as f64 / total_votes as f64 * 100.0
                } else {
                    0.0
                };
                (option.clone(), share)
            })
            .collect();

        PollStats {
            total_votes,
            votes,
            percent,
        }
    }
}
