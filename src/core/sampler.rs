//! Random sampling of flagged records

use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::index::{AccountIssueIndex, IssueRecord};
use crate::core::trace::Tracer;

/// Draws records from the index without replacement
pub struct Sampler<R: Rng = ThreadRng> {
    rng: R,
    tracer: Tracer,
}

impl Sampler<ThreadRng> {
    /// Sampler backed by the thread-local RNG (unseeded)
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for Sampler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            tracer: Tracer::silent(),
        }
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Sample up to `requested` records for an account/issue.
    ///
    /// Unknown accounts and issues yield an empty sample rather than an error.
    pub fn sample(
        &mut self,
        index: &AccountIssueIndex,
        account: &str,
        issue: &str,
        requested: usize,
    ) -> Vec<IssueRecord> {
        if !index.has_account(account) {
            self.tracer
                .trace(format_args!("Account '{}' not found in CSV data", account));
            return Vec::new();
        }

        let Some(records) = index.records(account, issue) else {
            self.tracer.trace(format_args!(
                "Issue '{}' not found for account '{}'",
                issue, account
            ));
            return Vec::new();
        };

        let amount = requested.min(records.len());
        records
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded() -> Sampler<StdRng> {
        Sampler::with_rng(StdRng::seed_from_u64(7))
    }

    fn index_with(count: usize) -> AccountIssueIndex {
        let mut index = AccountIssueIndex::new();
        for i in 0..count {
            index.insert(
                "City",
                "invalid_resume",
                IssueRecord::new(format!("A{i}"), format!("R{i}")),
            );
        }
        index
    }

    #[test]
    fn test_sample_is_capped_by_request() {
        let index = index_with(20);
        let sample = seeded().sample(&index, "City", "invalid_resume", 5);
        assert_eq!(sample.len(), 5);
    }

    #[test]
    fn test_sample_is_capped_by_available() {
        let index = index_with(2);
        let sample = seeded().sample(&index, "City", "invalid_resume", 5);
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let index = index_with(10);
        let mut sampler = seeded();
        for _ in 0..50 {
            let sample = sampler.sample(&index, "City", "invalid_resume", 5);
            let unique: HashSet<_> = sample.iter().map(|r| r.record_id.clone()).collect();
            assert_eq!(unique.len(), sample.len());
            assert!(sample
                .iter()
                .all(|r| index.records("City", "invalid_resume").unwrap().contains(r)));
        }
    }

    #[test]
    fn test_unknown_account_or_issue_is_empty() {
        let index = index_with(3);
        let mut sampler = seeded();
        assert!(sampler.sample(&index, "Nowhere", "invalid_resume", 5).is_empty());
        assert!(sampler.sample(&index, "City", "invalid_req", 5).is_empty());
    }

    #[test]
    fn test_zero_request() {
        let index = index_with(3);
        assert!(seeded().sample(&index, "City", "invalid_resume", 0).is_empty());
    }
}
