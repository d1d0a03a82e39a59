use anyhow::Result;
use std::sync::Mutex;

use super::records::Recommendation;

/// Persistence seam for generated recommendations. The engine only
/// ever appends; lookups exist for the surrounding application.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RecommendationStore: Send + Sync {
    /// Persists a newly generated recommendation.
    fn add_recommendation(&self, recommendation: &Recommendation) -> Result<()>;

    /// Returns the recommendation with the given id.
    /// Returns None if no such recommendation exists.
    fn get_recommendation(&self, recommendation_id: &str) -> Result<Option<Recommendation>>;

    /// Returns every recommendation generated for the given user,
    /// newest first.
    fn get_user_recommendations(&self, user: &str) -> Result<Vec<Recommendation>>;
}

/// Append-only in-memory store, used by the CLI and in tests.
#[derive(Default)]
pub struct InMemoryRecommendationStore {
    records: Mutex<Vec<Recommendation>>,
}

impl RecommendationStore for InMemoryRecommendationStore {
    fn add_recommendation(&self, recommendation: &Recommendation) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.push(recommendation.clone());
        Ok(())
    }

    fn get_recommendation(&self, recommendation_id: &str) -> Result<Option<Recommendation>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|record| record.id == recommendation_id)
            .cloned())
    }

    fn get_user_recommendations(&self, user: &str) -> Result<Vec<Recommendation>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .filter(|record| record.user == user)
            .cloned()
            .collect())
    }
}
