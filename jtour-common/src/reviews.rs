//! City reviews
//!
//! Each city's reviews live under `reviews:<city_id>` as a JSON array,
//! oldest first. A value that no longer parses is logged and read as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::city_by_id;
use crate::store::{get_json, set_json, KeyValueStore};
use crate::{Error, Result};

pub const MAX_AUTHOR_LEN: usize = 80;
pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityReview {
    pub id: Uuid,
    pub author: String,
    /// 1 to 5 stars
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review as submitted by a visitor
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub author: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl NewReview {
    fn validate(&self) -> Result<()> {
        let author = self.author.trim();
        if author.is_empty() {
            return Err(Error::InvalidInput("Author name is required".to_string()));
        }
        if author.chars().count() > MAX_AUTHOR_LEN {
            return Err(Error::InvalidInput(format!(
                "Author name longer than {} characters",
                MAX_AUTHOR_LEN
            )));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "Rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.comment.chars().count() > MAX_COMMENT_LEN {
            return Err(Error::InvalidInput(format!(
                "Comment longer than {} characters",
                MAX_COMMENT_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    /// None when there are no reviews
    pub average_rating: Option<f64>,
}

impl ReviewSummary {
    pub fn of(reviews: &[CityReview]) -> Self {
        let count = reviews.len();
        let average_rating = (count > 0).then(|| {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            f64::from(total) / count as f64
        });
        Self { count, average_rating }
    }
}

fn review_key(city_id: &str) -> String {
    format!("reviews:{}", city_id)
}

/// Review reads and writes for catalog cities
#[derive(Clone)]
pub struct ReviewBook {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write of review lists
    write_lock: Arc<Mutex<()>>,
}

impl ReviewBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn ensure_city(city_id: &str) -> Result<()> {
        city_by_id(city_id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("City not found: {}", city_id)))
    }

    pub async fn list(&self, city_id: &str) -> Result<Vec<CityReview>> {
        Self::ensure_city(city_id)?;
        let key = review_key(city_id);
        match get_json::<Vec<CityReview>>(self.store.as_ref(), &key).await {
            Ok(reviews) => Ok(reviews.unwrap_or_default()),
            Err(Error::Json(e)) => {
                warn!("Discarding unreadable reviews under {}: {}", key, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn add(&self, city_id: &str, review: NewReview) -> Result<CityReview> {
        Self::ensure_city(city_id)?;
        review.validate()?;

        let created = CityReview {
            id: Uuid::new_v4(),
            author: review.author.trim().to_string(),
            rating: review.rating,
            comment: review.comment.trim().to_string(),
            created_at: Utc::now(),
        };

        let _guard = self.write_lock.lock().await;
        let mut reviews = self.list(city_id).await?;
        reviews.push(created.clone());
        set_json(self.store.as_ref(), &review_key(city_id), &reviews).await?;

        info!("Added review {} for {} ({} stars)", created.id, city_id, created.rating);
        Ok(created)
    }

    pub async fn summary(&self, city_id: &str) -> Result<ReviewSummary> {
        let reviews = self.list(city_id).await?;
        Ok(ReviewSummary::of(&reviews))
    }
}
