//! Review repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{info, warn};
use uuid::Uuid;

use models::{NewReview, Rating, Review, Tag, TagSet};

/// Review repository
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All reviews of a movie, newest first
    pub async fn list_by_movie(&self, movie_id: i64) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.user_id, u.username, r.movie_id, r.rating, r.comment,
                   r.spoiler, r.tags, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.movie_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(review_from_row).collect()
    }

    /// Insert a review written by `user_id`
    pub async fn create(&self, user_id: Uuid, review: &NewReview) -> Result<Review> {
        info!(
            "Creating review for movie {} by user {}",
            review.movie_id, user_id
        );

        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO reviews (user_id, movie_id, rating, comment, spoiler, tags)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, user_id, movie_id, rating, comment, spoiler, tags, created_at
            )
            SELECT i.id, i.user_id, u.username, i.movie_id, i.rating, i.comment,
                   i.spoiler, i.tags, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(user_id)
        .bind(review.movie_id)
        .bind(i16::from(u8::from(review.rating)))
        .bind(&review.comment)
        .bind(review.spoiler)
        .bind(review.tags.labels())
        .fetch_one(&self.pool)
        .await?;

        review_from_row(&row)
    }

    /// Find a review by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        let row = sqlx::query(
            r#"
            SELECT r.id, r.user_id, u.username, r.movie_id, r.rating, r.comment,
                   r.spoiler, r.tags, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(review_from_row).transpose()
    }

    /// Delete a review by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn review_from_row(row: &PgRow) -> Result<Review> {
    let rating: i16 = row.get("rating");
    let labels: Vec<String> = row.get("tags");

    Ok(Review {
        id: row.get("id"),
        user_id: row.get("user_id"),
        username: row.get("username"),
        movie_id: row.get("movie_id"),
        rating: Rating::try_from(rating)?,
        comment: row.get("comment"),
        spoiler: row.get("spoiler"),
        tags: tags_from_labels(&labels),
        created_at: row.get("created_at"),
    })
}

/// Stored labels outside the current vocabulary are skipped
fn tags_from_labels(labels: &[String]) -> TagSet {
    labels
        .iter()
        .filter_map(|label| match label.parse::<Tag>() {
            Ok(tag) => Some(tag),
            Err(e) => {
                warn!("Ignoring stored review tag: {}", e);
                None
            }
        })
        .collect()
}
