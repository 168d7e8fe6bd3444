//! Review intake. There is no review backend; submissions are validated,
//! held for a moment to mimic a network round trip and handed back for the
//! current session only.

use gloo_timers::future::TimeoutFuture;
use log::info;
use thiserror::Error;

use crate::catalog::{Rating, Review};

pub const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please write a short comment.")]
    MissingComment,
    #[error("Please keep your comment under 1000 characters (currently {0}).")]
    CommentTooLong(usize),
    #[error("Please choose a rating between 1 and 5 stars.")]
    InvalidRating(u8),
    #[error("We couldn't send your review. Please check your connection and try again.")]
    Unavailable,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn into_review(self, date: String) -> Result<Review, ReviewError> {
        let author = self.author.trim();
        if author.is_empty() {
            return Err(ReviewError::MissingName);
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::MissingComment);
        }
        let length = comment.chars().count();
        if length > MAX_COMMENT_CHARS {
            return Err(ReviewError::CommentTooLong(length));
        }
        let rating = Rating::try_from(self.rating).map_err(ReviewError::InvalidRating)?;
        Ok(Review {
            author: author.to_string(),
            rating,
            comment: comment.to_string(),
            date,
        })
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%d.%m.%Y").to_string()
}

fn is_online() -> bool {
    web_sys::window()
        .map(|w| w.navigator().on_line())
        .unwrap_or(true)
}

pub struct SimulatedReviewIntake {
    delay_ms: u32,
}

impl SimulatedReviewIntake {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }

    pub async fn submit(&self, draft: ReviewDraft) -> Result<Review, ReviewError> {
        let review = draft.into_review(today())?;
        TimeoutFuture::new(self.delay_ms).await;
        if !is_online() {
            return Err(ReviewError::Unavailable);
        }
        info!("Accepted review from {} ({} stars)", review.author, review.rating.get());
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(author: &str, rating: u8, comment: &str) -> ReviewDraft {
        ReviewDraft {
            author: author.to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn valid_draft_is_trimmed_and_dated() {
        let review = draft("  Mia ", 4, " Comfy! ").into_review("01.05.2024".into()).unwrap();
        assert_eq!(review.author, "Mia");
        assert_eq!(review.comment, "Comfy!");
        assert_eq!(review.rating.get(), 4);
        assert_eq!(review.date, "01.05.2024");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(draft(" ", 5, "ok").into_review(String::new()), Err(ReviewError::MissingName));
        assert_eq!(draft("Mia", 5, "  ").into_review(String::new()), Err(ReviewError::MissingComment));
    }

    #[test]
    fn rating_must_be_in_range() {
        assert_eq!(draft("Mia", 0, "ok").into_review(String::new()), Err(ReviewError::InvalidRating(0)));
        assert_eq!(draft("Mia", 6, "ok").into_review(String::new()), Err(ReviewError::InvalidRating(6)));
    }

    #[test]
    fn overly_long_comment_is_rejected() {
        let comment = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert_eq!(
            draft("Mia", 5, &comment).into_review(String::new()),
            Err(ReviewError::CommentTooLong(MAX_COMMENT_CHARS + 1))
        );
    }

    #[test]
    fn error_messages_read_as_prompts() {
        assert_eq!(ReviewError::MissingName.to_string(), "Please enter your name.");
        assert!(ReviewError::CommentTooLong(1200).to_string().contains("under 1000 characters"));
    }
}
