//! Testimonial route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use goodwill_core::{NewTestimonial, Testimonial, TestimonialId};

use super::{display_date, parse_leading_int};
use crate::error::Result;
use crate::state::AppState;
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialView {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub image: String,
    pub date: String,
}

impl From<Testimonial> for TestimonialView {
    fn from(testimonial: Testimonial) -> Self {
        Self {
            image: testimonial.image_url.clone(),
            date: display_date(&testimonial.created_at),
            testimonial,
        }
    }
}

/// Body of `POST /api/testimonials`. Every field is required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestimonialRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub role: Option<String>,
    #[validate(required, length(min = 1))]
    pub content: Option<String>,
    #[validate(required, length(min = 1))]
    pub image: Option<String>,
}

impl CreateTestimonialRequest {
    fn into_new_testimonial(self) -> NewTestimonial {
        NewTestimonial {
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            image_url: self.image.unwrap_or_default(),
        }
    }
}

/// GET /api/testimonials
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<TestimonialView>>> {
    let testimonials = state.storage().list_testimonials().await?;
    Ok(Json(
        testimonials.into_iter().map(TestimonialView::from).collect(),
    ))
}

/// POST /api/testimonials
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateTestimonialRequest>, JsonRejection>,
) -> Result<Json<TestimonialView>> {
    let Json(request) = body?;
    request.validate()?;

    let testimonial = state
        .storage()
        .create_testimonial(request.into_new_testimonial())
        .await?;
    info!(id = %testimonial.id, "Testimonial created");
    Ok(Json(testimonial.into()))
}

/// DELETE /api/testimonials/{id}
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if let Some(id) = parse_leading_int(&id) {
        state
            .storage()
            .delete_testimonial(TestimonialId::new(id))
            .await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
