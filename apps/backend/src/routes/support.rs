//! Support contact form

use axum::{extract::State, http::StatusCode, Form, Json};

use crate::error::{ApiError, Result};
use crate::models::{ContactForm, ContactResponse};
use crate::AppState;

/// POST /support/contact
pub async fn contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let form = ContactForm {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        subject: form.subject.trim().to_string(),
        message: form.message.trim().to_string(),
    };

    if [&form.name, &form.email, &form.subject, &form.message]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    let message_id = state.db.save_contact_message(&form).await?;
    tracing::info!(message_id, subject = %form.subject, "contact message received");

    Ok((StatusCode::CREATED, Json(ContactResponse { message_id })))
}
