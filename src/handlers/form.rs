// src/handlers/form.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::form::{CreateFormRequest, Form, FormWithStats, UpdateFormRequest},
    utils::jwt::Claims,
};

const FORM_COLUMNS: &str =
    "id, owner, title, description, header_image_url, questions, created_at, updated_at";

/// Creates a new form owned by the authenticated user.
///
/// Title is required and non-empty; everything else may be filled in later
/// through updates from the editor.
pub async fn create_form(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateFormRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let owner = claims.actor_id();

    let form = sqlx::query_as::<_, Form>(&format!(
        r#"
        INSERT INTO forms (owner, title, description, header_image_url, questions)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {FORM_COLUMNS}
        "#
    ))
    .bind(owner)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.header_image_url)
    .bind(SqlJson(&payload.questions))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create form: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(form)))
}

/// Retrieves a single form by ID.
///
/// Public: anyone holding the fill link may fetch the form definition.
pub async fn get_form(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let form = sqlx::query_as::<_, Form>(&format!(
        "SELECT {FORM_COLUMNS} FROM forms WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Form not found".to_string()))?;

    Ok(Json(form))
}

/// Replaces a form's document, scoped to `{id, owner}`.
///
/// A non-owner attempt matches zero rows and is reported as "not found",
/// deliberately not confirming the form's existence. Last write wins; forms
/// have a single owner so no concurrency token is kept.
pub async fn update_form(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFormRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let owner = claims.actor_id();

    let form = sqlx::query_as::<_, Form>(&format!(
        r#"
        UPDATE forms
        SET title = $3,
            description = $4,
            header_image_url = $5,
            questions = $6,
            updated_at = now()
        WHERE id = $1 AND owner = $2
        RETURNING {FORM_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(owner)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.header_image_url)
    .bind(SqlJson(&payload.questions))
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Form not found".to_string()))?;

    Ok(Json(form))
}

/// Lists the authenticated user's forms, newest first, each decorated with
/// response statistics.
///
/// The count, the recent-responses list and the has-responded flag are
/// independent reads composed here; a response landing between them is a
/// benign race.
pub async fn list_my_forms(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner = claims.actor_id();

    let forms = sqlx::query_as::<_, Form>(&format!(
        "SELECT {FORM_COLUMNS} FROM forms WHERE owner = $1 ORDER BY created_at DESC"
    ))
    .bind(owner)
    .fetch_all(&pool)
    .await?;

    let mut forms_with_stats = Vec::with_capacity(forms.len());
    for form in forms {
        let response_count = super::response::count_responses(&pool, form.id).await?;
        let recent_responses = super::response::recent_responses(&pool, form.id, None).await?;

        let has_responded = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM form_responses WHERE form_id = $1 AND responder = $2)",
        )
        .bind(form.id)
        .bind(owner)
        .fetch_one(&pool)
        .await?;

        forms_with_stats.push(FormWithStats {
            form,
            response_count,
            has_responded,
            recent_responses,
        });
    }

    Ok(Json(forms_with_stats))
}
