// src/handlers/response.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::prelude::FromRow;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        form::Form,
        response::{
            FormResponse, FormResponsesSummary, RecentResponse, ResponderInfo,
            SubmitResponseRequest,
        },
    },
    policy,
    reconcile::reconcile,
    utils::jwt::Claims,
};

/// Records one submission against a form. Responses are created once and
/// never edited or resubmitted.
pub async fn submit_response(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let responder = claims.actor_id();

    let form_exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM forms WHERE id = $1)")
        .bind(id)
        .fetch_one(&pool)
        .await?;

    if !form_exists {
        return Err(AppError::NotFound("Form not found".to_string()));
    }

    let response_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO form_responses (form_id, responder, answers)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(responder)
    .bind(SqlJson(&payload.answers))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to store response: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": response_id })),
    ))
}

/// Lists all responses for a form, newest first. Owner only.
pub async fn list_responses(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let owner = sqlx::query_scalar::<_, i64>("SELECT owner FROM forms WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Form not found".to_string()))?;

    if !policy::can_mutate_form(claims.actor_id(), owner) {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    let responses = sqlx::query_as::<_, FormResponse>(
        r#"
        SELECT id, form_id, responder, answers, submitted_at
        FROM form_responses
        WHERE form_id = $1
        ORDER BY submitted_at DESC
        "#,
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(responses))
}

/// Fetches a single response with its answers reconciled against the form's
/// question list. Readable by the form owner or the responder only.
pub async fn get_single_response(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(response_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = sqlx::query_as::<_, FormResponse>(
        r#"
        SELECT id, form_id, responder, answers, submitted_at
        FROM form_responses
        WHERE id = $1
        "#,
    )
    .bind(response_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Response not found".to_string()))?;

    let form = sqlx::query_as::<_, Form>(
        r#"
        SELECT id, owner, title, description, header_image_url, questions, created_at, updated_at
        FROM forms
        WHERE id = $1
        "#,
    )
    .bind(response.form_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Form not found".to_string()))?;

    if !policy::can_read_response(claims.actor_id(), form.owner, response.responder) {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    let responder = sqlx::query_as::<_, ResponderInfo>(
        "SELECT id, name, email FROM users WHERE id = $1",
    )
    .bind(response.responder)
    .fetch_one(&pool)
    .await?;

    let detailed_answers = reconcile(&form.questions, &response.answers);

    Ok(Json(json!({
        "id": response.id,
        "form": {
            "id": form.id,
            "title": form.title,
            "description": form.description,
            "headerImageUrl": form.header_image_url,
        },
        "responder": responder,
        "submittedAt": response.submitted_at,
        "answers": detailed_answers,
        "questions": form.questions,
    })))
}

/// Overview of all the user's forms with their response counts and up to
/// three most recent submissions each.
pub async fn list_all_responses_by_user(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner = claims.actor_id();

    #[derive(FromRow)]
    struct FormHead {
        id: Uuid,
        title: String,
        description: Option<String>,
    }

    let forms = sqlx::query_as::<_, FormHead>(
        "SELECT id, title, description FROM forms WHERE owner = $1 ORDER BY created_at DESC",
    )
    .bind(owner)
    .fetch_all(&pool)
    .await?;

    let mut summaries = Vec::with_capacity(forms.len());
    for form in forms {
        let response_count = count_responses(&pool, form.id).await?;
        let recent_responses = recent_responses(&pool, form.id, Some(3)).await?;

        summaries.push(FormResponsesSummary {
            id: form.id,
            title: form.title,
            description: form.description,
            response_count,
            recent_responses,
        });
    }

    Ok(Json(summaries))
}

/// Counts submissions for one form.
pub(crate) async fn count_responses(pool: &PgPool, form_id: Uuid) -> Result<i64, AppError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM form_responses WHERE form_id = $1")
            .bind(form_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Fetches a form's latest submissions with responder identity joined in,
/// optionally capped.
pub(crate) async fn recent_responses(
    pool: &PgPool,
    form_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<RecentResponse>, AppError> {
    #[derive(FromRow)]
    struct RecentRow {
        id: Uuid,
        submitted_at: DateTime<Utc>,
        responder_id: i64,
        responder_name: String,
        responder_email: String,
    }

    let rows = sqlx::query_as::<_, RecentRow>(
        r#"
        SELECT
            r.id,
            r.submitted_at,
            u.id AS responder_id,
            u.name AS responder_name,
            u.email AS responder_email
        FROM form_responses r
        JOIN users u ON r.responder = u.id
        WHERE r.form_id = $1
        ORDER BY r.submitted_at DESC
        LIMIT $2
        "#,
    )
    .bind(form_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecentResponse {
            id: row.id,
            responder: ResponderInfo {
                id: row.responder_id,
                name: row.responder_name,
                email: row.responder_email,
            },
            submitted_at: row.submitted_at,
        })
        .collect())
}
