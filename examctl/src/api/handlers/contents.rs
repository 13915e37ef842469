//! CMS content endpoints.
//!
//! Admins author content as drafts and publish it once; publishing is
//! one-way. The public surface only ever sees PUBLISHED records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        contents::{ContentCreate, ContentQuery, ContentResponse, ContentStatus, ContentUpdate},
        users::CurrentUser,
    },
    auth::permissions::authorize,
    errors::Error,
    store::{
        errors::StoreError,
        handlers::{contents::ContentFilter, Repository},
        models::contents::{ContentCreateStoreRequest, ContentUpdateStoreRequest},
    },
    types::{ContentId, Operation},
    AppState,
};

/// Create a content item. New content always starts as a DRAFT.
#[tracing::instrument(skip_all)]
pub async fn create_content(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ContentCreate>,
) -> Result<(StatusCode, Json<ContentResponse>), Error> {
    authorize(&user, Operation::CreateContent)?;

    if request.title.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Content title must not be empty".to_string(),
        });
    }

    let mut contents = state.store.contents();
    let content = contents
        .create(&ContentCreateStoreRequest {
            content_type: request.content_type,
            title: request.title,
            body: request.body,
            metadata: request.metadata.unwrap_or_default(),
            seo_meta: request.seo_meta.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ContentResponse::from(content))))
}

/// Update a draft. Published content is immutable.
#[tracing::instrument(skip_all)]
pub async fn update_content(
    State(state): State<AppState>,
    Path(content_id): Path<ContentId>,
    user: CurrentUser,
    Json(request): Json<ContentUpdate>,
) -> Result<Json<ContentResponse>, Error> {
    authorize(&user, Operation::UpdateContent)?;

    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "Content title must not be empty".to_string(),
            });
        }
    }

    let mut contents = state.store.contents();
    let content = contents
        .update(
            content_id,
            &ContentUpdateStoreRequest {
                title: request.title,
                body: request.body,
                metadata: request.metadata,
                seo_meta: request.seo_meta,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::InvalidTransition { .. } => Error::InvalidState {
                message: "Only draft content can be updated".to_string(),
            },
            StoreError::NotFound => Error::NotFound {
                resource: "Content".to_string(),
                id: content_id.to_string(),
            },
            other => other.into(),
        })?;

    Ok(Json(ContentResponse::from(content)))
}

/// Publish a draft, making it publicly visible. The transition is one-way.
#[tracing::instrument(skip_all)]
pub async fn publish_content(
    State(state): State<AppState>,
    Path(content_id): Path<ContentId>,
    user: CurrentUser,
) -> Result<Json<ContentResponse>, Error> {
    authorize(&user, Operation::PublishContent)?;

    let mut contents = state.store.contents();
    let content = contents.publish(content_id).await.map_err(|e| match e {
        StoreError::InvalidTransition { .. } => Error::InvalidState {
            message: "Content is already published".to_string(),
        },
        StoreError::NotFound => Error::NotFound {
            resource: "Content".to_string(),
            id: content_id.to_string(),
        },
        other => other.into(),
    })?;

    Ok(Json(ContentResponse::from(content)))
}

/// Admin listing across both lifecycle states
#[tracing::instrument(skip_all)]
pub async fn list_admin_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
    user: CurrentUser,
) -> Result<Json<Vec<ContentResponse>>, Error> {
    authorize(&user, Operation::ListAllContent)?;

    let mut contents = state.store.contents();
    let records = contents
        .list(&ContentFilter {
            content_type: query.content_type,
            status: None,
        })
        .await?;

    Ok(Json(records.into_iter().map(ContentResponse::from).collect()))
}

/// Public listing; only PUBLISHED content, no authentication required
#[tracing::instrument(skip_all)]
pub async fn list_published_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<ContentResponse>>, Error> {
    let mut contents = state.store.contents();
    let records = contents
        .list(&ContentFilter {
            content_type: query.content_type,
            status: Some(ContentStatus::Published),
        })
        .await?;

    Ok(Json(records.into_iter().map(ContentResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_published_content(
    State(state): State<AppState>,
    Path(content_id): Path<ContentId>,
) -> Result<Json<ContentResponse>, Error> {
    let mut contents = state.store.contents();
    let content = contents.get_by_id(content_id).await?;

    // Return 404 to avoid leaking drafts to the public
    match content {
        Some(content) if content.status == ContentStatus::Published => Ok(Json(ContentResponse::from(content))),
        _ => Err(Error::NotFound {
            resource: "Content".to_string(),
            id: content_id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::models::{contents::ContentType, users::Role},
        test_utils::{auth_header, create_test_app, create_test_user},
    };
    use serde_json::json;

    async fn seed_content(state: &AppState, content_type: ContentType) -> ContentResponse {
        let mut contents = state.store.contents();
        let content = contents
            .create(&ContentCreateStoreRequest {
                content_type,
                title: "Preparation Guide".to_string(),
                body: "Read the syllabus.".to_string(),
                metadata: serde_json::Map::new(),
                seo_meta: serde_json::Map::new(),
            })
            .await
            .expect("create content");
        ContentResponse::from(content)
    }

    // Test: authoring requires a session
    #[tokio::test]
    async fn test_create_content_requires_auth() {
        let (server, _state) = create_test_app().await;

        let response = server
            .post("/admin/content")
            .json(&json!({ "title": "Guide", "body": "...", "content_type": "BLOG" }))
            .await;

        response.assert_status_unauthorized();
    }

    // Test: authoring is admin-only
    #[tokio::test]
    async fn test_create_content_requires_admin() {
        let (server, state) = create_test_app().await;
        let user = create_test_user(&state, Role::User).await;
        let (name, value) = auth_header(&user);

        let response = server
            .post("/admin/content")
            .add_header(name, value)
            .json(&json!({ "title": "Guide", "body": "...", "content_type": "BLOG" }))
            .await;

        response.assert_status_forbidden();
    }

    // Test: new content starts as a draft
    #[tokio::test]
    async fn test_create_content_starts_draft() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let (name, value) = auth_header(&admin);

        let response = server
            .post("/admin/content")
            .add_header(name, value)
            .json(&json!({
                "title": "Exam Day Checklist",
                "body": "Arrive thirty minutes early.",
                "content_type": "BLOG",
                "metadata": { "reading_time_minutes": 3 }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ContentResponse = response.json();
        assert_eq!(body.status, ContentStatus::Draft);
        assert_eq!(body.content_type, ContentType::Blog);
        assert_eq!(body.metadata.get("reading_time_minutes"), Some(&json!(3)));
    }

    // Test: drafts can be edited
    #[tokio::test]
    async fn test_update_draft() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let content = seed_content(&state, ContentType::Blog).await;
        let (name, value) = auth_header(&admin);

        let response = server
            .put(&format!("/admin/content/{}", content.id))
            .add_header(name, value)
            .json(&json!({ "body": "Read the syllabus twice." }))
            .await;

        response.assert_status_ok();
        let body: ContentResponse = response.json();
        assert_eq!(body.body, "Read the syllabus twice.");
        assert_eq!(body.title, content.title);
    }

    // Test: publishing flips a draft to PUBLISHED
    #[tokio::test]
    async fn test_publish_content() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let content = seed_content(&state, ContentType::Blog).await;
        let (name, value) = auth_header(&admin);

        let response = server
            .post(&format!("/admin/content/{}/publish", content.id))
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body: ContentResponse = response.json();
        assert_eq!(body.status, ContentStatus::Published);
    }

    // Test: publishing twice is a conflict, not a silent success
    #[tokio::test]
    async fn test_publish_twice_conflicts() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let content = seed_content(&state, ContentType::Blog).await;

        let (name, value) = auth_header(&admin);
        let first = server
            .post(&format!("/admin/content/{}/publish", content.id))
            .add_header(name, value)
            .await;
        first.assert_status_ok();

        let (name, value) = auth_header(&admin);
        let second = server
            .post(&format!("/admin/content/{}/publish", content.id))
            .add_header(name, value)
            .await;
        second.assert_status(StatusCode::CONFLICT);
    }

    // Test: published content rejects edits
    #[tokio::test]
    async fn test_update_published_conflicts() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let content = seed_content(&state, ContentType::Blog).await;

        let (name, value) = auth_header(&admin);
        server
            .post(&format!("/admin/content/{}/publish", content.id))
            .add_header(name, value)
            .await
            .assert_status_ok();

        let (name, value) = auth_header(&admin);
        let response = server
            .put(&format!("/admin/content/{}", content.id))
            .add_header(name, value)
            .json(&json!({ "body": "Too late." }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    // Test: the public listing only shows published content
    #[tokio::test]
    async fn test_public_list_hides_drafts() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let draft = seed_content(&state, ContentType::Blog).await;
        let published = seed_content(&state, ContentType::Course).await;

        let (name, value) = auth_header(&admin);
        server
            .post(&format!("/admin/content/{}/publish", published.id))
            .add_header(name, value)
            .await
            .assert_status_ok();

        let response = server.get("/content").await;
        response.assert_status_ok();
        let visible: Vec<ContentResponse> = response.json();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, published.id);
        assert!(visible.iter().all(|c| c.id != draft.id));
    }

    // Test: the public listing can filter by content type
    #[tokio::test]
    async fn test_public_list_filters_by_type() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let blog = seed_content(&state, ContentType::Blog).await;
        let course = seed_content(&state, ContentType::Course).await;
        for content in [&blog, &course] {
            let (name, value) = auth_header(&admin);
            server
                .post(&format!("/admin/content/{}/publish", content.id))
                .add_header(name, value)
                .await
                .assert_status_ok();
        }

        let response = server.get("/content").add_query_param("content_type", "COURSE").await;
        response.assert_status_ok();
        let visible: Vec<ContentResponse> = response.json();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, course.id);
    }

    // Test: a draft reads as 404 on the public surface
    #[tokio::test]
    async fn test_public_get_draft_not_found() {
        let (server, state) = create_test_app().await;
        let content = seed_content(&state, ContentType::Blog).await;

        let response = server.get(&format!("/content/{}", content.id)).await;
        response.assert_status_not_found();
    }

    // Test: the admin listing shows drafts and is admin-only
    #[tokio::test]
    async fn test_admin_list_includes_drafts() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        seed_content(&state, ContentType::Blog).await;

        let (name, value) = auth_header(&admin);
        let response = server.get("/admin/content").add_header(name, value).await;
        response.assert_status_ok();
        let all: Vec<ContentResponse> = response.json();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ContentStatus::Draft);

        let user = create_test_user(&state, Role::User).await;
        let (name, value) = auth_header(&user);
        let response = server.get("/admin/content").add_header(name, value).await;
        response.assert_status_forbidden();
    }
}
