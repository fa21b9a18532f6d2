//! Article listing and creation.

use serde_json::json;

use inkpress_core::status::{codes, messages};
use inkpress_db::models::article::CreateArticle;
use inkpress_db::repositories::article_repo::ArticleRepo;
use inkpress_notify::Notification;

use crate::dispatch::RequestContext;
use crate::envelope::Envelope;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;
const MAX_TITLE_LEN: usize = 255;

/// `GET /article/query` -- published articles, newest first.
///
/// Anonymous-friendly; pagination via `limit` and `offset` query
/// parameters, both optional.
pub async fn query(ctx: RequestContext, mut envelope: Envelope) -> Envelope {
    let limit = query_param_i64(ctx.query.as_deref(), "limit")
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let offset = query_param_i64(ctx.query.as_deref(), "offset")
        .unwrap_or(0)
        .max(0);

    match ArticleRepo::list_published(&ctx.state.pool, limit, offset).await {
        Ok(articles) => {
            envelope.set_data(json!({
                "count": articles.len(),
                "articles": articles,
            }));
            envelope.set_result(codes::OK, messages::OK);
        }
        Err(err) => {
            tracing::error!(error = %err, "article query failed");
            envelope.set_result(codes::INTERNAL, messages::INTERNAL);
        }
    }
    envelope
}

/// `POST /article/create` -- publish a new article owned by the
/// authenticated user.
pub async fn create(ctx: RequestContext, mut envelope: Envelope) -> Envelope {
    let input: CreateArticle = match serde_json::from_slice(&ctx.body) {
        Ok(input) => input,
        Err(_) => {
            envelope.set_result(codes::INVALID_PARAM, "invalid param");
            return envelope;
        }
    };
    if input.title.trim().is_empty()
        || input.title.len() > MAX_TITLE_LEN
        || input.content.trim().is_empty()
    {
        envelope.set_result(codes::INVALID_PARAM, "invalid param");
        return envelope;
    }

    match ArticleRepo::create(&ctx.state.pool, ctx.user_id, &input).await {
        Ok(article) => {
            ctx.state.notifier.submit(Notification::new(
                "blog",
                format!("new article #{}: {}", article.id, article.title),
            ));
            envelope.set_data(json!({ "article": article }));
            envelope.set_result(codes::OK, messages::OK);
        }
        Err(err) => {
            tracing::error!(user_id = ctx.user_id, error = %err, "article create failed");
            envelope.set_result(codes::INTERNAL, messages::INTERNAL);
        }
    }
    envelope
}

/// Pull a single integer parameter out of a raw query string.
fn query_param_i64(query: Option<&str>, name: &str) -> Option<i64> {
    let query = query?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            value.parse().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_extracts_named_value() {
        assert_eq!(query_param_i64(Some("limit=25&offset=5"), "limit"), Some(25));
        assert_eq!(query_param_i64(Some("limit=25&offset=5"), "offset"), Some(5));
    }

    #[test]
    fn query_param_missing_or_malformed_is_none() {
        assert_eq!(query_param_i64(None, "limit"), None);
        assert_eq!(query_param_i64(Some("offset=3"), "limit"), None);
        assert_eq!(query_param_i64(Some("limit=abc"), "limit"), None);
        assert_eq!(query_param_i64(Some("limit"), "limit"), None);
    }
}
