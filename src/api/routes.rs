use axum::{
    Router,
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::AppState;
use crate::api::models::{
    ChatRequest, ChatResponse, ErrorResponse, RecentResponse, SidebarItem, TopicQuery,
    TopicResponse, TrendingResponse,
};
use crate::chat::EMPTY_MESSAGE_PROMPT;

const TRENDING_DESC_LIMIT: usize = 100;
const RECENT_DESC_LIMIT: usize = 80;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/news", get(topic_news_handler))
        .route("/api/news/trending", get(trending_handler))
        .route("/api/news/recent", get(recent_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = req.message.trim();
    if message.is_empty() {
        return Json(ChatResponse::error(EMPTY_MESSAGE_PROMPT));
    }

    let bot_response = state.responder.respond(message).await;
    Json(ChatResponse::success(bot_response))
}

async fn topic_news_handler(
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> impl IntoResponse {
    info!(topic = %query.topic, days = query.days, "topic news request");

    match state.responder.topic_news(&query.topic, query.days).await {
        Ok((news, article_count)) => Json(TopicResponse {
            status: "success",
            topic: query.topic,
            news,
            article_count,
        })
        .into_response(),
        Err(err) => {
            error!(topic = %query.topic, error = %err, "topic news fetch failed");
            Json(ErrorResponse::new(err.user_hint())).into_response()
        }
    }
}

async fn trending_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.responder.trending_feed().await {
        Ok(articles) => {
            let trending = articles
                .into_iter()
                .map(|a| SidebarItem::from_article(a, TRENDING_DESC_LIMIT))
                .collect();
            Json(TrendingResponse {
                status: "ok",
                trending,
            })
            .into_response()
        }
        Err(err) => {
            error!(error = %err, "trending feed failed");
            Json(ErrorResponse::new(err.user_hint())).into_response()
        }
    }
}

async fn recent_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.responder.recent_feed().await {
        Ok(articles) => {
            let recent = articles
                .into_iter()
                .map(|a| SidebarItem::from_article(a, RECENT_DESC_LIMIT))
                .collect();
            Json(RecentResponse {
                status: "ok",
                recent,
            })
            .into_response()
        }
        Err(err) => {
            error!(error = %err, "recent feed failed");
            Json(ErrorResponse::new(err.user_hint())).into_response()
        }
    }
}
