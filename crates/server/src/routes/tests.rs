use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{COOKIE, HOST, SET_COOKIE},
    },
    response::Response,
};
use chrono::{TimeZone, Utc};
use newsdesk_core::{AppConfig, Article, NewArticle, NewsDb};
use serde_json::Value;
use tower::ServiceExt;

use crate::handler::{AppState, router};

async fn seeded_app() -> (Router, Vec<Article>) {
    let db = NewsDb::open_in_memory().await.unwrap();
    let seeds = [
        ("Harbour reopens", "Ships return after the storm.\nRain eased overnight.", "local", 1),
        ("Derby ends level", "A late goal in the rain.", "sports", 2),
        ("Rates unchanged", "The central bank held steady.", "economy", 3),
    ];

    let mut articles = Vec::new();
    for (title, body, category, day) in seeds {
        let article = db
            .insert_article(&NewArticle {
                title: title.into(),
                subtitle: String::new(),
                body: body.into(),
                image_url: None,
                category: category.into(),
                date: Utc.with_ymd_and_hms(2024, 2, day, 8, 0, 0).unwrap(),
            })
            .await
            .unwrap();
        articles.push(article);
    }

    let config = AppConfig { front_page_count: 10, ..Default::default() };
    (router(AppState::new(db, config)), articles)
}

async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri).header(HOST, "news.test");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    app.clone().oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn listed_ids(body: &Value) -> Vec<i64> {
    body["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_like_reorders_front_page() {
    let (app, articles) = seeded_app().await;
    let (oldest, middle, newest) = (articles[0].id, articles[1].id, articles[2].id);

    let front = json(send(&app, Method::GET, "/", None).await).await;
    assert_eq!(listed_ids(&front), vec![newest, middle, oldest]);
    assert_eq!(front["count"], 3);

    let response = send(&app, Method::POST, &format!("/like/{oldest}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with(&format!("state_like{oldest}=like;")));
    assert!(cookie.contains("Path=/"));

    let body = json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["vote"], "liked");
    assert_eq!(body["positive_reviews"], 1);

    let front = json(send(&app, Method::GET, "/", None).await).await;
    assert_eq!(listed_ids(&front), vec![oldest, newest, middle]);
    assert_eq!(front["articles"][0]["has_likes"], true);
}

#[tokio::test]
async fn test_repeat_vote_rejected_without_cookie() {
    let (app, articles) = seeded_app().await;
    let id = articles[1].id;
    let cookie = format!("state_like{id}=like");

    let response = send(&app, Method::POST, &format!("/like/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let body = json(response).await;
    assert_eq!(body["code"], "duplicate_vote");

    let detail = json(send(&app, Method::GET, &format!("/{id}"), None).await).await;
    assert_eq!(detail["positive_reviews"], 0);
}

#[tokio::test]
async fn test_switch_vote_on_fresh_article_floors_at_zero() {
    let (app, articles) = seeded_app().await;
    let id = articles[0].id;
    let cookie = format!("state_like{id}=like");

    let response = send(&app, Method::POST, &format!("/dislike/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["positive_reviews"], 0);
    assert_eq!(body["negative_reviews"], 1);
    assert_eq!(body["vote"], "disliked");
}

#[tokio::test]
async fn test_unknown_articles_are_404() {
    let (app, _) = seeded_app().await;

    let response = send(&app, Method::POST, "/like/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(json(response).await["code"], "not_found");

    assert_eq!(send(&app, Method::GET, "/999", None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::GET, "/favicon.ico", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_reports_vote_state_and_share_links() {
    let (app, articles) = seeded_app().await;
    let id = articles[0].id;
    let cookie = format!("other=1; state_like{id}=dislike");

    let response = send(&app, Method::GET, &format!("/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["title"], "Harbour reopens");
    assert_eq!(body["body"], "Ships return after the storm.<br/>Rain eased overnight.");
    assert_eq!(body["liked"], false);
    assert_eq!(body["disliked"], true);
    assert_eq!(
        body["share"]["facebook"],
        format!("https://www.facebook.com/sharer/sharer.php?u=http%3A%2F%2Fnews.test%2F{id}")
    );
    assert!(body["share"]["twitter"].as_str().unwrap().contains("text=Harbour+reopens"));
}

#[tokio::test]
async fn test_category_filter() {
    let (app, articles) = seeded_app().await;

    let body = json(send(&app, Method::GET, "/categories/sports", None).await).await;
    assert_eq!(body["category"], "sports");
    assert_eq!(listed_ids(&body), vec![articles[1].id]);

    let empty = json(send(&app, Method::GET, "/categories/culture", None).await).await;
    assert_eq!(empty["count"], 0);
}

#[tokio::test]
async fn test_search_results_and_empty_response() {
    let (app, _) = seeded_app().await;

    let hits = json(send(&app, Method::GET, "/search?query=rain", None).await).await;
    assert_eq!(hits["status"], "ok");
    assert_eq!(hits["articles"].as_array().unwrap().len(), 2);

    let misses = json(send(&app, Method::GET, "/search?query=volcano", None).await).await;
    assert_eq!(misses["status"], "no_results");
    assert!(misses["articles"].as_array().unwrap().is_empty());

    let blank = json(send(&app, Method::GET, "/search", None).await).await;
    assert_eq!(blank["status"], "no_results");
}

#[tokio::test]
async fn test_health_reports_snapshot() {
    let (app, _) = seeded_app().await;
    send(&app, Method::GET, "/", None).await;

    let body = json(send(&app, Method::GET, "/health", None).await).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cached_articles"], 3);
}
