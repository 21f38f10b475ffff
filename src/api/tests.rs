//! Tests for the API groups

use super::*;
use crate::cheermote::{CheermoteCatalog, CheermoteFormat};
use crate::http::{HttpClient, HttpClientConfig};
use crate::request::ForwardPagination;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ApiClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .client_id("test-client")
        .access_token("test-token")
        .build();
    ApiClient::new(Arc::new(HttpClient::with_config(config).unwrap()))
}

fn subscription(user_id: &str) -> Value {
    json!({
        "broadcaster_id": "141981764",
        "broadcaster_login": "twitchdev",
        "broadcaster_name": "TwitchDev",
        "gifter_id": "",
        "gifter_login": "",
        "gifter_name": "",
        "is_gift": false,
        "plan_name": "Channel Subscription (twitchdev)",
        "tier": "1000",
        "user_id": user_id,
        "user_login": format!("user{user_id}"),
        "user_name": format!("User{user_id}")
    })
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_get_subscriptions_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(query_param("broadcaster_id", "141981764"))
        .and(query_param("first", "2"))
        .and(query_param("after", "c0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription("1"), subscription("2")],
            "pagination": {"cursor": "c1"},
            "total": 13,
            "points": 15
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server)
        .subscriptions()
        .get_subscriptions("141981764", &ForwardPagination::new().after("c0").limit(2))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].user_id, "1");
    assert_eq!(page.data[0].gifter_id(), None);
    assert_eq!(page.cursor.as_deref(), Some("c1"));
    assert_eq!(page.total, 13);
    assert_eq!(page.points, 15);
}

#[tokio::test]
async fn test_get_subscriptions_paginated_stops_at_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(query_param("after", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription("3")],
            "pagination": {"cursor": "c2"},
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(query_param("broadcaster_id", "141981764"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription("1"), subscription("2")],
            "pagination": {"cursor": "c1"},
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = api_for(&server)
        .subscriptions()
        .get_subscriptions_paginated("141981764")
        .unwrap();
    let all = request.get_all().await.unwrap();

    let ids: Vec<&str> = all.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(request.total(), Some(3));
    assert!(request.is_exhausted());
}

#[tokio::test]
async fn test_get_subscriptions_for_users() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription("7")]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server).subscriptions();
    let subs = api
        .get_subscriptions_for_users("141981764", ["7", "8"])
        .await
        .unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].user_login, "user7");

    let requests = server.received_requests().await.unwrap();
    let user_ids: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "user_id")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(user_ids, vec!["7".to_string(), "8".to_string()]);
}

#[tokio::test]
async fn test_get_subscription_for_user_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let sub = api_for(&server)
        .subscriptions()
        .get_subscription_for_user("141981764", "9")
        .await
        .unwrap();
    assert!(sub.is_none());
}

#[tokio::test]
async fn test_check_user_subscription() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/user"))
        .and(query_param("user_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "broadcaster_id": "141981764",
                "broadcaster_login": "twitchdev",
                "broadcaster_name": "TwitchDev",
                "is_gift": true,
                "gifter_id": "12826",
                "gifter_login": "twitch",
                "gifter_name": "Twitch",
                "tier": "2000"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/user"))
        .and(query_param("user_id", "6"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not subscribed"))
        .mount(&server)
        .await;

    let api = api_for(&server).subscriptions();

    let sub = api
        .check_user_subscription("5", "141981764")
        .await
        .unwrap()
        .unwrap();
    assert!(sub.is_gift);
    assert_eq!(sub.tier, "2000");
    assert_eq!(sub.gifter_login.as_deref(), Some("twitch"));

    assert!(api
        .check_user_subscription("6", "141981764")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_check_user_subscription_other_errors_propagate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .subscriptions()
        .check_user_subscription("5", "141981764")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

// ============================================================================
// Bits Tests
// ============================================================================

#[test]
fn test_leaderboard_query_defaults() {
    let query = LeaderboardQuery::default();
    assert_eq!(query.count, 10);
    assert_eq!(query.period, LeaderboardPeriod::All);

    let pairs = query.to_request().query_pairs();
    assert_eq!(
        pairs,
        vec![
            ("count".to_string(), "10".to_string()),
            ("period".to_string(), "all".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_leaderboard() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bits/leaderboard"))
        .and(query_param("count", "2"))
        .and(query_param("period", "week"))
        .and(query_param("started_at", "2024-05-06T07:00:00.000Z"))
        .and(query_param("user_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"user_id": "158010205", "user_login": "tundracowboy", "user_name": "TundraCowboy", "rank": 1, "score": 12543},
                {"user_id": "7168163", "user_login": "topramens", "user_name": "Topramens", "rank": 2, "score": 6900}
            ],
            "date_range": {
                "started_at": "2024-05-06T07:00:00Z",
                "ended_at": "2024-05-13T07:00:00Z"
            },
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = LeaderboardQuery {
        count: 2,
        period: LeaderboardPeriod::Week,
        started_at: Some(Utc.with_ymd_and_hms(2024, 5, 6, 7, 0, 0).unwrap()),
        user_id: Some("42".to_string()),
    };
    let board = api_for(&server).bits().get_leaderboard(&query).await.unwrap();

    assert_eq!(board.total, 2);
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[0].score, 12543);
    assert_eq!(board.entries[1].user_name, "Topramens");
    assert_eq!(board.date_range.ended_at, "2024-05-13T07:00:00Z");
}

#[tokio::test]
async fn test_get_cheermotes_feeds_scanner() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bits/cheermotes"))
        .and(query_param("broadcaster_id", "41245072"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "prefix": "Cheer",
                "tiers": [{
                    "min_bits": 1,
                    "id": "1",
                    "color": "#979797",
                    "images": {
                        "dark": {
                            "animated": {"1": "https://cdn.example/cheer/dark/animated/1/1.gif"},
                            "static": {"1": "https://cdn.example/cheer/dark/static/1/1.png"}
                        },
                        "light": {"animated": {}, "static": {}}
                    },
                    "can_cheer": true,
                    "show_in_bits_card": true
                }],
                "type": "global_first_party",
                "order": 1,
                "last_updated": "2018-05-22T00:06:04Z",
                "is_charitable": false
            }]
        })))
        .mount(&server)
        .await;

    let list = api_for(&server)
        .bits()
        .get_cheermotes(Some("41245072"))
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    let found = list
        .parse_message("gg cheer5", &CheermoteFormat::default())
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].amount, 5);
    assert_eq!(
        found[0].display_info.url,
        "https://cdn.example/cheer/dark/animated/1/1.gif"
    );
}

#[tokio::test]
async fn test_get_global_cheermotes_sends_no_broadcaster() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bits/cheermotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let list = api_for(&server).bits().get_cheermotes(None).await.unwrap();
    assert!(list.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0]
        .url
        .query_pairs()
        .any(|(k, _)| k == "broadcaster_id"));
}
