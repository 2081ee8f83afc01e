//! Service Module Tests
//!
//! ## Test Scopes
//! - **Leaderboard facade**: Validation, defaults, error kinds, shutdown behaviour.
//! - **Concurrency**: Parallel writers and readers against one shared instance.
//! - **HTTP API**: Routes, status codes, and 1-based rank translation via `oneshot`.
//! - **Runtime**: Start/stop of the service with its background jobs.

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::LeaderboardError;
    use crate::service::handlers::router;
    use crate::service::leaderboard::Leaderboard;
    use crate::service::protocol::{LeaderboardEntry, MetadataResponse, UserRankResponse};
    use crate::service::runtime::LeaderboardService;
    use crate::service::types::ScoreUpdate;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const TTL: Duration = Duration::from_secs(3600);

    fn board() -> Arc<Leaderboard> {
        Leaderboard::new(TTL, 10)
    }

    // ============================================================
    // FACADE - VALIDATION & ERRORS
    // ============================================================

    #[test]
    fn test_submit_returns_score_and_rank() {
        let board = board();
        board.submit_score("alice", 100.0).unwrap();

        let update = board.submit_score("bob", 200.0).unwrap();

        assert_eq!(
            update,
            ScoreUpdate {
                username: "bob".to_string(),
                score: 200.0,
                rank: 0,
            }
        );
    }

    #[test]
    fn test_submit_rejects_invalid_input() {
        let board = board();

        assert!(matches!(
            board.submit_score("", 1.0),
            Err(LeaderboardError::InvalidArgument(_))
        ));
        assert!(matches!(
            board.submit_score("alice", f64::NAN),
            Err(LeaderboardError::InvalidArgument(_))
        ));
        assert_eq!(board.size().unwrap(), 0);
    }

    #[test]
    fn test_query_top_defaults_and_validation() {
        let board = Leaderboard::new(TTL, 3);
        for (i, user) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            board.submit_score(user, i as f64).unwrap();
        }

        assert_eq!(board.default_top_n(), 3);
        assert_eq!(board.query_top(None).unwrap().len(), 3);
        assert_eq!(board.query_top(Some(0)).unwrap().len(), 0);
        assert_eq!(board.query_top(Some(50)).unwrap().len(), 5);
        assert!(matches!(
            board.query_top(Some(-1)),
            Err(LeaderboardError::InvalidArgument(_))
        ));

        let top = board.query_top(Some(2)).unwrap();
        assert_eq!(top[0].username, "e");
        assert_eq!(top[1].username, "d");
    }

    #[test]
    fn test_query_rank_returns_score() {
        let board = board();
        board.submit_score("alice", 100.0).unwrap();
        board.submit_score("bob", 200.0).unwrap();
        board.submit_score("carol", 150.0).unwrap();

        let alice = board.query_rank("alice").unwrap();
        assert_eq!(alice.rank, 2);
        assert_eq!(alice.score, 100.0);

        assert_eq!(
            board.query_rank("nobody"),
            Err(LeaderboardError::NotFound("nobody".to_string()))
        );
    }

    #[test]
    fn test_whitespace_username_accepted_and_empty_rank_not_found() {
        let board = board();
        board.submit_score("alice", 2.0).unwrap();

        let update = board.submit_score(" ", 1.0).unwrap();
        assert_eq!(update.rank, 1);
        assert_eq!(board.query_rank(" ").unwrap().score, 1.0);
        assert_eq!(board.query_top(None).unwrap()[1].username, " ");

        assert_eq!(
            board.query_rank(""),
            Err(LeaderboardError::NotFound(String::new()))
        );
    }

    #[test]
    fn test_operations_unavailable_after_shutdown() {
        let board = board();
        board.submit_score("alice", 1.0).unwrap();

        board.shutdown().unwrap();
        board.shutdown().unwrap();

        assert!(!board.is_open());
        assert!(matches!(
            board.submit_score("bob", 1.0),
            Err(LeaderboardError::Unavailable(_))
        ));
        assert!(matches!(
            board.query_top(None),
            Err(LeaderboardError::Unavailable(_))
        ));
        assert!(matches!(
            board.query_rank("alice"),
            Err(LeaderboardError::Unavailable(_))
        ));
        assert!(matches!(
            board.query_metadata(),
            Err(LeaderboardError::Unavailable(_))
        ));
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let kinds: HashSet<&str> = [
            LeaderboardError::InvalidArgument(String::new()),
            LeaderboardError::NotFound(String::new()),
            LeaderboardError::Unavailable(String::new()),
            LeaderboardError::Internal(String::new()),
        ]
        .iter()
        .map(|e| e.kind())
        .collect();

        assert_eq!(kinds.len(), 4);
    }

    // ============================================================
    // CONCURRENCY
    // ============================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_keep_order_consistent() {
        let board = board();
        let mut handles = Vec::new();

        for worker in 0..8u32 {
            let board = board.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..200u32 {
                    let user = format!("user_{}", (worker * 37 + i) % 300);
                    board.submit_score(&user, f64::from(i % 17)).unwrap();
                    if i % 10 == 0 {
                        let page = board.query_top(Some(20)).unwrap();
                        let users: HashSet<&str> =
                            page.iter().map(|e| e.username.as_str()).collect();
                        assert_eq!(users.len(), page.len());
                        for (rank, entry) in page.iter().enumerate() {
                            assert_eq!(entry.rank, rank);
                        }
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let size = board.size().unwrap();
        let all = board.query_top(Some(size as i64)).unwrap();
        assert_eq!(all.len(), size);
        for pair in all.windows(2) {
            let ordered = pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].username < pair[1].username);
            assert!(ordered, "{:?} before {:?}", pair[0], pair[1]);
        }
        for entry in &all {
            assert_eq!(board.query_rank(&entry.username).unwrap().rank, entry.rank);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_same_user_last_wins() {
        let board = board();
        let mut handles = Vec::new();

        for worker in 0..4 {
            let board = board.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..100 {
                    board
                        .submit_score("alice", f64::from(worker * 1000 + i))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(board.size().unwrap(), 1);
        let last = board.query_rank("alice").unwrap();
        assert_eq!(last.rank, 0);
        assert_eq!(last.score % 1000.0, 99.0);

        board.submit_score("alice", -5.0).unwrap();
        assert_eq!(board.query_rank("alice").unwrap().score, -5.0);
    }

    // ============================================================
    // HTTP API
    // ============================================================

    async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_score(username: &str, score: f64) -> Request<Body> {
        let body = serde_json::json!({ "username": username, "score": score });
        Request::builder()
            .method("POST")
            .uri("/api/score")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_http_submit_and_list_use_one_based_ranks() {
        let app = router(board());

        let (status, body) = send(&app, post_score("alice", 100.0)).await;
        assert_eq!(status, StatusCode::OK);
        let alice: UserRankResponse = parse(&body);
        assert_eq!(alice.rank, 1);

        send(&app, post_score("bob", 200.0)).await;
        send(&app, post_score("carol", 150.0)).await;

        let (status, body) = send(&app, get("/api/leaderboard?top=10")).await;
        assert_eq!(status, StatusCode::OK);
        let entries: Vec<LeaderboardEntry> = parse(&body);
        let rows: Vec<(usize, &str, f64)> = entries
            .iter()
            .map(|e| (e.rank, e.username.as_str(), e.score))
            .collect();
        assert_eq!(
            rows,
            vec![(1, "bob", 200.0), (2, "carol", 150.0), (3, "alice", 100.0)]
        );

        let (status, body) = send(&app, get("/api/rank/alice")).await;
        assert_eq!(status, StatusCode::OK);
        let alice: UserRankResponse = parse(&body);
        assert_eq!(alice.rank, 3);
        assert_eq!(alice.score, 100.0);
    }

    #[tokio::test]
    async fn test_http_leaderboard_default_page() {
        let app = router(Leaderboard::new(TTL, 2));
        for (user, score) in [("a", 1.0), ("b", 2.0), ("c", 3.0)] {
            send(&app, post_score(user, score)).await;
        }

        let (status, body) = send(&app, get("/api/leaderboard")).await;
        assert_eq!(status, StatusCode::OK);
        let entries: Vec<LeaderboardEntry> = parse(&body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "c");
    }

    #[tokio::test]
    async fn test_http_error_statuses() {
        let board = board();
        let app = router(board.clone());

        let (status, body) = send(&app, get("/api/rank/nobody")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: serde_json::Value = parse(&body);
        assert_eq!(error["error"], "not_found");

        let (status, _) = send(&app, post_score("", 10.0)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get("/api/leaderboard?top=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = parse(&body);
        assert_eq!(error["error"], "invalid_argument");

        board.shutdown().unwrap();
        let (status, body) = send(&app, get("/api/metadata")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let error: serde_json::Value = parse(&body);
        assert_eq!(error["error"], "unavailable");

        let (status, _) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_http_metadata_after_refresh() {
        let board = board();
        let app = router(board.clone());
        send(&app, post_score("alice", 100.0)).await;
        send(&app, post_score("bob", 200.0)).await;

        let (_, body) = send(&app, get("/api/metadata")).await;
        let before: MetadataResponse = parse(&body);
        assert_eq!(before.total_users, 0);
        assert_eq!(before.top_user, None);

        board.refresh_metadata().unwrap();

        let (status, body) = send(&app, get("/api/metadata")).await;
        assert_eq!(status, StatusCode::OK);
        let after: MetadataResponse = parse(&body);
        assert_eq!(after.total_users, 2);
        assert_eq!(after.top_user.as_deref(), Some("bob"));
        assert_eq!(after.top_score, Some(200.0));
    }

    // ============================================================
    // RUNTIME
    // ============================================================

    #[tokio::test]
    async fn test_service_start_and_shutdown() {
        let config = Config {
            aggregation_interval: Duration::from_secs(1),
            ..Config::default()
        };
        let service = LeaderboardService::start(&config);
        let board = service.board();

        board.submit_score("alice", 1.0).unwrap();
        let snapshot = service.aggregator().aggregate_once().unwrap().unwrap();
        assert_eq!(snapshot.count, 1);

        let (status, _) = send(&service.router(), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);

        service.shutdown().await;
        assert!(!board.is_open());
        assert!(matches!(
            board.query_top(None),
            Err(LeaderboardError::Unavailable(_))
        ));
    }
}
