//! End-to-end tests: `HttpSlideApi` and the deck controller talking to a real
//! server bound to an ephemeral port.

mod common;

use actix_web::{App, HttpServer, dev::ServerHandle, web};

use slidedeck::db::DbPool;
use slidedeck::deck::controller::LOAD_FAILED;
use slidedeck::deck::{ApiError, DeckController, HttpSlideApi, SlideApi};
use slidedeck::handlers;
use slidedeck::models::slide::{self, NewSlide, SlidePatch};
use common::{assert_contiguous, contents, seed_slides, setup_test_db};

/// Start the API on 127.0.0.1 with an OS-assigned port. Returns its base URL.
fn start_server(pool: &DbPool) -> (String, ServerHandle) {
    let pool = pool.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::api::configure)
            .default_service(web::to(handlers::not_found))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test server");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{addr}"), handle)
}

#[actix_web::test]
async fn test_http_api_crud_lifecycle() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let (base_url, handle) = start_server(pool);
    let api = HttpSlideApi::new(base_url);

    let a = api
        .create(&NewSlide {
            content: Some("A".to_string()),
            ..Default::default()
        })
        .await
        .expect("create A");
    let b = api.create(&NewSlide::default()).await.expect("create B");
    assert_eq!((a.order, b.order), (0, 1));

    let updated = api
        .update(b.id, &SlidePatch::content("# B"))
        .await
        .expect("update");
    assert_eq!(updated.content, "# B");
    assert_eq!(updated.order, 1);

    api.delete(a.id).await.expect("delete");
    let slides = api.list().await.expect("list");
    assert_eq!(contents(&slides), vec!["# B"]);
    assert_contiguous(&slides);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_http_api_maps_error_statuses() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let (base_url, handle) = start_server(pool);
    let api = HttpSlideApi::new(base_url);

    assert_eq!(
        api.update(777, &SlidePatch::content("X")).await,
        Err(ApiError::NotFound)
    );
    assert_eq!(api.delete(777).await, Err(ApiError::NotFound));

    match api
        .create(&NewSlide {
            order: Some(-1),
            ..Default::default()
        })
        .await
    {
        Err(ApiError::Validation(details)) => assert!(details.contains("non-negative")),
        other => panic!("expected validation error, got {other:?}"),
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_controller_over_http() {
    let db = setup_test_db().await;
    let pool = db.pool();
    seed_slides(pool, &["A", "B", "C"]).await;
    let (base_url, handle) = start_server(pool);

    let mut deck = DeckController::new(HttpSlideApi::new(base_url));
    assert!(deck.load().await);
    assert_eq!(contents(deck.slides()), vec!["A", "B", "C"]);

    deck.begin_edit();
    deck.set_buffer("# X");
    assert!(deck.save_edit().await);

    assert!(deck.add_slide().await);
    assert_eq!(deck.current_index(), 3);

    let stored = slide::list(pool).await.expect("list");
    assert_eq!(contents(&stored), contents(deck.slides()));
    assert_eq!(stored[0].content, "# X");
    assert_contiguous(&stored);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let api = HttpSlideApi::new(format!("http://127.0.0.1:{port}"));

    assert!(matches!(api.list().await, Err(ApiError::Transport(_))));

    let mut deck = DeckController::new(api);
    assert!(!deck.load().await);
    assert_eq!(deck.error(), Some(LOAD_FAILED));
    assert!(deck.slides().is_empty());
}
