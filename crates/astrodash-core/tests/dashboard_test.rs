#![allow(clippy::unwrap_used)]
// Integration tests for `Dashboard` against a wiremock proxy.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Local;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use astrodash_core::view::{self, ApodView, PhotosView};
use astrodash_core::{
    ClientConfig, CoreError, Dashboard, EntryState, FetchError, LoadOutcome, ResourceKey, Rover,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let config = ClientConfig {
        proxy_url: Url::parse(&server.uri()).unwrap(),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let dashboard = Dashboard::new(&config).unwrap();
    (server, dashboard)
}

fn photo(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "sol": 4102,
        "camera": { "id": 20, "name": "FHAZ", "full_name": "Front Hazard Avoidance Camera" },
        "img_src": format!("https://mars.nasa.gov/{id}.jpg"),
        "earth_date": "2024-02-19",
        "rover": {
            "id": 5,
            "name": "Curiosity",
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active"
        }
    })
}

fn manifest(name: &str) -> serde_json::Value {
    json!({
        "photo_manifest": {
            "name": name,
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active",
            "max_sol": 4102,
            "max_date": "2024-02-19",
            "total_photos": 695_000
        }
    })
}

async fn mount_apod(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image": {
                "date": "2024-03-01",
                "title": "Pillars of Creation",
                "explanation": "Stars forming.",
                "media_type": "image",
                "url": "https://apod.nasa.gov/image.jpg"
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn photo_ids(dashboard: &Dashboard, rover: Rover) -> Vec<u64> {
    dashboard
        .snapshot()
        .photos_for(rover)
        .map(|p| p.iter().map(|p| p.id).collect())
        .unwrap_or_default()
}

// ── APOD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_apod_merges_and_renders() {
    let (server, dashboard) = setup().await;
    mount_apod(&server).await;

    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    dashboard.store().subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let outcome = dashboard.load_apod().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);

    let snap = dashboard.snapshot();
    assert!(snap.loading.is_empty());
    assert_eq!(snap.apod_checked_on, Some(Local::now().date_naive()));
    assert!(matches!(
        view::render(&snap).apod,
        ApodView::Image { ref title, .. } if title == "Pillars of Creation"
    ));
    // One update to flag loading, one to merge the result.
    assert_eq!(renders.load(Ordering::SeqCst), 2);

    // Served from cache; the mock expects exactly one request.
    dashboard.load_apod().await.unwrap();
}

#[tokio::test]
async fn test_apod_without_url_is_recorded_as_error() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "image": { "title": "Nothing", "media_type": "image" } })),
        )
        .mount(&server)
        .await;

    let err = dashboard.load_apod().await.unwrap_err();
    assert!(matches!(err, CoreError::Fetch(FetchError::Decode { .. })));

    let snap = dashboard.snapshot();
    assert!(snap.loading.is_empty());
    assert!(snap.error_for(ResourceKey::Apod).is_some());
    assert!(matches!(view::render(&snap).apod, ApodView::Failed { .. }));
}

// ── Rovers ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_select_rover_loads_photos_and_manifest_once() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rovers/curiosity"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [photo(1), photo(2)] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/manifests/curiosity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest("Curiosity")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dashboard.select_rover(Rover::Curiosity).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(photo_ids(&dashboard, Rover::Curiosity), vec![1, 2]);

    let snap = dashboard.snapshot();
    assert_eq!(snap.selected_rover, Some(Rover::Curiosity));
    assert_eq!(
        snap.manifest_for(Rover::Curiosity).unwrap().total_photos,
        Some(695_000)
    );
    assert!(matches!(
        dashboard.cache_state(ResourceKey::Photos(Rover::Curiosity)),
        Some(EntryState::Resolved { .. })
    ));

    // Second selection is answered from the caches.
    dashboard.select_rover(Rover::Curiosity).await.unwrap();
}

#[tokio::test]
async fn test_failed_photos_are_recorded_then_cleared_by_refresh() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rovers/spirit"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rovers/spirit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = dashboard.load_photos(Rover::Spirit).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Fetch(FetchError::HttpStatus { code: 500 })
    ));

    let snap = dashboard.snapshot();
    assert_eq!(
        snap.error_for(ResourceKey::Photos(Rover::Spirit)),
        Some(&FetchError::HttpStatus { code: 500 })
    );
    assert!(snap.loading.is_empty());
    assert!(snap.photos_for(Rover::Spirit).is_none());

    dashboard
        .refresh(ResourceKey::Photos(Rover::Spirit))
        .await
        .unwrap();
    let snap = dashboard.snapshot();
    assert!(snap.error_for(ResourceKey::Photos(Rover::Spirit)).is_none());
    assert_eq!(photo_ids(&dashboard, Rover::Spirit), Vec::<u64>::new());
}

#[tokio::test]
async fn test_selecting_unconfigured_rover_fails() {
    let server = MockServer::start().await;
    let config = ClientConfig {
        proxy_url: Url::parse(&server.uri()).unwrap(),
        rovers: vec![Rover::Curiosity],
        ..ClientConfig::default()
    };
    let dashboard = Dashboard::new(&config).unwrap();

    let err = dashboard.select_rover(Rover::Spirit).await.unwrap_err();
    assert!(matches!(err, CoreError::UnknownRover { ref name } if name == "spirit"));

    let err = dashboard.select_rover_named("sojourner").await.unwrap_err();
    assert!(matches!(err, CoreError::UnknownRover { .. }));
    assert_eq!(dashboard.snapshot().selected_rover, None);
}

// ── Staleness ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_response_does_not_overwrite_fresher_data() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rovers/curiosity"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [photo(1)] }))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rovers/curiosity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [photo(2)] })))
        .mount(&server)
        .await;

    let slow = tokio::spawn({
        let dashboard = dashboard.clone();
        async move { dashboard.load_photos(Rover::Curiosity).await }
    });

    // Wait for the slow request to reach the server.
    for _ in 0..100 {
        if server.received_requests().await.unwrap().len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let fresh = dashboard
        .refresh(ResourceKey::Photos(Rover::Curiosity))
        .await
        .unwrap();
    assert_eq!(fresh, LoadOutcome::Applied);
    assert_eq!(photo_ids(&dashboard, Rover::Curiosity), vec![2]);

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow, LoadOutcome::Stale);
    assert_eq!(photo_ids(&dashboard, Rover::Curiosity), vec![2]);
    assert!(dashboard.snapshot().loading.is_empty());
}

// ── Data needs ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_dispatch_needs_fills_in_missing_data() {
    let (server, dashboard) = setup().await;
    mount_apod(&server).await;
    Mock::given(method("GET"))
        .and(path("/rovers/opportunity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "latest_photos": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/manifests/opportunity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest("Opportunity")))
        .mount(&server)
        .await;

    dashboard
        .store()
        .update(astrodash_core::StatePatch::new().selected_rover(Some(Rover::Opportunity)))
        .unwrap();

    let today = Local::now().date_naive();
    let handles = dashboard.dispatch_needs(&dashboard.snapshot(), today);
    assert_eq!(handles.len(), 3);
    for handle in handles {
        handle.await.unwrap();
    }

    let snap = dashboard.snapshot();
    assert!(snap.apod.is_some());
    assert_eq!(
        view::render(&snap).photos,
        PhotosView::Empty {
            rover: Rover::Opportunity
        }
    );
    assert!(view::data_needs(&snap, today).is_empty());
}
