use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use stayfinder::core::db::Store;
use stayfinder::notify::{LogNotifier, Notifier};

const REVIEW_KEY: &str = "dev-review-key";

macro_rules! spawn_app {
    () => {{
        let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
        test::init_service(
            App::new()
                .app_data(web::Data::new(Store::new()))
                .app_data(web::Data::from(notifier))
                .configure(stayfinder::routes),
        )
        .await
    }};
}

macro_rules! register_and_login {
    ($app:expr, $email:expr) => {{
        let create_body = json!({
            "email": $email,
            "name": "Flow Test Host",
            "password": "test-password"
        });
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/hosts")
                .set_json(&create_body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201, "host creation failed");

        let login_body = json!({ "email": $email, "password": "test-password" });
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(&login_body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200, "login failed");
        let login: Value = test::read_body_json(resp).await;
        login["token"].as_str().expect("token missing").to_string()
    }};
}

fn cabin_submission() -> Value {
    json!({
        "title": "Cedar Cabin above the Valley",
        "city": "Vancouver",
        "propertyType": "Cabin",
        "sleeps": 6,
        "nightlyPrice": 180,
        "platforms": ["Direct Booking Site", "Vrbo"],
        "amenities": ["wifi", "hot-tub"],
        "features": ["fireplace", "mountain-view"],
        "experiences": ["mountainRetreats"],
        "images": ["https://img.example/cabin.jpg"],
        "description": "A quiet cabin, see https://example.com/cabin"
    })
}

#[actix_web::test]
async fn full_host_flow() {
    let app = spawn_app!();
    let token = register_and_login!(app, "flow@example.com");

    // submit a property
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&cabin_submission())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let submitted: Value = test::read_body_json(resp).await;
    assert_eq!(submitted["status"], "pending");
    let property_id = submitted["id"].as_str().unwrap().to_string();

    // not in the directory yet
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/properties").to_request(),
    )
    .await;
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["total"], 0);

    // the review queue sees it
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/submissions/pending")
            .insert_header(("X-Review-Key", REVIEW_KEY))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let pending: Value = test::read_body_json(resp).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // approve
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/submissions/{}/review", property_id))
            .insert_header(("X-Review-Key", REVIEW_KEY))
            .set_json(&json!({ "decision": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let reviewed: Value = test::read_body_json(resp).await;
    assert_eq!(reviewed["status"], "approved");
    assert!(reviewed["reviewed_at"].is_string());

    // a matching filtered search finds it, and the response echoes the
    // decoded filter state
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/properties?experience=mountainRetreats&guests=4&amenities=wifi")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["total"], 1);
    assert_eq!(results["filters"]["experience"], "mountainRetreats");
    assert_eq!(results["filters"]["guests"], 4);
    assert_eq!(results["filters"]["propertyTypes"], json!(["Cabin"]));
    assert_eq!(results["properties"][0]["id"], property_id.as_str());

    // a non-matching search does not
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/properties?experience=beachfrontEscapes")
            .to_request(),
    )
    .await;
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["total"], 0);

    // property JSON and the rendered page are both live
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/properties/{}", property_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/stay/{}", property_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Cedar Cabin above the Valley"));
}

#[actix_web::test]
async fn submission_requires_auth_and_valid_fields() {
    let app = spawn_app!();

    // no token
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .set_json(&cabin_submission())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    let token = register_and_login!(app, "validation@example.com");

    // empty title
    let mut body = cabin_submission();
    body["title"] = json!("");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // unknown property type
    let mut body = cabin_submission();
    body["propertyType"] = json!("Castle");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // unknown amenity id
    let mut body = cabin_submission();
    body["amenities"] = json!(["wifi", "teleporter"]);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // non-http image url
    let mut body = cabin_submission();
    body["images"] = json!(["ftp://img.example/cabin.jpg"]);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn login_with_invalid_credentials_fails() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(&json!({ "email": "nobody@example.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn host_signup_validation_and_duplicates() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/hosts")
            .set_json(&json!({ "email": "not-an-email", "name": "Someone", "password": "long-enough" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    let _token = register_and_login!(app, "dup@example.com");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/hosts")
            .set_json(&json!({ "email": "dup@example.com", "name": "Second", "password": "test-password" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn review_requires_the_shared_key() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/submissions/pending").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/submissions/pending")
            .insert_header(("X-Review-Key", "wrong-key"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn rejection_keeps_property_out_of_the_directory() {
    let app = spawn_app!();
    let token = register_and_login!(app, "rejected@example.com");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&cabin_submission())
            .to_request(),
    )
    .await;
    let submitted: Value = test::read_body_json(resp).await;
    let property_id = submitted["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/submissions/{}/review", property_id))
            .insert_header(("X-Review-Key", REVIEW_KEY))
            .set_json(&json!({ "decision": "rejected", "note": "Needs photos" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // not listed anywhere public
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/properties").to_request(),
    )
    .await;
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["total"], 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/properties/{}", property_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    // the host still sees it, with the note
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    let own: Value = test::read_body_json(resp).await;
    assert_eq!(own[0]["status"], "rejected");
    assert_eq!(own[0]["review_note"], "Needs photos");

    // a second review of the same submission conflicts
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/submissions/{}/review", property_id))
            .insert_header(("X-Review-Key", REVIEW_KEY))
            .set_json(&json!({ "decision": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn search_clamps_and_survives_garbage_queries() {
    let app = spawn_app!();
    let token = register_and_login!(app, "search@example.com");

    // one big cabin, approved
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&cabin_submission())
            .to_request(),
    )
    .await;
    let submitted: Value = test::read_body_json(resp).await;
    let property_id = submitted["id"].as_str().unwrap().to_string();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/submissions/{}/review", property_id))
            .insert_header(("X-Review-Key", REVIEW_KEY))
            .set_json(&json!({ "decision": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // guests clamp to 16, above the cabin's capacity of 6
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/properties?guests=999")
            .to_request(),
    )
    .await;
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["filters"]["guests"], 16);
    assert_eq!(results["total"], 0);

    // garbage decodes to the default state and still lists the cabin
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/properties?guests=zzz&minPrice=&amenities=bogus,,&radius=nope")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["total"], 1);
    assert_eq!(results["activeFilterCount"], 0);
}

#[actix_web::test]
async fn filter_options_expose_the_configuration() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/filters/options").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let options: Value = test::read_body_json(resp).await;

    let keys: Vec<&str> = options["experiences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"mountainRetreats"));
    assert!(options["propertyTypes"].as_array().unwrap().iter().any(|t| t == "Entire Home"));
    assert_eq!(options["guests"]["max"], 16);
    assert_eq!(options["price"]["ceiling"], 10_000);
}

#[actix_web::test]
async fn landing_page_is_served() {
    let app = spawn_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Browse Stays"));
}
