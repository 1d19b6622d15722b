mod common;

use actix_web::test;
use cabanas_api::config::BookingPolicy;
use serde_json::json;

use common::{date, forest_cabin, lake_cabin, TestApp};

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["store"]["status"], "ok");
}

#[actix_rt::test]
async fn test_list_cabanas_with_search() {
    let test_app = TestApp::new();
    test_app.add_cabana(lake_cabin()).await;
    test_app.add_cabana(forest_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/cabanas").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/cabanas?search=caba%C3%B1a%20del%20b")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let cabanas = body.as_array().unwrap();
    assert_eq!(cabanas.len(), 1);
    assert_eq!(cabanas[0]["nombre"], "Cabaña del Bosque");
    assert_eq!(cabanas[0]["destacada"], true);
}

#[actix_rt::test]
async fn test_get_cabana_errors() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/cabanas/not-an-id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri("/api/cabanas/65a1b2c3d4e5f60718293a4b")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[actix_rt::test]
async fn test_quote_in_season_with_extra_guests() {
    let test_app = TestApp::new();
    let id = test_app.add_cabana(lake_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({
            "checkIn": "2024-01-10",
            "checkOut": "2024-01-12",
            "adultos": 3,
            "menores": 1,
            "menores3": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["noches"], 2);
    assert_eq!(body["adicionalPersonasPorNoche"], 30.0);
    assert_eq!(body["total"], 2.0 * (150.0 + 30.0));
    let nights = body["desglose"].as_array().unwrap();
    assert_eq!(nights.len(), 2);
    assert_eq!(nights[0]["fecha"], "2024-01-10");
    assert_eq!(nights[0]["precioBase"], 150.0);
    assert_eq!(nights[0]["precioTotal"], 180.0);
    assert_eq!(nights[0]["temporada"], "Verano");
    assert_eq!(nights[0]["esTemporadaEspecial"], true);
}

#[actix_rt::test]
async fn test_quote_without_dates_is_zero() {
    let test_app = TestApp::new();
    let id = test_app.add_cabana(lake_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "adultos": 2 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0.0);
    assert_eq!(body["noches"], 0);
    assert!(body["desglose"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_quote_rejects_invalid_requests() {
    let test_app = TestApp::new();
    let id = test_app.add_cabana(lake_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    // check-out not after check-in
    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "checkIn": "2024-03-10", "checkOut": "2024-03-10", "adultos": 2 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // five adults in a cabin that takes four
    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "checkIn": "2024-03-10", "checkOut": "2024-03-12", "adultos": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("adults"));

    // malformed body
    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "checkIn": "tomorrow", "adultos": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_reservation_blocks_boundary_dates() {
    let test_app = TestApp::new();
    let id = test_app.add_cabana(lake_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/reservations", id))
        .set_json(json!({
            "huesped": { "nombre": "Marta", "email": "marta@example.com" },
            "checkIn": "2024-03-10",
            "checkOut": "2024-03-15",
            "adultos": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["noches"], 5);
    assert_eq!(created["total"], 500.0);
    assert_eq!(created["desglosePrecios"].as_array().unwrap().len(), 5);

    let reservation_id = created["_id"]["$oid"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri(&format!("/api/reservations/{}", reservation_id))
        .to_request();
    let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["codigo"], created["codigo"]);

    // check-in on the previous guest's check-out day
    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/reservations", id))
        .set_json(json!({
            "huesped": { "nombre": "Jose", "email": "jose@example.com" },
            "checkIn": "2024-03-15",
            "checkOut": "2024-03-18",
            "adultos": 2
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/cabanas/{}/availability?checkIn=2024-03-15&checkOut=2024-03-18",
            id
        ))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["disponible"], false);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/cabanas/{}/availability?checkIn=2024-03-16&checkOut=2024-03-18",
            id
        ))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["disponible"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/cabanas/{}/booked-dates", id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 6);
    assert_eq!(days[0], "2024-03-10");
    assert_eq!(days[5], "2024-03-15");
}

#[actix_rt::test]
async fn test_search_ranks_free_cabins_within_budget() {
    let test_app = TestApp::new();
    let lake = test_app.add_cabana(lake_cabin()).await;
    test_app.add_cabana(forest_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let search = json!({
        "checkIn": "2024-04-01",
        "checkOut": "2024-04-03",
        "adultos": 2,
        "menores": 1
    });

    // No budget: forest 20 (4/3) + 20 (base 180) + 20 featured + 5 wifi = 65,
    // lake 30 (6/3) + 30 (base 100) + 15 pool + 10 grill = 85.
    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(&search)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["cabana"]["nombre"], "Cabaña del Lago");
    assert_eq!(results[0]["total_score"], 85.0);
    assert_eq!(results[0]["precioEstimado"], 220.0);
    assert_eq!(results[1]["total_score"], 65.0);
    assert_eq!(results[1]["precioEstimado"], 360.0);

    // Forest costs 360 for the stay, over a 300 budget.
    let mut with_budget = search.clone();
    with_budget["presupuestoMaximo"] = json!(300);
    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(&with_budget)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["cabana"]["nombre"], "Cabaña del Lago");

    // Booking the lake cabin removes it from the results.
    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/reservations", lake))
        .set_json(json!({
            "huesped": { "nombre": "Rosa", "email": "rosa@example.com" },
            "checkIn": date(2024, 4, 3).to_string(),
            "checkOut": date(2024, 4, 5).to_string(),
            "adultos": 2
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(&search)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["cabana"]["nombre"], "Cabaña del Bosque");
}

#[actix_rt::test]
async fn test_overlong_stays_are_rejected() {
    let test_app = TestApp::with_policy(BookingPolicy { max_nights: 7 });
    let id = test_app.add_cabana(lake_cabin()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "checkIn": "2024-03-01", "checkOut": "2024-03-08", "adultos": 2 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["noches"], 7);

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/quote", id))
        .set_json(json!({ "checkIn": "0001-01-01", "checkOut": "9999-12-31", "adultos": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("7 nights"));

    let req = test::TestRequest::post()
        .uri(&format!("/api/cabanas/{}/reservations", id))
        .set_json(json!({
            "huesped": { "nombre": "Marta", "email": "marta@example.com" },
            "checkIn": "2024-03-01",
            "checkOut": "2024-03-20",
            "adultos": 2
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(json!({ "checkIn": "2024-03-01", "checkOut": "2024-04-01", "adultos": 2 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
