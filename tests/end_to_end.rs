//! End-to-end: a real [`WcaClient`] against a mock server for both
//! upstreams, through profile loading and the neighbours lookup.

use mycubing::dashboard;
use mycubing::{PrLabel, load_profile};
use serde_json::json;
use wca_data::{ClientConfig, WcaClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WcaClient {
    let config = ClientConfig {
        community_base_url: format!("{}/api", server.uri()),
        official_base_url: format!("{}/api/v0", server.uri()),
        user_agent: Some("mycubing-e2e/1.0".into()),
        timeout_seconds: 5,
        neighbour_spacing_ms: 0,
        neighbour_backoff_max_ms: 20,
        ..Default::default()
    };
    WcaClient::new(config).expect("client")
}

async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/persons/2016TEST01.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "2016TEST01",
            "name": "Test Cuber",
            "country": "ES",
            "results": {
                "Spring2021": {"333": [{"round": "Final", "best": 1100, "average": 1250, "format": "a", "solves": []}]},
                "Autumn2020": {"333": [{"round": "Final", "best": 1300, "average": 1200, "format": "a", "solves": []}]}
            }
        })))
        .mount(server)
        .await;

    for (id, from) in [("Spring2021", "2021-04-10"), ("Autumn2020", "2020-10-03")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/competitions/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": format!("{id} Open"),
                "country": "ES",
                "date": {"from": from, "till": from, "numberOfDays": 1}
            })))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn profile_loads_without_official_profile() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v0/persons/2016TEST01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = load_profile(&client, "2016TEST01").await.expect("profile");

    assert!(profile.info.is_empty());
    let ids: Vec<&str> = profile.competition_ids();
    assert_eq!(ids, vec!["Autumn2020", "Spring2021"]);
    assert_eq!(profile.rows[0].pr, Some(PrLabel::SingleAndAverage));
    assert_eq!(profile.rows[1].pr, Some(PrLabel::Single));
    assert_eq!(profile.rows[1].competition_name, "Spring2021 Open");
}

#[tokio::test]
async fn unknown_person_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/persons/2099NONE01.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(load_profile(&client, "2099NONE01").await.is_none());
}

#[tokio::test]
async fn neighbours_from_competitor_lists() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v0/persons/2016TEST01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "person": {"name": "Test Cuber", "wca_id": "2016TEST01", "country": {"iso2": "ES"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/competitions/Autumn2020/competitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Test Cuber", "wca_id": "2016TEST01", "country_iso2": "ES"},
            {"id": 2, "name": "Alice", "wca_id": "2015ALIC01", "country_iso2": "ES"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/competitions/Spring2021/competitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Test Cuber", "wca_id": "2016TEST01", "country_iso2": "ES"},
            {"id": 2, "name": "Alice", "wca_id": "2015ALIC01", "country_iso2": "ES"},
            {"id": 3, "name": "Bob", "wca_id": null, "country_iso2": "PT"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = load_profile(&client, "2016TEST01").await.expect("profile");

    let all = dashboard::find_neighbours(&client, &profile, None, 1).await;
    let counts: Vec<(&str, u32)> = all.iter().map(|n| (n.name.as_str(), n.count)).collect();
    assert_eq!(counts, vec![("Alice", 2), ("Bob", 1)]);

    let board = dashboard::neighbour_board(&all, 20);
    assert_eq!(board.podium.len(), 2);
    assert_eq!(board.total, 2);

    let only_2020 = dashboard::find_neighbours(&client, &profile, Some(2020), 1).await;
    assert_eq!(only_2020.len(), 1);
    assert_eq!(only_2020[0].name, "Alice");
}
