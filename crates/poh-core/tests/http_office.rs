//! End-to-end checks of the HTTP adapters against a local stand-in for the
//! EarthMC API.

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use poh_core::{
    FileLedger, FixedClock, HttpLedgerSource, HttpPlayerDirectory, LookupError, PassportKind,
    PassportOffice, PlayerDirectory, PohConfig, PohError, Validity,
};

const NOW: i64 = 1_760_000_000_000;
const DAY: i64 = 24 * 60 * 60 * 1000;
const AGENT: &str = "poh-test-agent";

fn player(name: &str, joined_days_ago: i64, last_online_days_ago: i64) -> Value {
    json!({
        "name": name,
        "uuid": format!("uuid-{}", name.to_lowercase()),
        "title": null,
        "town": { "name": "Vienna", "uuid": "t1" },
        "nation": { "name": "Austria", "uuid": "n1" },
        "timestamps": {
            "registered": NOW - 300 * DAY,
            "joinedTownAt": NOW - joined_days_ago * DAY,
            "lastOnline": NOW - last_online_days_ago * DAY
        },
        "status": { "isOnline": false, "isNPC": false },
        "perms": { "build": [true, true, false, false] }
    })
}

async fn players(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, String) {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if agent != AGENT {
        return (StatusCode::FORBIDDEN, "[]".into());
    }

    let name = body["query"][0].as_str().unwrap_or_default().to_lowercase();
    let reply = match name.as_str() {
        "steve" => json!([player("Steve", 40, 3)]),
        "notch" => json!([player("Notch", 40, 21)]),
        "newbie" => json!([player("Newbie", 2, 0)]),
        "broken" => return (StatusCode::INTERNAL_SERVER_ERROR, "oops".into()),
        _ => json!([]),
    };
    (StatusCode::OK, reply.to_string())
}

async fn ledger_copy() -> &'static str {
    "id,username,type\n1,Steve,STD\n2,Notch,STD\n3,Alex,SPE\n"
}

async fn spawn_api() -> PohConfig {
    let app = Router::new()
        .route("/players", post(players))
        .route("/ledger.pof", get(ledger_copy));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    PohConfig {
        api_url: format!("http://{}/players", addr),
        sync_url: format!("http://{}/ledger.pof", addr),
        user_agent: AGENT.to_string(),
        request_timeout_secs: 5,
        ..PohConfig::default()
    }
}

#[tokio::test]
async fn fetch_player_parses_first_record() {
    let config = spawn_api().await;
    let directory = HttpPlayerDirectory::new(&config).unwrap();

    let steve = directory.fetch_player("STEVE").await.unwrap().unwrap();
    assert_eq!(steve.name, "Steve");
    assert_eq!(steve.town_name(), Some("Vienna"));
    assert_eq!(steve.timestamps.last_online, Some(NOW - 3 * DAY));

    assert!(directory.fetch_player("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn fetch_player_reports_http_status() {
    let config = spawn_api().await;
    let directory = HttpPlayerDirectory::new(&config).unwrap();

    match directory.fetch_player("broken").await {
        Err(LookupError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_api_is_a_connection_error() {
    let config = PohConfig {
        api_url: "http://127.0.0.1:9/players".to_string(),
        ..PohConfig::default()
    };
    let directory = HttpPlayerDirectory::new(&config).unwrap();

    assert!(matches!(
        directory.fetch_player("steve").await,
        Err(LookupError::Connection(_))
    ));
}

#[tokio::test]
async fn sync_then_check_all_over_http() {
    let config = spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let ledger = FileLedger::open(dir.path().join("LocalPassports.pof")).unwrap();

    let office = PassportOffice::with_clock(
        HttpPlayerDirectory::new(&config).unwrap(),
        ledger,
        FixedClock(NOW),
    );

    let source = HttpLedgerSource::new(&config).unwrap();
    assert_eq!(office.sync_ledger(&source).await.unwrap(), 3);

    let checks = office.check_all().await.unwrap();
    let lines: Vec<String> = checks
        .iter()
        .map(|(passport, report)| format!("({}) {}", passport.id, report.as_ref().unwrap()))
        .collect();

    assert_eq!(
        lines,
        [
            "(#0001) Steve: VALID (11 day(s) 0 hour(s) left)",
            "(#0002) Notch: IN GRACE PERIOD (9 day(s) 0 hour(s) left)",
            "(#0003) Alex: SPECIAL passport, always valid",
        ]
    );
}

#[tokio::test]
async fn issue_and_revoke_through_file_ledger() {
    let config = spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LocalPassports.pof");

    let office = PassportOffice::with_clock(
        HttpPlayerDirectory::new(&config).unwrap(),
        FileLedger::open(&path).unwrap(),
        FixedClock(NOW),
    );

    let issued = office.issue("steve", PassportKind::Standard, false).await.unwrap();
    assert_eq!(issued.username, "Steve");

    assert!(matches!(
        office.issue("newbie", PassportKind::Standard, false).await,
        Err(PohError::NotEligible { .. })
    ));
    office.issue("newbie", PassportKind::Special, true).await.unwrap();

    let report = office.check_validity("Steve").await.unwrap();
    assert!(matches!(report.verdict(), Some(Validity::Valid { .. })));

    office.revoke("STEVE").unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "id,username,type\n2,Newbie,SPE\n"
    );
}
