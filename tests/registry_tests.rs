#![cfg(feature = "registry")]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use shelterwish::core::Nip;
use shelterwish::registry::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn client() -> RegistryClient {
    RegistryClient::new(RegistryConfig::default()).unwrap()
}

const KRS_BUSINESS_BODY: &str = r#"{"odpis":{"naglowekA":{"numerKRS":"0000123456"},
    "dane":{"dzial1":{"danePodmiotu":{"nazwa":"ZOO SPÓŁKA Z O.O.","formaPrawna":"SPÓŁKA Z OGRANICZONĄ ODPOWIEDZIALNOŚCIĄ"}}}}}"#;

/// Loopback HTTP server answering each request from a routing closure.
/// Records the request target (path + query) of every request it serves.
struct FakeRegistry {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeRegistry {
    async fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&chunk[..n]),
                    }
                }
                let target = String::from_utf8_lossy(&head)
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                let (status, body) = respond(&target);
                seen.lock().unwrap().push(target);

                let reason = match status {
                    200 => "OK",
                    400 => "Bad Request",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    fn client(&self) -> RegistryClient {
        RegistryClient::new(RegistryConfig {
            whitelist_url: self.base_url.clone(),
            krs_url: format!("{}/", self.base_url),
            timeout_secs: 5,
            ..RegistryConfig::default()
        })
        .unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn jan_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

// ---------------------------------------------------------------------------
// Local validation (no network)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_nip_rejected_before_request() {
    // Unroutable endpoint: reaching the network would surface a Network error
    let config = RegistryConfig {
        whitelist_url: "http://127.0.0.1:9".into(),
        ..RegistryConfig::default()
    };
    let client = RegistryClient::new(config).unwrap();
    let err = client
        .lookup_nip("1234567890", jan_15())
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidNip(_)));
}

#[tokio::test]
async fn invalid_krs_rejected_before_request() {
    let err = client().lookup_krs("KRS-1").await.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidKrs(_)));
}

#[test]
fn config_is_kept() {
    let config = RegistryConfig {
        timeout_secs: 3,
        ..RegistryConfig::default()
    };
    let client = RegistryClient::new(config.clone()).unwrap();
    assert_eq!(client.config(), &config);
}

// ---------------------------------------------------------------------------
// HTTP behaviour against a loopback registry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn krs_falls_back_to_business_register() {
    let server = FakeRegistry::start(|target| {
        if target.contains("rejestr=P") {
            (200, KRS_BUSINESS_BODY.to_string())
        } else {
            (404, String::new())
        }
    })
    .await;

    let entity = server.client().lookup_krs("123456").await.unwrap();
    assert_eq!(entity.register, KrsRegister::Businesses);
    assert_eq!(entity.name, "ZOO SPÓŁKA Z O.O.");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("/api/krs/OdpisAktualny/0000123456?"));
    assert!(requests[0].contains("rejestr=S"));
    assert!(requests[1].contains("rejestr=P"));
}

#[tokio::test]
async fn krs_missing_from_both_registers() {
    let server = FakeRegistry::start(|_| (404, String::new())).await;

    let err = server.client().lookup_krs("0000123456").await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(ref krs) if krs == "0000123456"));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn krs_server_error_stops_lookup() {
    let server = FakeRegistry::start(|_| (500, "maintenance".to_string())).await;

    let err = server.client().lookup_krs("0000123456").await.unwrap_err();
    assert!(matches!(err, RegistryError::Api { status: 500, .. }));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn whitelist_rejection_carries_ministry_message() {
    let server = FakeRegistry::start(|_| {
        (
            400,
            r#"{"code":"WL-113","message":"Pole 'NIP' ma nieprawidłową długość."}"#.to_string(),
        )
    })
    .await;

    let err = server
        .client()
        .lookup_nip("5260001246", jan_15())
        .await
        .unwrap_err();
    match err {
        RegistryError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "WL-113: Pole 'NIP' ma nieprawidłową długość.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn whitelist_lookup_sends_normalized_nip_and_date() {
    let server = FakeRegistry::start(|_| {
        (
            200,
            r#"{"result":{"subject":{"name":"FUNDACJA PSI AZYL","nip":"5260001246",
                "statusVat":"Czynny","accountNumbers":[]},"requestId":"fake-1"}}"#
                .to_string(),
        )
    })
    .await;

    let subject = server
        .client()
        .lookup_nip("526-000-12-46", jan_15())
        .await
        .unwrap();
    assert_eq!(subject.name, "FUNDACJA PSI AZYL");
    assert_eq!(subject.vat_status, VatStatus::Active);
    assert_eq!(subject.request_id.as_deref(), Some("fake-1"));
    assert_eq!(
        server.requests(),
        vec!["/api/search/nip/5260001246?date=2024-01-15"]
    );
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[test]
fn whitelist_exempt_subject_without_nip_field() {
    let nip = Nip::parse("5260001246").unwrap();
    let body = r#"{"result":{"subject":{"name":"JAN KOWALSKI SCHRONISKO","statusVat":"Zwolniony",
        "residenceAddress":"UL. POLNA 1, 30-001 KRAKÓW","workingAddress":null,"accountNumbers":[]},
        "requestId":"r-1"}}"#;
    let s = parse_whitelist_response(body, &nip).unwrap();
    assert_eq!(s.nip, nip);
    assert_eq!(s.vat_status, VatStatus::Exempt);
    assert_eq!(s.address.as_deref(), Some("UL. POLNA 1, 30-001 KRAKÓW"));
    assert!(s.registration_date.is_none());
    assert!(s.account_numbers.is_empty());
}

#[test]
fn whitelist_garbage_is_parse_error() {
    let nip = Nip::parse("5260001246").unwrap();
    let err = parse_whitelist_response("<html>", &nip).unwrap_err();
    assert!(matches!(err, RegistryError::Parse(_)));
}

#[test]
fn whitelist_error_envelope() {
    let nip = Nip::parse("5260001246").unwrap();
    let body = r#"{"code":"WL-100","message":"Wystąpił nieoczekiwany błąd serwera."}"#;
    let err = parse_whitelist_response(body, &nip).unwrap_err();
    assert!(matches!(err, RegistryError::Api { .. }));
}

#[test]
fn krs_business_extract_without_address() {
    let body = r#"{"odpis":{"naglowekA":{"numerKRS":"0000000001"},
        "dane":{"dzial1":{"danePodmiotu":{"nazwa":"ZOO SPÓŁKA Z O.O.","formaPrawna":"SPÓŁKA Z OGRANICZONĄ ODPOWIEDZIALNOŚCIĄ"}}}}}"#;
    let e = parse_krs_response(body, KrsRegister::Businesses).unwrap();
    assert_eq!(e.register, KrsRegister::Businesses);
    assert!(e.street.is_none());
    assert!(e.city.is_none());
    assert!(e.nip.is_none());
}

#[test]
fn error_display() {
    let err = RegistryError::Api {
        status: 400,
        message: "WL-113: bad NIP".into(),
    };
    assert_eq!(
        err.to_string(),
        "registry API error (HTTP 400): WL-113: bad NIP"
    );
}

// ---------------------------------------------------------------------------
// Live registry (requires network)
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn live_whitelist_lookup() {
    let subject = client().lookup_nip_today("5260250995").await.unwrap();
    assert!(!subject.name.is_empty());
}

#[tokio::test]
#[ignore]
async fn live_krs_lookup() {
    let entity = client().lookup_krs("0000019193").await.unwrap();
    assert!(!entity.name.is_empty());
}
