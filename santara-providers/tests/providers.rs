use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

use santara_core::SearchRequest;
use santara_providers::{
    AirAsiaProvider, BatikProvider, GarudaProvider, Provider, ProviderError, ProviderSettings,
};

fn request(origin: &str, destination: &str, date: &str) -> SearchRequest {
    SearchRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_date: date.to_string(),
        return_date: None,
        passengers: 1,
        cabin_class: "economy".to_string(),
        filters: None,
        sort_by: None,
        sort_order: None,
        return_filters: None,
        return_sort_by: None,
        return_sort_order: None,
    }
}

fn document(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write document");
    file
}

fn settings(name: &str, file: &NamedTempFile) -> ProviderSettings {
    ProviderSettings {
        name: name.to_string(),
        response_time: Duration::ZERO,
        failure_rate: 0.0,
        data_path: file.path().to_path_buf(),
    }
}

const GARUDA_DOC: &str = r#"{
    "status": "success",
    "flights": [
        {
            "flight_id": "GA402",
            "airline": "Garuda Indonesia",
            "departure": {"airport": "CGK", "time": "2025-12-15T06:30:00"},
            "arrival": {"airport": "DPS", "time": "2025-12-15T09:20:00"},
            "duration_minutes": 110,
            "stops": 0,
            "aircraft": "Boeing 737-800",
            "price": {"amount": 1250000, "currency": "IDR"},
            "available_seats": 42,
            "fare_class": "economy",
            "baggage": {"carry_on": 1, "checked": 2},
            "amenities": ["WiFi", "Meals"]
        },
        {
            "flight_id": "GA408",
            "airline": "Garuda Indonesia",
            "departure": {"airport": "CGK", "time": "2025-12-16T06:30:00"},
            "arrival": {"airport": "DPS", "time": "2025-12-16T09:20:00"},
            "duration_minutes": 110,
            "stops": 0,
            "aircraft": "Boeing 737-800",
            "price": {"amount": 1150000, "currency": "IDR"},
            "available_seats": 18,
            "fare_class": "economy",
            "baggage": {"carry_on": 1, "checked": 2}
        },
        {
            "flight_id": "GA230",
            "airline": "Garuda Indonesia",
            "departure": {"airport": "CGK", "time": "2025-12-15T10:00:00"},
            "arrival": {"airport": "SUB", "time": "2025-12-15T11:25:00"},
            "duration_minutes": 85,
            "stops": 0,
            "aircraft": "Boeing 737-800",
            "price": {"amount": 900000, "currency": "IDR"},
            "available_seats": 50,
            "fare_class": "economy",
            "baggage": {"carry_on": 1, "checked": 1}
        }
    ]
}"#;

#[tokio::test]
async fn garuda_filters_by_route_and_local_date() {
    let file = document(GARUDA_DOC);
    let provider = GarudaProvider::new(settings("Garuda Indonesia", &file));
    let cancel = CancellationToken::new();

    let flights = provider
        .search(&cancel, &request("CGK", "DPS", "2025-12-15"))
        .await
        .expect("one matching flight");

    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].id, "GA402_Garuda Indonesia");
    assert_eq!(flights[0].departure.city, "Jakarta");
    assert_eq!(flights[0].arrival.city, "Denpasar");
}

#[tokio::test]
async fn garuda_reports_no_flights_for_an_unserved_route() {
    let file = document(GARUDA_DOC);
    let provider = GarudaProvider::new(settings("Garuda Indonesia", &file));
    let cancel = CancellationToken::new();

    let err = provider
        .search(&cancel, &request("CGK", "KNO", "2025-12-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NoFlights));
}

#[tokio::test]
async fn garuda_rejects_an_unsuccessful_status() {
    let file = document(r#"{"status": "maintenance", "flights": []}"#);
    let provider = GarudaProvider::new(settings("Garuda Indonesia", &file));
    let cancel = CancellationToken::new();

    let err = provider
        .search(&cancel, &request("CGK", "DPS", "2025-12-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
}

#[tokio::test]
async fn batik_parses_its_camel_case_payload() {
    let file = document(
        r#"{
        "code": 200,
        "message": "OK",
        "results": [
            {
                "flightNumber": "ID7520",
                "airlineName": "Batik Air",
                "airlineIATA": "ID",
                "origin": "CGK",
                "destination": "DPS",
                "departureDateTime": "2025-12-15T09:15:00",
                "arrivalDateTime": "2025-12-15T12:05:00",
                "travelTime": "1h 50m",
                "numberOfStops": 0,
                "fare": {
                    "basePrice": 950000,
                    "taxes": 100000,
                    "totalPrice": 1050000,
                    "currencyCode": "IDR",
                    "class": "economy"
                },
                "seatsAvailable": 30,
                "aircraftModel": "Airbus A320",
                "baggageInfo": "7kg cabin, 20kg checked",
                "onboardServices": ["In-flight entertainment"]
            }
        ]
    }"#,
    );
    let provider = BatikProvider::new(settings("Batik Air", &file));
    let cancel = CancellationToken::new();

    let flights = provider
        .search(&cancel, &request("CGK", "DPS", "2025-12-15"))
        .await
        .expect("matching flight");

    assert_eq!(flights[0].duration.total_minutes, 110);
    assert_eq!(flights[0].baggage.carry_on, "7kg cabin");
    assert_eq!(flights[0].baggage.checked, "20kg checked");
}

#[tokio::test]
async fn airasia_accepts_a_payload_without_stop_details() {
    let file = document(
        r#"{
        "status": "ok",
        "flights": [
            {
                "flight_code": "QZ7510",
                "airline": "AirAsia",
                "from_airport": "CGK",
                "to_airport": "DPS",
                "depart_time": "2025-12-15T05:45:00",
                "arrive_time": "2025-12-15T08:40:00",
                "duration_hours": 1.9,
                "direct_flight": true,
                "price_idr": 750000,
                "seats": 8,
                "cabin_class": "economy"
            }
        ]
    }"#,
    );
    let provider = AirAsiaProvider::new(settings("AirAsia", &file));
    let cancel = CancellationToken::new();

    let flights = provider
        .search(&cancel, &request("CGK", "DPS", "2025-12-15"))
        .await
        .expect("matching flight");

    assert_eq!(flights[0].stops, 0);
    assert_eq!(flights[0].duration.total_minutes, 114);
    assert_eq!(flights[0].baggage.carry_on, "");
}

#[tokio::test(start_paused = true)]
async fn a_cancelled_search_surfaces_a_timeout() {
    let file = document(GARUDA_DOC);
    let mut cfg = settings("Garuda Indonesia", &file);
    cfg.response_time = Duration::from_secs(30);
    let provider = GarudaProvider::new(cfg);

    let cancel = CancellationToken::new();
    let req = request("CGK", "DPS", "2025-12-15");
    let search = provider.search(&cancel, &req);
    cancel.cancel();

    let err = search.await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout { .. }));
}
