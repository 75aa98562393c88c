use fare_check::{
    reference_repository, CheckPriceRequest, FareChecker, LocalStorage, ResponseStatus,
    TomlConfig,
};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

const ROUTE_HEADER: &str = "id,number,point_1,point_2,ceiling_price_full_service,floor_price_full_service,ceiling_price_medium_service,floor_price_medium_service,ceiling_price_no_frills,floor_price_no_frills";

fn write_tables(dir: &Path) {
    let jet = format!(
        "{}\n\
         1,1,CGK,DPS,1500000,900000,1300000,800000,1100000,600000\n\
         2,2,SUB,KNO,2500000,1500000,2200000,1300000,2000000,1000000\n",
        ROUTE_HEADER
    );
    let big_propeller = format!(
        "{}\n\
         1,1,DPS,CGK,1200000,700000,1000000,600000,900000,500000\n\
         2,2,DPS,BMU,900000,500000,800000,450000,,\n",
        ROUTE_HEADER
    );
    let small_propeller = format!(
        "{}\n\
         1,1,DPS,LBJ,800000,400000,700000,350000,600000,300000\n",
        ROUTE_HEADER
    );
    let service_category = "\
number,airlines,category
1,Garuda Indonesia,FULL SERVICE
2,Sriwijaya Air,MEDIUM SERVICE
3,Citilink,NO FRILLS
4,Wings Air,NO FRILLS
";

    std::fs::write(dir.join("jet.csv"), jet).unwrap();
    std::fs::write(dir.join("big_propeller.csv"), big_propeller).unwrap();
    std::fs::write(dir.join("small_propeller.csv"), small_propeller).unwrap();
    std::fs::write(dir.join("service_category.csv"), service_category).unwrap();
}

fn checker(
    dir: &TempDir,
) -> FareChecker<impl fare_check::core::ReferenceRepository> {
    let config = TomlConfig::default();
    let storage = LocalStorage::new(dir.path());
    FareChecker::new(reference_repository(storage, &config))
}

fn request(
    origin: &str,
    destination: &str,
    airline: &str,
    aircraft_type: &str,
    offered_price: serde_json::Value,
) -> CheckPriceRequest {
    CheckPriceRequest {
        origin: Some(origin.to_string()),
        destination: Some(destination.to_string()),
        airline: Some(airline.to_string()),
        aircraft_type: Some(aircraft_type.to_string()),
        offered_price: Some(offered_price),
    }
}

#[tokio::test]
async fn test_jet_fare_within_band_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!(1_200_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::Ok);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({
            "origin": "CGK",
            "destination": "DPS",
            "airline": "Garuda Indonesia",
            "aircraftType": "JET",
            "serviceCategory": "FULL_SERVICE",
            "offeredPrice": 1200000,
            "ceilingPrice": 1500000,
            "floorPrice": 900000,
            "isValid": true
        })
    );
}

#[tokio::test]
async fn test_jet_fare_above_ceiling_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!(1_600_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::Ok);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["isValid"], json!(false));
    assert_eq!(body["floorPrice"], json!(900000));
    assert_eq!(body["ceilingPrice"], json!(1500000));
}

#[tokio::test]
async fn test_reversed_direction_and_lowercase_input_match() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("dps", "cgk", "GARUDA INDONESIA", "jet", json!("900000")))
        .await;

    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(response.status, ResponseStatus::Ok);
    assert_eq!(body["origin"], json!("DPS"));
    assert_eq!(body["isValid"], json!(true));
}

#[tokio::test]
async fn test_unspecified_aircraft_lists_every_category() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "UNSPECIFIED", json!(1_300_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::Ok);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({
            "origin": "CGK",
            "destination": "DPS",
            "airline": "Garuda Indonesia",
            "serviceCategory": "FULL_SERVICE",
            "offeredPrice": 1300000,
            "multipleOptions": [
                { "aircraftType": "JET", "ceilingPrice": 1500000, "floorPrice": 900000, "isValid": true },
                { "aircraftType": "BIG_PROPELLER", "ceilingPrice": 1200000, "floorPrice": 700000, "isValid": false }
            ]
        })
    );
}

#[tokio::test]
async fn test_wrong_aircraft_type_suggests_alternative() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("LBJ", "DPS", "Wings Air", "JET", json!(400_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::NotFound);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({
            "error": "The chosen route is not available for the JET aircraft type, please choose another aircraft type.",
            "availableAircraftTypes": ["SMALL_PROPELLER"]
        })
    );
}

#[tokio::test]
async fn test_unknown_origin_reported_before_airline() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("xyz", "QQQ", "Nobody Air", "JET", json!(1)))
        .await;

    assert_eq!(response.status, ResponseStatus::NotFound);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "XYZ is not available in our database, please select another airport." })
    );
}

#[tokio::test]
async fn test_unknown_airline_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda", "JET", json!(1_000_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::NotFound);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "Airline not found" })
    );
}

#[tokio::test]
async fn test_unserved_pair_is_generic_not_found() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "LBJ", "Citilink", "UNSPECIFIED", json!(500_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::NotFound);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "No direct route found between CGK and LBJ." })
    );
}

#[tokio::test]
async fn test_missing_band_is_reported_as_incomplete_data() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("DPS", "BMU", "Citilink", "BIG_PROPELLER", json!(500_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::InternalServerError);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "Fare data for this route is incomplete, please contact support." })
    );
}

#[tokio::test]
async fn test_missing_table_is_internal_error() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());
    std::fs::remove_file(temp_dir.path().join("small_propeller.csv")).unwrap();

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!(1_000_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::InternalServerError);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_malformed_price_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!("1,200,000")))
        .await;

    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(response.status.code(), 400);
}

#[tokio::test]
async fn test_blank_service_category_is_incomplete_data() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());
    std::fs::write(
        temp_dir.path().join("service_category.csv"),
        "airlines,category\nGaruda Indonesia,\n",
    )
    .unwrap();

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!(1_200_000)))
        .await;

    assert_eq!(response.status, ResponseStatus::InternalServerError);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "Fare data for this route is incomplete, please contact support." })
    );
}

#[tokio::test]
async fn test_padded_price_string_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());

    let response = checker(&temp_dir)
        .handle(request("CGK", "DPS", "Garuda Indonesia", "JET", json!(" 1200000 ")))
        .await;

    assert_eq!(response.status, ResponseStatus::BadRequest);
}

#[test]
fn test_catalog_lists_airports_and_airlines() {
    let temp_dir = TempDir::new().unwrap();
    write_tables(temp_dir.path());
    let checker = checker(&temp_dir);

    let airports = tokio_test::block_on(checker.list_airports()).unwrap();
    let codes: Vec<&str> = airports.iter().map(|code| code.as_str()).collect();
    assert_eq!(codes, vec!["BMU", "CGK", "DPS", "KNO", "LBJ", "SUB"]);

    let airlines = tokio_test::block_on(checker.list_airlines()).unwrap();
    assert_eq!(
        serde_json::to_value(&airlines).unwrap(),
        json!([
            { "airline": "Citilink", "serviceCategory": "NO_FRILLS" },
            { "airline": "Garuda Indonesia", "serviceCategory": "FULL_SERVICE" },
            { "airline": "Sriwijaya Air", "serviceCategory": "MEDIUM_SERVICE" },
            { "airline": "Wings Air", "serviceCategory": "NO_FRILLS" }
        ])
    );
}
