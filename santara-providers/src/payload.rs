//! Native response schemas of the four airline backends. Each adapter owns
//! its mapping from these shapes into the unified `Flight` model; nothing
//! outside this crate sees them.

use serde::Deserialize;

// Garuda Indonesia

#[derive(Debug, Deserialize)]
pub struct GarudaResponse {
    pub status: String,
    pub flights: Vec<GarudaFlight>,
}

#[derive(Debug, Deserialize)]
pub struct GarudaFlight {
    pub flight_id: String,
    pub airline: String,
    pub departure: GarudaLocation,
    pub arrival: GarudaLocation,
    pub duration_minutes: u32,
    pub stops: u32,
    pub aircraft: String,
    pub price: GarudaPrice,
    pub available_seats: i32,
    pub fare_class: String,
    pub baggage: GarudaBaggage,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GarudaLocation {
    pub airport: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct GarudaPrice {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct GarudaBaggage {
    pub carry_on: u32,
    pub checked: u32,
}

// Lion Air

#[derive(Debug, Deserialize)]
pub struct LionAirResponse {
    pub success: bool,
    pub data: LionAirData,
}

#[derive(Debug, Deserialize)]
pub struct LionAirData {
    pub available_flights: Vec<LionAirFlight>,
}

#[derive(Debug, Deserialize)]
pub struct LionAirFlight {
    pub id: String,
    pub carrier: LionAirCarrier,
    pub route: LionAirRoute,
    pub schedule: LionAirSchedule,
    /// Flight time in minutes.
    pub flight_time: u32,
    pub is_direct: bool,
    #[serde(default)]
    pub stop_count: u32,
    pub pricing: LionAirPricing,
    pub seats_left: i32,
    pub plane_type: String,
    pub services: LionAirServices,
}

#[derive(Debug, Deserialize)]
pub struct LionAirCarrier {
    pub name: String,
    pub iata: String,
}

#[derive(Debug, Deserialize)]
pub struct LionAirRoute {
    pub from: LionAirAirport,
    pub to: LionAirAirport,
}

#[derive(Debug, Deserialize)]
pub struct LionAirAirport {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct LionAirSchedule {
    pub departure: String,
    pub departure_timezone: String,
    pub arrival: String,
    pub arrival_timezone: String,
}

#[derive(Debug, Deserialize)]
pub struct LionAirPricing {
    pub total: f64,
    pub currency: String,
    pub fare_type: String,
}

#[derive(Debug, Deserialize)]
pub struct LionAirServices {
    pub wifi_available: bool,
    pub meals_included: bool,
    #[serde(rename = "baggage_allowance")]
    pub baggage: LionAirBaggage,
}

#[derive(Debug, Deserialize)]
pub struct LionAirBaggage {
    pub cabin: String,
    pub hold: String,
}

// Batik Air

#[derive(Debug, Deserialize)]
pub struct BatikResponse {
    pub code: u16,
    #[allow(dead_code)]
    #[serde(default)]
    pub message: String,
    pub results: Vec<BatikFlight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatikFlight {
    pub flight_number: String,
    pub airline_name: String,
    pub origin: String,
    pub destination: String,
    pub departure_date_time: String,
    pub arrival_date_time: String,
    /// Travel time as "Nh Mm" text.
    pub travel_time: String,
    pub number_of_stops: u32,
    pub fare: BatikFare,
    pub seats_available: i32,
    pub aircraft_model: String,
    #[serde(default)]
    pub baggage_info: String,
    #[serde(default)]
    pub onboard_services: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatikFare {
    pub total_price: f64,
    pub currency_code: String,
    pub class: String,
}

// AirAsia

#[derive(Debug, Deserialize)]
pub struct AirAsiaResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub status: String,
    pub flights: Vec<AirAsiaFlight>,
}

#[derive(Debug, Deserialize)]
pub struct AirAsiaFlight {
    pub flight_code: String,
    pub airline: String,
    pub from_airport: String,
    pub to_airport: String,
    pub depart_time: String,
    pub arrive_time: String,
    pub duration_hours: f64,
    pub direct_flight: bool,
    #[serde(default)]
    pub stops: Vec<AirAsiaStop>,
    pub price_idr: f64,
    pub seats: i32,
    pub cabin_class: String,
    #[serde(default)]
    pub baggage_note: String,
}

#[derive(Debug, Deserialize)]
pub struct AirAsiaStop {
    #[allow(dead_code)]
    pub airport: String,
}
