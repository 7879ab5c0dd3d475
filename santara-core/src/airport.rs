use chrono::FixedOffset;

const HOUR: i32 = 3600;

/// WIB, UTC+7 (Asia/Jakarta).
const WIB_AIRPORTS: &[&str] = &[
    "CGK", "SUB", "KNO", "PLM", "PDG", "BTJ", "PKU", "BDO", "SRG", "JOG",
];

/// WITA, UTC+8 (Asia/Makassar).
const WITA_AIRPORTS: &[&str] = &["DPS", "UPG", "BPN", "LOP", "BDJ", "SOC", "PKY", "MDC"];

/// WIT, UTC+9 (Asia/Jayapura).
const WIT_AIRPORTS: &[&str] = &["DJJ", "AMQ", "TIM", "SRR"];

/// Returns the UTC offset for an Indonesian airport code.
/// Unknown codes default to WIB, the most common zone.
pub fn timezone_offset(airport_code: &str) -> FixedOffset {
    let hours = if WITA_AIRPORTS.contains(&airport_code) {
        8
    } else if WIT_AIRPORTS.contains(&airport_code) {
        9
    } else {
        7
    };
    FixedOffset::east_opt(hours * HOUR).unwrap()
}

/// Returns the UTC offset for an IANA zone name carried in a provider
/// payload. Unknown names fall back to UTC.
pub fn offset_for_zone(zone: &str) -> FixedOffset {
    let hours = match zone {
        "Asia/Jakarta" => 7,
        "Asia/Makassar" => 8,
        "Asia/Jayapura" => 9,
        _ => 0,
    };
    FixedOffset::east_opt(hours * HOUR).unwrap()
}

/// Resolves an IATA airport code to its city name, falling back to the code
/// itself when unknown.
pub fn city_name(airport_code: &str) -> String {
    let city = match airport_code {
        "CGK" => "Jakarta",
        "DPS" => "Denpasar",
        "SUB" => "Surabaya",
        "KNO" => "Medan",
        "PLM" => "Palembang",
        "PDG" => "Padang",
        "BTJ" => "Banda Aceh",
        "PKU" => "Pekanbaru",
        "BDO" => "Bandung",
        "SRG" => "Semarang",
        "JOG" => "Yogyakarta",
        "UPG" => "Makassar",
        "BPN" => "Balikpapan",
        "LOP" => "Lombok",
        "BDJ" => "Banjarmasin",
        "SOC" => "Solo",
        "PKY" => "Palangkaraya",
        "MDC" => "Manado",
        "DJJ" => "Jayapura",
        "AMQ" => "Ambon",
        "TIM" => "Timika",
        "SRR" => "Sorong",
        other => return other.to_string(),
    };
    city.to_string()
}

/// Formats minutes as "4h 20m" (or "2h" / "45m" when a part is zero).
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 && mins > 0 {
        format!("{hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{mins}m")
    }
}

/// Extracts the airline IATA prefix from a flight number: the leading
/// letters up to the first digit ("QZ7250" -> "QZ"). Empty when the flight
/// number is shorter than two characters.
pub fn extract_airline_code(flight_number: &str) -> String {
    if flight_number.len() < 2 {
        return String::new();
    }
    match flight_number.find(|c: char| c.is_ascii_digit()) {
        Some(idx) => flight_number[..idx].to_string(),
        None => flight_number.to_string(),
    }
}
