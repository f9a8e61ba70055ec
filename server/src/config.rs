pub const DEFAULT_DATA_PATH: &str = "data/municipios.geojson";
pub const DEFAULT_GAME_NAME: &str = "Palpite RS";
pub const SERVER_PORT: u16 = 3000;

/// GeoJSON property holding the municipality display name.
pub const NAME_PROPERTY: &str = "NOME";

pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 3600; // hourly
pub const MAX_SESSIONS: usize = 4096;

pub fn data_path() -> String {
    std::env::var("PALPITE_DATA_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
}

pub fn game_name() -> String {
    std::env::var("PALPITE_GAME_NAME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_GAME_NAME.to_string())
}

pub fn server_port() -> u16 {
    std::env::var("PALPITE_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(SERVER_PORT)
}
