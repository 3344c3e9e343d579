use serde::Serialize;

/// Response payload for /api/temp. Both shapes are sent with HTTP 200.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TempResponse {
    Reading { temperature: f64, unit: &'static str },
    Failure { error: String },
}

impl TempResponse {
    pub fn celsius(temperature: f64) -> Self {
        Self::Reading {
            temperature,
            unit: "°C",
        }
    }
}
