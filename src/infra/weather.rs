use crate::domain::WeatherProbe;
use std::time::Duration;

const WEATHER_URL: &str = "https://wttr.in/?format=3";

/// One-line weather report from wttr.in. Runs on a worker thread with a
/// global timeout so a stalled fetch only holds the busy flag briefly.
pub struct HttpWeatherProbe {
    timeout: Duration,
}

impl HttpWeatherProbe {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(4),
        }
    }
}

impl Default for HttpWeatherProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProbe for HttpWeatherProbe {
    fn observe(&self) -> Result<String, String> {
        let agent = make_agent(self.timeout);
        let mut body = agent
            .get(WEATHER_URL)
            .header(
                "User-Agent",
                &format!("wingterm/{}", env!("CARGO_PKG_VERSION")),
            )
            .call()
            .map_err(|error| error.to_string())?
            .into_body();

        let bytes = body
            .read_to_vec()
            .map_err(|error| error.to_string())?;
        let text = String::from_utf8_lossy(&bytes);
        let line = text.lines().next().unwrap_or("").trim().to_string();
        if line.is_empty() {
            return Err("empty weather response".to_string());
        }
        Ok(line)
    }
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}
