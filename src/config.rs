use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Timezone that anchors calendar-day boundaries, independent of where
    /// the server runs or how instants are stored.
    pub reference_timezone: Tz,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        let reference_timezone = std::env::var("REFERENCE_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Madrid".into())
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid REFERENCE_TIMEZONE: {e}"))?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is required")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutritrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutritrack-users".into()),
        };
        Ok(Self {
            database_url,
            reference_timezone,
            jwt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timezone_parses_from_iana_name() {
        let tz = "Europe/Madrid".parse::<Tz>().expect("known zone");
        assert_eq!(tz, chrono_tz::Europe::Madrid);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        assert!("Europe/Nowhere".parse::<Tz>().is_err());
    }
}
