use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub sessions: SessionConfig,
    pub lottery: LotteryConfig,
    pub payee: PayeeConfig,
}

/// How long an untouched page instance is kept, and how often idle ones are swept.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_secs: u64,
    pub sweep_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            idle_secs: 3600,
            sweep_secs: 60,
        }
    }
}

impl SessionConfig {
    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }

    pub fn sweep_every(&self) -> Duration {
        Duration::from_secs(self.sweep_secs)
    }
}

/// Quick-pick parameters and receipt text for the lottery ticket page.
#[derive(Debug, Clone)]
pub struct LotteryConfig {
    pub pick_count: u32,
    pub max_number: u32,
    pub ticket_price: f64,
    pub draw_name: String,
}

/// Static payee details used to build the unlock payment link and QR request.
#[derive(Debug, Clone)]
pub struct PayeeConfig {
    pub address: String,
    pub name: String,
    pub unlock_price: f64,
    pub currency: String,
    pub qr_endpoint: String,
    pub qr_size: u32,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        LotteryConfig {
            pick_count: 6,
            max_number: 49,
            ticket_price: 2.0,
            draw_name: "DAILY QUICK PICK".to_string(),
        }
    }
}

impl Default for PayeeConfig {
    fn default() -> Self {
        PayeeConfig {
            address: "kiosk@upi".to_string(),
            name: "Kiosk Colours".to_string(),
            unlock_price: 10.0,
            currency: "INR".to_string(),
            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            qr_size: 250,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            sessions: SessionConfig::default(),
            lottery: LotteryConfig::default(),
            payee: PayeeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let lottery = LotteryConfig {
            pick_count: parse_env("LOTTERY_PICK_COUNT", defaults.lottery.pick_count)?,
            max_number: parse_env("LOTTERY_MAX_NUMBER", defaults.lottery.max_number)?,
            ticket_price: parse_env("LOTTERY_TICKET_PRICE", defaults.lottery.ticket_price)?,
            draw_name: string_env("LOTTERY_DRAW_NAME", defaults.lottery.draw_name),
        };
        ensure!(
            lottery.pick_count <= lottery.max_number,
            "LOTTERY_PICK_COUNT ({}) must not exceed LOTTERY_MAX_NUMBER ({})",
            lottery.pick_count,
            lottery.max_number
        );

        let sessions = SessionConfig {
            idle_secs: parse_env("SESSION_IDLE_SECS", defaults.sessions.idle_secs)?,
            sweep_secs: parse_env("SESSION_SWEEP_SECS", defaults.sessions.sweep_secs)?,
        };
        ensure!(
            sessions.idle_secs > 0 && sessions.sweep_secs > 0,
            "SESSION_IDLE_SECS and SESSION_SWEEP_SECS must be positive"
        );

        let payee = PayeeConfig {
            address: string_env("UPI_PAYEE_ADDRESS", defaults.payee.address),
            name: string_env("UPI_PAYEE_NAME", defaults.payee.name),
            unlock_price: parse_env("UNLOCK_PRICE", defaults.payee.unlock_price)?,
            currency: string_env("UNLOCK_CURRENCY", defaults.payee.currency),
            qr_endpoint: string_env("QR_ENDPOINT", defaults.payee.qr_endpoint),
            qr_size: parse_env("QR_SIZE", defaults.payee.qr_size)?,
        };
        url::Url::parse(&payee.qr_endpoint)
            .with_context(|| format!("QR_ENDPOINT '{}' is not a valid URL", payee.qr_endpoint))?;

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: string_env("RUST_LOG", defaults.rust_log),
            sessions,
            lottery,
            payee,
        })
    }
}

fn string_env(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_allow_a_quick_pick() {
        let config = Config::default();
        assert!(config.lottery.pick_count <= config.lottery.max_number);
        assert_eq!(config.port, 8080);
        assert!(url::Url::parse(&config.payee.qr_endpoint).is_ok());
    }

    #[test]
    fn test_session_durations() {
        let sessions = SessionConfig::default();
        assert_eq!(sessions.idle(), Duration::from_secs(3600));
        assert!(sessions.sweep_every() < sessions.idle());
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u32 = parse_env("KIOSK_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_reads_and_rejects() {
        std::env::set_var("KIOSK_TEST_QR_SIZE", " 300 ");
        assert_eq!(parse_env::<u32>("KIOSK_TEST_QR_SIZE", 250).unwrap(), 300);

        std::env::set_var("KIOSK_TEST_UNLOCK_PRICE", "ten");
        let err = parse_env::<f64>("KIOSK_TEST_UNLOCK_PRICE", 10.0).unwrap_err();
        assert!(err.to_string().contains("KIOSK_TEST_UNLOCK_PRICE"));
    }
}
