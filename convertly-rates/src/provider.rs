//! Rate providers

use std::time::Duration;
use async_trait::async_trait;
use convertly_core::Category;
use tracing::{debug, info, warn};
use crate::{RateError, RateTable};

/// Source of rate tables for rate-based categories.
///
/// Each call returns a fresh snapshot; callers replace, never merge.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<RateTable, RateError>;
}

/// Units of currency per 1 USD
pub static MOCK_CURRENCY_RATES: [(&str, f64); 20] = [
    ("USD", 1.0), ("EUR", 0.92), ("JPY", 157.0), ("GBP", 0.79), ("AUD", 1.50),
    ("CAD", 1.37), ("CHF", 0.90), ("CNY", 7.25), ("HKD", 7.82), ("NZD", 1.63),
    ("SEK", 10.45), ("KRW", 1370.0), ("SGD", 1.35), ("NOK", 10.50), ("MXN", 16.70),
    ("INR", 83.50), ("RUB", 90.0), ("ZAR", 18.50), ("BRL", 5.10), ("TRY", 32.20),
];

/// USD per 1 coin; USD itself is the reference entry
pub static MOCK_CRYPTO_RATES: [(&str, f64); 14] = [
    ("BTC", 68000.0), ("ETH", 3800.0), ("USDT", 1.0), ("BNB", 600.0), ("SOL", 170.0),
    ("XRP", 0.52), ("ADA", 0.45), ("DOGE", 0.16), ("SHIB", 0.000025),
    ("AVAX", 35.0), ("DOT", 7.50), ("LTC", 85.0), ("LINK", 17.0),
    ("USD", 1.0),
];

/// Fixed rate tables with an optional simulated latency
#[derive(Debug, Clone, Default)]
pub struct MockRateProvider {
    delay: Duration,
    outage: Option<String>,
}

impl MockRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: wait this long before answering each fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Builder: fail every fetch as if the rate source were unreachable
    pub fn with_outage(mut self, reason: impl Into<String>) -> Self {
        self.outage = Some(reason.into());
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The table for a category, without the simulated latency
    pub fn table(category: Category) -> Result<RateTable, RateError> {
        match category {
            Category::Currency => RateTable::from_pairs(category, "USD", &MOCK_CURRENCY_RATES),
            Category::Crypto => RateTable::from_pairs(category, "USD", &MOCK_CRYPTO_RATES),
            other => Err(RateError::NotRateBased(other)),
        }
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    async fn fetch(&self, category: Category) -> Result<RateTable, RateError> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating rate fetch latency");
            tokio::time::sleep(self.delay).await;
        }
        if let Some(reason) = &self.outage {
            warn!(%category, reason = %reason, "rate fetch failed");
            return Err(RateError::Unavailable(reason.clone()));
        }
        let table = Self::table(category)?;
        info!(%category, entries = table.len(), "rates loaded");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convertly_core::BaseRelation;

    #[tokio::test]
    async fn test_fetch_currency() {
        let provider = MockRateProvider::new();
        let table = provider.fetch(Category::Currency).await.unwrap();
        assert_eq!(table.len(), 20);
        assert_eq!(table.base(), "USD");
        assert_eq!(table.relation(), BaseRelation::UnitsPerBase);
        assert_eq!(table.get("INR"), Some(83.5));
    }

    #[tokio::test]
    async fn test_fetch_crypto() {
        let provider = MockRateProvider::new();
        let table = provider.fetch(Category::Crypto).await.unwrap();
        assert_eq!(table.len(), 14);
        assert_eq!(table.get("USD"), Some(1.0));
        assert_eq!(table.convert(1.0, "BTC", "USD").unwrap(), 68000.0);
    }

    #[tokio::test]
    async fn test_fetch_non_rate_category() {
        let provider = MockRateProvider::new();
        let err = provider.fetch(Category::Length).await.unwrap_err();
        assert_eq!(err, RateError::NotRateBased(Category::Length));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_honored() {
        let provider = MockRateProvider::new().with_delay(Duration::from_millis(500));
        assert_eq!(provider.delay(), Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        provider.fetch(Category::Currency).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_outage_is_unavailable() {
        let provider = MockRateProvider::new().with_outage("upstream timeout");
        let err = provider.fetch(Category::Crypto).await.unwrap_err();
        assert_eq!(err, RateError::Unavailable("upstream timeout".to_string()));
        assert_eq!(err.to_string(), "failed to load exchange rates: upstream timeout");
    }

    #[test]
    fn test_mock_tables_validate() {
        for category in [Category::Currency, Category::Crypto] {
            let table = MockRateProvider::table(category).unwrap();
            for (_, rate) in table.sorted() {
                assert!(rate > 0.0);
            }
        }
    }
}
