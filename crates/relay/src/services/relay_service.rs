use std::sync::Arc;

use common::error::RelayError;
use common::models::{RelayResponse, SignalRequest};
use tracing::{error, info, warn};

use crate::services::telegram_service::Notifier;
use crate::services::template::render_signal;

pub struct SignalRelay {
    notifier: Arc<dyn Notifier>,
}

impl SignalRelay {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub async fn submit_signal(&self, request: SignalRequest) -> Result<RelayResponse, RelayError> {
        let signal = match request.validate() {
            Ok(signal) => signal,
            Err(e) => {
                warn!("Signal rejected: {}", e);
                return Err(e);
            }
        };

        info!(
            "Signal received: {} {} ({}), created at {}",
            signal.pair, signal.timeframe, signal.strategy, signal.created_at
        );

        let text = render_signal(&signal);

        match self.notifier.send_text(&text).await {
            Ok(()) => {
                info!("Signal delivered: {} {}", signal.pair, signal.timeframe);
                Ok(RelayResponse::delivered())
            }
            Err(e) => {
                error!("Failed to deliver signal for {}: {}", signal.pair, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::telegram_service::MockNotifier;
    use serde_json::json;

    fn request() -> SignalRequest {
        serde_json::from_value(json!({
            "pair": "ETH/USDT",
            "timeframe": "4h",
            "strategy": "RSI Oversold/Overbought",
            "entryPrice": "3200",
            "stopLoss": "3100",
            "takeProfit": "3500",
            "notes": ""
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_delivers_rendered_text() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_text()
            .withf(|text| {
                ["ETH/USDT", "4h", "RSI Oversold/Overbought", "3200", "3100", "3500"]
                    .iter()
                    .all(|v| text.contains(v))
            })
            .times(1)
            .returning(|_| Ok(()));

        let relay = SignalRelay::new(Arc::new(notifier));
        let ack = relay.submit_signal(request()).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_invalid_signal_never_reaches_notifier() {
        let mut notifier = MockNotifier::new();
        notifier.expect_send_text().times(0);

        let relay = SignalRelay::new(Arc::new(notifier));
        let mut req = request();
        req.pair = None;

        let err = relay.submit_signal(req).await.unwrap_err();
        assert_eq!(err, RelayError::MissingField("pair"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_text()
            .times(1)
            .returning(|_| Err(RelayError::DeliveryFailed("Forbidden: bot was kicked".into())));

        let relay = SignalRelay::new(Arc::new(notifier));
        let err = relay.submit_signal(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::DeliveryFailed(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_text()
            .times(1)
            .returning(|_| Err(RelayError::TransportError("connection reset".into())));

        let relay = SignalRelay::new(Arc::new(notifier));
        let err = relay.submit_signal(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::TransportError(_)));
    }

    #[tokio::test]
    async fn test_identical_submissions_are_each_delivered() {
        let mut notifier = MockNotifier::new();
        notifier.expect_send_text().times(2).returning(|_| Ok(()));

        let relay = SignalRelay::new(Arc::new(notifier));
        relay.submit_signal(request()).await.unwrap();
        relay.submit_signal(request()).await.unwrap();
    }
}
