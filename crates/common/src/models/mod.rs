pub mod response;
pub mod signal;

pub use response::RelayResponse;
pub use signal::{SignalRequest, TIMEFRAMES, TradeSignal};
