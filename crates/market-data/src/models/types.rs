/// `(timestamp in unix milliseconds, value)` pair as sent by the upstream
pub type PricePoint = (i64, f64);
