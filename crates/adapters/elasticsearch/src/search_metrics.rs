//! 搜索请求监控

use std::time::Instant;

use metrics::{counter, histogram};

/// 慢请求阈值（毫秒）
pub const SLOW_REQUEST_THRESHOLD_MS: u128 = 500;

/// 搜索请求监控工具
pub struct SearchMetrics;

impl SearchMetrics {
    /// 记录请求（计时）
    pub fn record_request(start: Instant, index: &str, operation: &str) {
        histogram!(
            "search_request_duration_ms",
            "index" => index.to_string(),
            "operation" => operation.to_string()
        )
        .record(start.elapsed().as_millis() as f64);

        counter!(
            "search_requests_total",
            "index" => index.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    /// 记录请求错误
    pub fn record_error(index: &str, operation: &str) {
        counter!(
            "search_errors_total",
            "index" => index.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }
}

/// 请求计时守卫
pub struct RequestTimer {
    start: Instant,
    index: String,
    operation: String,
}

impl RequestTimer {
    pub fn new(index: &str, operation: &str) -> Self {
        Self {
            start: Instant::now(),
            index: index.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) {
        let duration_ms = self.start.elapsed().as_millis();
        SearchMetrics::record_request(self.start, &self.index, &self.operation);

        if duration_ms > SLOW_REQUEST_THRESHOLD_MS {
            tracing::warn!(
                index = %self.index,
                operation = %self.operation,
                duration_ms = %duration_ms,
                "Slow search request detected"
            );
            counter!(
                "search_slow_requests_total",
                "index" => self.index.clone(),
                "operation" => self.operation.clone()
            )
            .increment(1);
        }
    }

    pub fn finish_with_error(self) {
        SearchMetrics::record_request(self.start, &self.index, &self.operation);
        SearchMetrics::record_error(&self.index, &self.operation);
    }

    /// 按结果结束计时
    pub fn observe<T, E>(self, result: &Result<T, E>) {
        if result.is_ok() {
            self.finish();
        } else {
            self.finish_with_error();
        }
    }
}
