//! 运行时初始化

use std::net::SocketAddr;

use docsearch_config::AppConfig;
use docsearch_errors::{AppError, AppResult};
use docsearch_telemetry::{init_metrics_listener, init_tracing, init_tracing_json};
use tracing::info;

/// 初始化日志与指标
///
/// 生产环境或配置了 `telemetry.json` 时输出 JSON 日志。
/// 配置了 `telemetry.metrics_addr` 时启动 Prometheus 抓取端点，需要在 tokio 运行时内调用
pub fn init_runtime(config: &AppConfig) -> AppResult<()> {
    let telemetry = &config.telemetry;

    // 先校验配置，再安装全局日志订阅者
    let metrics_addr = telemetry
        .metrics_addr
        .as_deref()
        .map(|addr| {
            addr.parse::<SocketAddr>().map_err(|e| {
                AppError::validation(format!("Invalid metrics address {}: {}", addr, e))
            })
        })
        .transpose()?;

    let tracing = if config.is_production() || telemetry.json {
        init_tracing_json(&telemetry.log_level)
    } else {
        init_tracing(&telemetry.log_level)
    };
    tracing.map_err(|e| AppError::internal(e.to_string()))?;

    if let Some(addr) = metrics_addr {
        init_metrics_listener(addr).map_err(|e| AppError::internal(e.to_string()))?;
        info!(%addr, "Prometheus exporter listening");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
    Ok(())
}
