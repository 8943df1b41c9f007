//! 健康检查模块
//!
//! 提供 /health、/ready 与 /metrics 端点

use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use catalog_adapter_postgres::check_connection;
use serde::Serialize;
use sqlx::PgPool;

use crate::metrics::MetricsRecorder;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 运维端点共享状态
#[derive(Clone)]
pub struct OperationalState {
    pool: PgPool,
    metrics: Arc<MetricsRecorder>,
}

impl OperationalState {
    pub fn new(pool: PgPool, metrics: Arc<MetricsRecorder>) -> Self {
        Self { pool, metrics }
    }
}

/// 运维路由
pub fn operational_routes(state: OperationalState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/metrics", get(render_metrics))
        .with_state(state)
}

/// 存活检查：只说明进程在运行
async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// 就绪检查：依赖全部可用才返回 200
async fn readiness(State(state): State<OperationalState>) -> impl IntoResponse {
    let mut status = HealthStatus::healthy();

    match check_connection(&state.pool).await {
        Ok(()) => status.add_check(ComponentHealth::healthy("postgres")),
        Err(e) => status.add_check(ComponentHealth::unhealthy("postgres", e.to_string())),
    }

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn render_metrics(State(state): State<OperationalState>) -> String {
    state.metrics.render()
}
