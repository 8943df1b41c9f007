//! catalog-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志、数据库连接、健康检查与 metrics 的公共启动逻辑

mod health;
mod infrastructure;
mod metrics;
mod retry;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use metrics::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;
