//! Catalog Service 入口

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    catalog_bootstrap::run("config", catalog_service::build_router).await
}
