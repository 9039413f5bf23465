//! 商品目录 HTTP 服务入口

use anyhow::Context;
use goods_catalog::{
    app::docs::OPENAPI_PATH, build_router, infrastructure::logger::Logger, load_config,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;
    Logger::init(&config.logging.level);

    info!("启动商品目录服务...");
    info!("使用{}", source);

    let state = AppState::from_config(&config).context("初始化应用状态失败")?;
    let app = build_router(state, &config);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务运行在 http://{}", addr);
    info!("📖 API 文档: http://{}{}", addr, OPENAPI_PATH);
    info!(
        "🖼  上传图片: {} -> {}",
        config.uploads.public_prefix,
        config.uploads.dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭...");
    }
}
