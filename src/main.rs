use calorie_serve::core::ConfigProvider;
use calorie_serve::utils::error::{ErrorSeverity, PredictError};
use calorie_serve::utils::{logger, validation::Validate};
use calorie_serve::{load_artifacts, AppState, CliConfig, PredictionHandler};
use clap::Parser;

fn exit_code(e: &PredictError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(stage: &str, e: PredictError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            // 日誌尚未初始化，直接輸出
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting calorie-serve");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        fail("Configuration validation", e);
    }

    // 模型與 scaler 缺一不可，載入失敗即結束程序
    let context = match load_artifacts(&config.artifact_paths()) {
        Ok(context) => context,
        Err(e) => fail("Artifact loading", e),
    };

    let state = AppState::new(PredictionHandler::new(context));
    let bind = config.bind_address();
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind, e))?;
    let addr = listener.local_addr()?;

    tracing::info!("✅ Listening on http://{}", addr);
    println!("Listening on http://{}", addr);

    calorie_serve::adapters::server::run(listener, state).await?;
    Ok(())
}
