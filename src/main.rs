//! Wiring & DI. Entry point: load config, build the generation adapter, inject into
//! the service and handlers, run UI. No business logic here.

use dotenv::dotenv;
use notes_ai::adapters::ai::{GeminiAdapter, MockAiAdapter};
use notes_ai::adapters::api::AnalysisHandlers;
use notes_ai::adapters::ui::tui::TuiInputPort;
use notes_ai::ports::{GenerationPort, InputPort};
use notes_ai::shared::config::AppConfig;
use notes_ai::usecases::AnalysisService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    // Resolved once; adapters get explicit values and never read the env again.
    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Generation adapter ---
    let ai: Arc<dyn GenerationPort> = if cfg.use_mock() {
        warn!("NOTES_AI_MOCK set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    } else {
        if cfg.is_ai_configured() {
            info!(
                model = %cfg.gemini_model_or_default(),
                url = %cfg.gemini_api_url_or_default(),
                "Gemini adapter enabled"
            );
        } else {
            warn!("GEMINI_API_KEY is not set; summarize requests will report the service as not configured");
        }
        Arc::new(GeminiAdapter::from_config(&cfg))
    };

    // --- Services ---
    let analysis_service = Arc::new(AnalysisService::new(ai));
    notes_ai::adapters::ui::init_ui(analysis_service.model());
    let handlers = Arc::new(AnalysisHandlers::new(Arc::clone(&analysis_service)));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(handlers));

    // --- Run (main menu -> Summarize / Insights / Exit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
