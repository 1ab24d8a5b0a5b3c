use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::config::config_manager::ConfigManager;
use crate::config::constants::idle_duration;
use crate::enums::commands::Commands;
use crate::enums::request_status::RequestStatus;
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::logger::board_printer::{BoardPrinter, InputLabels};
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::spec_reader::SpecReader;
use crate::structs::board_timings::BoardTimings;
use crate::structs::config::config::Config;
use crate::traits::comparison_service::ComparisonService;
use crate::ui::board_server::BoardServer;
use crate::ui::board_session::BoardSession;
use crate::ui::session_manager::SessionManager;

pub struct CommandRunner {
    start_time: Option<Instant>,
    config_path: Option<PathBuf>,
}

impl CommandRunner {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            start_time: None,
            config_path,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> SpecBoardResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Validate => self.validate_command().await,
            Commands::Compare { old, new, json, no_animation, detail } => {
                self.compare_command(old, new, json, no_animation, detail).await
            }
            Commands::Serve { port, no_browser } => self.serve_command(port, no_browser).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::debug!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> SpecBoardResult<()> {
        log::info!("🚀 Initializing specboard configuration...");

        let path = ConfigManager::create_sample_config(self.config_path.as_deref())?;
        log::info!("✅ Configuration file created at {}", path.display());
        log::info!("🔧 Run 'specboard validate' to check your configuration.");
        Ok(())
    }

    fn load_config(&self) -> SpecBoardResult<Config> {
        let config = ConfigManager::load(self.config_path.as_deref()).map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'specboard init' to create a configuration file.");
            e
        })?;

        ConfigManager::validate_config(&config).map_err(|problems| SpecBoardError::MultipleErrors {
            errors: problems
                .iter()
                .map(|problem| SpecBoardError::config_error(problem, None, None))
                .collect(),
            context: "configuration validation".to_string(),
        })?;

        Ok(config)
    }

    async fn validate_command(&self) -> SpecBoardResult<()> {
        log::info!("🔍 Validating specboard configuration...");

        let config = self.load_config()?;
        log::info!("✅ Configuration is valid");
        log::info!("🤖 Comparison engine: {} ({})", config.ai.provider, config.ai.model);

        match ConfigManager::resolve_api_key(&config.ai) {
            Ok(_) => log::info!("🔑 {} is set", config.ai.api_key_env),
            Err(_) => log::warn!("⚠️ {} is not set; compare and serve will refuse to start", config.ai.api_key_env),
        }

        Ok(())
    }

    fn comparison_service(config: &Config) -> SpecBoardResult<Arc<dyn ComparisonService>> {
        let api_key = ConfigManager::resolve_api_key(&config.ai)?;
        let provider = GeminiProvider::new(api_key, &config.ai)
            .map_err(|e| SpecBoardError::system_error("create comparison client", &e.to_string()))?;
        log::debug!("Using comparison model {}", provider.model());
        Ok(Arc::new(provider))
    }

    async fn compare_command(
        &self,
        old: Option<PathBuf>,
        new: Option<PathBuf>,
        json: bool,
        no_animation: bool,
        detail: Option<usize>,
    ) -> SpecBoardResult<()> {
        let config = self.load_config()?;
        let service = Self::comparison_service(&config)?;

        let old_spec = SpecReader::read(old.as_deref()).await?.unwrap_or_default();
        let new_spec = SpecReader::read(new.as_deref()).await?.unwrap_or_default();

        let timings = if no_animation || json {
            BoardTimings { placeholder_rows: config.board.placeholder_rows, ..BoardTimings::instant() }
        } else {
            BoardTimings::from(&config.board)
        };
        let mut session = BoardSession::new(service, timings);

        if json {
            return Self::print_json(&mut session, &old_spec, &new_spec).await;
        }

        let labels = InputLabels {
            source: SpecReader::size_label(&old_spec),
            target: SpecReader::size_label(&new_spec),
        };
        let frame_interval = Duration::from_millis(config.board.frame_interval_ms);

        let submitted = session.submit(&old_spec, &new_spec, Instant::now());
        if let Err(e @ SpecBoardError::RequestInFlight { .. }) = submitted {
            return Err(e);
        }

        if no_animation {
            let mut spinner = AnimatedLogger::new("🛫 Comparing specifications".to_string());
            spinner.start();
            session.settle().await;
            spinner.stop("Comparison finished").await;
        }

        Self::drive_board(&mut session, &labels, frame_interval, !no_animation).await?;

        if let Some(row) = detail {
            let available = session.snapshot().selectable_rows();
            if row == 0 || row > available {
                return Err(SpecBoardError::InvalidSelection { row, available });
            }
            session.select(row - 1, Instant::now());
            Self::drive_board(&mut session, &labels, frame_interval, !no_animation).await?;
        }

        BoardPrinter::draw(&BoardPrinter::render(&session.snapshot(), &labels, BoardPrinter::terminal_width()))?;

        match session.status() {
            RequestStatus::Failed(message) => Err(SpecBoardError::comparison_failed(message)),
            _ => Ok(()),
        }
    }

    /// Redraws the board every frame until the request has landed and every
    /// animation has finished.
    async fn drive_board(
        session: &mut BoardSession,
        labels: &InputLabels,
        frame_interval: Duration,
        draw_frames: bool,
    ) -> SpecBoardResult<()> {
        let mut interval = tokio::time::interval(frame_interval);
        let mut first_frame = true;

        loop {
            interval.tick().await;
            let now = Instant::now();
            let changed = session.refresh(now) || std::mem::take(&mut first_frame);

            if draw_frames && changed {
                let frame = BoardPrinter::render(&session.snapshot(), labels, BoardPrinter::terminal_width());
                BoardPrinter::draw(&frame)?;
            }

            if session.is_settled() {
                return Ok(());
            }
        }
    }

    async fn print_json(session: &mut BoardSession, old_spec: &str, new_spec: &str) -> SpecBoardResult<()> {
        session.submit(old_spec, new_spec, Instant::now())?;

        let mut spinner = AnimatedLogger::new("🛫 Comparing specifications".to_string());
        spinner.start();

        match session.settle().await {
            RequestStatus::Succeeded(result) => {
                spinner.stop(&format!("{} change(s) detected", result.changes.len())).await;
                println!("{}", serde_json::to_string_pretty(&**result)?);
                Ok(())
            }
            RequestStatus::Failed(message) => {
                let message = message.clone();
                spinner.error(&message).await;
                Err(SpecBoardError::comparison_failed(&message))
            }
            other => {
                let label = other.label();
                spinner.error(label).await;
                Err(SpecBoardError::system_error("compare", &format!("request ended in state {}", label)))
            }
        }
    }

    async fn serve_command(&self, port: Option<u16>, no_browser: bool) -> SpecBoardResult<()> {
        log::info!("🌐 Starting specboard server...");

        let config = self.load_config()?;
        let service = Self::comparison_service(&config)?;

        let session_manager = SessionManager::new(
            service,
            BoardTimings::from(&config.board),
            idle_duration(config.server.session_idle_minutes),
        );
        let mut server = BoardServer::new(session_manager);
        let port = server.start(port.unwrap_or(config.server.port)).await?;

        let url = format!("http://localhost:{}", port);
        log::info!("🚀 Board available at: {}", url);

        if config.server.open_browser && !no_browser {
            if let Err(e) = webbrowser::open(&url) {
                log::warn!("⚠️ Could not open browser: {}", e);
            }
        }

        log::info!("⏹️ Press Ctrl+C to stop the server");
        tokio::signal::ctrl_c().await?;

        server.shutdown().await
    }
}
