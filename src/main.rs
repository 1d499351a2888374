use agentic_planner::config::toml_config::TomlConfig;
use agentic_planner::core::export::{export_session, ExportFormat};
use agentic_planner::core::flashcards::generate_flashcards;
use agentic_planner::core::render::{render_flashcards, render_progress, render_session};
use agentic_planner::utils::error::{ErrorSeverity, PlannerError};
use agentic_planner::utils::{logger, validation, validation::Validate};
use agentic_planner::{
    CliConfig, Command, LocalStorage, PlanRequest, Planner, PlannerSession, Result,
    SessionStore,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入配置
    let mut config = match TomlConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if config.log_json() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("CLI args: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }
}

fn exit_code(e: &PlannerError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> Result<()> {
    let store = SessionStore::new(LocalStorage::new(config.state_dir().to_string()));

    match &cli.command {
        Command::Plan {
            goal,
            weeks,
            mentor,
            offline,
        } => {
            let request = PlanRequest {
                goal: goal.clone(),
                weeks: *weeks,
                mentor_style: *mentor,
            };
            request.validate()?;

            let planner = Planner::from_config(config, *offline);
            if planner.has_remote() {
                println!("⏳ Generating plan with AI...");
            }
            let outcome = planner.generate(&request).await?;

            let session = PlannerSession::new(request, outcome);
            store.save(&session).await?;

            print!("{}", render_session(&session));
            println!("✅ Plan generated! Session saved in {}", config.state_dir());
        }
        Command::Show => {
            let session = store.load().await?;
            print!("{}", render_session(&session));
        }
        Command::Check { week, task } | Command::Uncheck { week, task } => {
            let done = matches!(cli.command, Command::Check { .. });
            let mut session = store.load().await?;
            let text = session.set_task_done(*week, *task, done)?;
            store.save(&session).await?;

            println!("[{}] Week {}: {}", if done { "x" } else { " " }, week, text);
            print!("{}", render_progress(&session.progress()));
        }
        Command::Week { week } => {
            let mut session = store.load().await?;
            session.set_current_week(*week)?;
            store.save(&session).await?;
            println!("📅 Current week set to Week {}", week);
        }
        Command::Flashcards { week } => {
            let session = store.load().await?;
            let week = week.unwrap_or(session.current_week);
            let cards = generate_flashcards(&session.plan, week);
            print!("{}", render_flashcards(week, &cards));
        }
        Command::Recompress { remaining_weeks } => {
            validation::validate_range("remaining_weeks", *remaining_weeks, 1, 52)?;
            let mut session = store.load().await?;
            let before = session.plan.weeks.len();
            session.recompress(*remaining_weeks);
            store.save(&session).await?;

            tracing::info!("🔄 Recompressed {} weeks into {}", before, session.plan.weeks.len());
            print!("{}", render_session(&session));
        }
        Command::Export { pdf, json } => {
            let session = store.load().await?;

            let written: Vec<String> = if pdf.is_none() && json.is_none() {
                export_session(
                    store.storage(),
                    &session,
                    &[
                        (ExportFormat::Pdf, config.pdf_filename().to_string()),
                        (ExportFormat::Json, config.json_filename().to_string()),
                    ],
                )
                .await?
                .into_iter()
                .map(|p| store.storage().full_path(&p).display().to_string())
                .collect()
            } else {
                let mut targets = Vec::new();
                if let Some(path) = pdf {
                    targets.push((ExportFormat::Pdf, path.clone()));
                }
                if let Some(path) = json {
                    targets.push((ExportFormat::Json, path.clone()));
                }
                export_session(&LocalStorage::new(".".to_string()), &session, &targets).await?
            };

            for path in written {
                println!("📁 Saved {}", path);
            }
        }
    }

    Ok(())
}
