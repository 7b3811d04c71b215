//! ready2intern: résumé fit reports from the command line

use clap::Parser;
use log::{debug, error, info, warn};
use ready2intern::api::types::{AnalysisRequest, UploadResponse};
use ready2intern::api::ApiClient;
use ready2intern::cli::{self, Cli, Commands, ConfigAction, ReportArgs, RoleArgs};
use ready2intern::config::{Config, API_URL_ENV};
use ready2intern::error::{AppError, Result};
use ready2intern::input::manager::{InputManager, ResumeSource};
use ready2intern::input::validation::{
    format_char_counter, format_file_size, AnalyzeGate, RoleDescriptionStatus,
};
use ready2intern::output::formatter::{resolve_save_path, save_report_to_file};
use ready2intern::output::{ReportGenerator, ResultsReport};
use ready2intern::progress;
use ready2intern::view::dashboard::{analysis_step, ANALYSIS_STEPS};
use ready2intern::view::{DashboardForm, ResultsPage, ResultsState, Route};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env(std::env::var(API_URL_ENV).ok());
            Ok(config)
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Health => {
            let client = ApiClient::from_config(&config.api)?;
            let health = client.health().await?;
            let icon = if health.is_healthy() { "✅" } else { "⚠️ " };
            println!("{} {} is {}", icon, health.service, health.status);
            if let Some(ts) = health.parsed_timestamp() {
                println!("🕒 Server time: {}", ts.format("%Y-%m-%d %H:%M:%S"));
            }
            println!("🔗 {}", client.base_url());
        }

        Commands::Companies => {
            let client = ApiClient::from_config(&config.api)?;
            let companies = client.companies().await?;
            println!("🏢 Target Companies\n");
            for company in &companies {
                println!("  • {} ({})", company.display_name, company.id);
                if !company.description.is_empty() {
                    println!("    {}", company.description);
                }
            }
        }

        Commands::Upload { files } => {
            let client = ApiClient::from_config(&config.api)?;
            let source = if files.len() > 1 {
                ResumeSource::Dropped
            } else {
                ResumeSource::Browsed
            };
            let uploaded = upload(&client, &files, source).await?;
            println!("\n💡 Next: ready2intern analyze --session {} --company <id> --role \"...\"", uploaded.session_id);
        }

        Commands::Analyze { session, company, role } => {
            let client = ApiClient::from_config(&config.api)?;
            let role_description = read_role(&role)?;
            AnalyzeGate {
                session_id: Some(session.as_str()),
                company: Some(company.as_str()),
                role_description: &role_description,
            }
            .check()?;

            let request = AnalysisRequest {
                session_id: session,
                company,
                role_description: role_description.trim().to_string(),
            };
            let response = with_analysis_spinner(client.analyze(&request)).await?;
            println!("✅ {}", if response.message.is_empty() { &response.status } else { &response.message });
            println!("➡️  {}", Route::results(&response.session_id));
        }

        Commands::Results { session, report } => {
            let client = ApiClient::from_config(&config.api)?;
            show_results(&client, &config, session.as_deref(), &report).await?;
        }

        Commands::Open { route, report } => match Route::parse(&route) {
            Route::Dashboard => {
                println!("🏠 Dashboard");
                println!("  1. Upload your résumé:   ready2intern upload <FILE>");
                println!("  2. Pick a company:       ready2intern companies");
                println!("  3. Describe the role and analyze:");
                println!("     ready2intern analyze --session <id> --company <id> --role-file role.txt");
                println!("  Or all at once:          ready2intern run --resume <FILE> --company <id> --role-file role.txt");
            }
            Route::Results { session_id } => {
                let client = ApiClient::from_config(&config.api)?;
                show_results(&client, &config, session_id.as_deref(), &report).await?;
            }
            Route::NotFound(path) => {
                return Err(AppError::InvalidInput(format!("No page at {}", path)));
            }
        },

        Commands::Run {
            resume,
            company,
            role,
            report,
        } => {
            let client = ApiClient::from_config(&config.api)?;
            let role_description = read_role(&role)?;

            let mut form = DashboardForm::new(client.companies().await?);
            if let Some(message) = RoleDescriptionStatus::assess(&role_description).message() {
                println!("📝 {} ({})", message, format_char_counter(&role_description));
            }
            form.prefill(&company, &role_description)?;

            let source = if resume.len() > 1 {
                ResumeSource::Dropped
            } else {
                ResumeSource::Browsed
            };
            match upload(&client, &resume, source).await {
                Ok(uploaded) => form.upload_succeeded(uploaded),
                Err(e) => {
                    form.upload_failed(&e);
                    return Err(e);
                }
            }

            let request = form.begin_analysis()?;
            let outcome = with_analysis_spinner(client.analyze(&request)).await;
            match form.finish_analysis(outcome) {
                Some(Route::Results { session_id }) => {
                    show_results(&client, &config, session_id.as_deref(), &report).await?;
                }
                Some(other) => debug!("Unexpected route after analysis: {}", other),
                None => {
                    let message = form.error().unwrap_or_default().to_string();
                    return Err(AppError::Api { status: 0, message });
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("API Base URL: {}", config.api.base_url);
                println!("Request Timeout: {}s", config.api.timeout_secs);
                println!("Output Format: {:?}", config.output.format);
                println!("Detailed Output: {}", config.output.detailed);
                println!("Colors: {}", config.output.color_output);
                println!(
                    "Polling: every {}s, up to {} attempts",
                    config.polling.interval_secs, config.polling.max_attempts
                );
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn read_role(role: &RoleArgs) -> Result<String> {
    Ok(role.read()?)
}

async fn upload(client: &ApiClient, files: &[std::path::PathBuf], source: ResumeSource) -> Result<UploadResponse> {
    let manager = InputManager::new().with_source(source);
    let resume = manager.load_first(files).await?;
    println!("📄 {} ({})", resume.file_name, format_file_size(resume.size()));

    let bar = progress::upload_bar(&resume.file_name);
    let result = client.upload_resume(&resume, progress::bar_callback(&bar)).await;
    match &result {
        Ok(uploaded) => {
            bar.finish_with_message(format!("Uploaded {}", uploaded.filename));
            println!("✅ Session: {}", uploaded.session_id);
        }
        Err(_) => bar.abandon_with_message("Upload failed"),
    }
    result
}

async fn with_analysis_spinner<F, T>(call: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let spinner = progress::analysis_spinner();
    tokio::pin!(call);

    let mut ticker = tokio::time::interval(Duration::from_millis(1500));
    let mut tick = 0usize;
    let outcome = loop {
        tokio::select! {
            result = &mut call => break result,
            _ = ticker.tick() => {
                spinner.set_message(analysis_step(tick));
                tick += 1;
            }
        }
    };

    match &outcome {
        Ok(_) => spinner.finish_with_message(ANALYSIS_STEPS[ANALYSIS_STEPS.len() - 1]),
        Err(_) => spinner.abandon_with_message("Analysis failed"),
    }
    outcome
}

async fn show_results(
    client: &ApiClient,
    config: &Config,
    session_id: Option<&str>,
    args: &ReportArgs,
) -> Result<()> {
    let mut page = ResultsPage::new();
    let max_attempts = if args.wait { config.polling.max_attempts.max(1) } else { 1 };

    let mut attempt = 0;
    loop {
        let Some(ticket) = page.open(session_id) else {
            return Err(AppError::MissingSession);
        };
        attempt += 1;

        let outcome = tokio::select! {
            outcome = client.fetch_results(session_id.unwrap_or_default()) => outcome,
            _ = tokio::signal::ctrl_c() => {
                page.close();
                warn!("Interrupted while loading results");
                return Ok(());
            }
        };
        page.complete(ticket, outcome);

        let still_partial = matches!(page.state(), ResultsState::Success(r) if r.is_partial());
        if !still_partial || attempt >= max_attempts {
            break;
        }
        info!(
            "Results still partial (attempt {}/{}); retrying in {}s",
            attempt, max_attempts, config.polling.interval_secs
        );
        tokio::time::sleep(Duration::from_secs(config.polling.interval_secs)).await;
    }

    let results = match page.into_state() {
        ResultsState::Success(results) => results,
        ResultsState::Error(message) => return Err(AppError::Api { status: 0, message }),
        ResultsState::Loading => return Ok(()),
    };

    let format = match &args.output {
        Some(name) => cli::parse_output_format(name).map_err(AppError::InvalidInput)?,
        None => config.output.format,
    };
    let generator = ReportGenerator::with_options(
        config.output.color_output,
        args.detailed || config.output.detailed,
        true,
        true,
        true,
    );
    let report = ResultsReport::build(&results, &args.filter()).with_backend_url(client.base_url());
    let content = generator.generate_report(&report, &format)?;

    let save_target = args.save.clone().or_else(|| config.output.save_dir.clone());
    match save_target {
        Some(target) => {
            let path = resolve_save_path(&target, &format, &results.session_id);
            save_report_to_file(&content, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
