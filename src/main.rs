use anyhow::Context;
use boxmatch::adapters::source_from_config;
use boxmatch::app::report;
use boxmatch::config::Command;
use boxmatch::core::ConfigProvider;
use boxmatch::utils::error::{BoxmatchError, ErrorSeverity};
use boxmatch::utils::{logger, validation::Validate};
use boxmatch::{CatalogLoader, CliConfig, Session, Shell};
use clap::Parser;
use std::io::Write;

fn exit_code(e: &BoxmatchError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: BoxmatchError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    // input mistakes still fail a one-shot command
    std::process::exit(exit_code(&e).max(1));
}

async fn run(command: Command, session: Session) -> boxmatch::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Shell => {
            let stdin = std::io::stdin();
            let mut shell = Shell::new(session);
            shell.run(stdin.lock(), &mut out).await?;
        }
        Command::View => {
            let catalog = session.catalog().await?;
            writeln!(out, "{}", report::render_catalog(catalog))?;
            writeln!(out, "{}", report::render_packages(session.registry()))?;
            writeln!(
                out,
                "{}",
                report::render_audit(catalog, &session.audit().await?)
            )?;
        }
        Command::Audit { json } => {
            let audit = session.audit().await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&audit)?)?;
            } else {
                let catalog = session.catalog().await?;
                writeln!(out, "{}", report::render_audit(catalog, &audit))?;
            }
        }
        Command::Packages => {
            writeln!(out, "{}", report::render_packages(session.registry()))?;
        }
        Command::Recommend(args) => {
            let recommendation = session.recommend(&args.code, args.quantity).await?;
            writeln!(out, "{}", report::render_recommendation(&recommendation))?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            let path = cli.config.as_deref().unwrap_or("<defaults>");
            return Err(e).with_context(|| format!("Failed to load config '{}'", path));
        }
    };

    if config.logging.json {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting boxmatch");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let source = source_from_config(&config).unwrap_or_else(|e| fail(e));
    let loader = CatalogLoader::new(source, config.catalog_format().clone());
    let session = Session::new(loader);

    if let Err(e) = run(cli.command.unwrap_or(Command::Shell), session).await {
        fail(e);
    }

    Ok(())
}
