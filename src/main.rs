//! bam-chat command-line client
//!
//! Sends chat turns to the BAM API using a TOML configuration file.

use bam_chat::{
    chat::BamChatModel,
    cli::{Cli, Command, generate_config_template},
    config::Config,
    metrics::Metrics,
    service::AiService,
    telemetry,
};
use clap::{CommandFactory, Parser};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { output }) => {
            let template = generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template)?;
                    eprintln!("Configuration template written to {}", path);
                }
                None => print!("{}", template),
            }
        }
        Some(Command::Chat {
            text,
            system,
            user,
            model,
            metrics,
        }) => {
            let config = Config::from_file(&cli.config)?;
            telemetry::init(&config.observability.log_level);

            let bam_config = match &model {
                Some(name) => config.named_config(name).ok_or_else(|| {
                    bam_chat::error::AppError::Config(format!(
                        "no [named.{}] configuration in {}",
                        name, cli.config
                    ))
                })?,
                None => config.default_config(),
            };

            tracing::info!(
                model_id = %bam_config.chat_model().model_id(),
                base_url = %bam_config.base_url(),
                "Starting chat"
            );

            let registry = Arc::new(Metrics::new()?);
            let chat_model = BamChatModel::from_config(bam_config)?.with_metrics(registry.clone());

            let mut builder = AiService::builder(Arc::new(chat_model)).user_message(user);
            if let Some(system) = system {
                builder = builder.system_message(system);
            }
            let service = builder.build();

            let answer = service.chat(&text).await?;
            println!("{}", answer);

            if metrics {
                eprint!("{}", registry.render()?);
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
