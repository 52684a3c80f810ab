//! mcp-action: entry point.

use std::io::Read;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;

use mcp_action::config::{resolve_config_path, resolve_options, Overrides};
use mcp_action::transport::{ActionEvent, ActionHandler, LogScope, StdioTransport};
use mcp_action::{CapabilityRegistry, ProtocolHandler};

#[derive(Parser)]
#[command(
    name = "mcp-action",
    about = "Model Context Protocol server for serverless web actions",
    version
)]
struct Cli {
    /// Path to a project options file (JSON).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Server name (overrides the options file).
    #[arg(long, global = true)]
    name: Option<String>,

    /// Server description (overrides the options file).
    #[arg(long, global = true)]
    description: Option<String>,

    /// Author (overrides the options file).
    #[arg(long, global = true)]
    author: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve newline-delimited JSON-RPC over stdio (default).
    Serve,

    /// Serve the action over HTTP on every path.
    #[cfg(feature = "http")]
    ServeHttp {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3100")]
        addr: String,
    },

    /// Run one action event and print the response envelope.
    ///
    /// The event is read from FILE, or from stdin when no file is given.
    Invoke {
        /// Path to an event JSON file.
        #[arg(short, long)]
        event: Option<String>,
    },

    /// Check the project options and print the normalized values.
    Validate,

    /// Print server info and capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   mcp-action completions bash > ~/.local/share/bash-completion/completions/mcp-action
    ///   mcp-action completions zsh > ~/.zfunc/_mcp-action
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch the interactive console.
    Repl,
}

/// `RUST_LOG` wins over `--log-level`.
fn init_tracing(cli_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for one invocation at the event's `LOG_LEVEL`.
fn event_log_scope(level: Level) -> Dispatch {
    Dispatch::new(
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )
}

/// The event's `LOG_LEVEL` applies unless `RUST_LOG` is set.
fn log_scope(rust_log: Option<std::ffi::OsString>) -> Option<LogScope> {
    match rust_log {
        Some(_) => None,
        None => Some(event_log_scope as LogScope),
    }
}

fn read_event(path: Option<&str>) -> anyhow::Result<ActionEvent> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    let event = match &command {
        Commands::Invoke { event } => Some(read_event(event.as_deref())?),
        _ => None,
    };
    init_tracing(&cli.log_level);

    let overrides = Overrides {
        name: cli.name,
        description: cli.description,
        author: cli.author,
    };

    match command {
        Commands::Serve => {
            let options = resolve_options(cli.config.as_deref(), &overrides)?;
            StdioTransport::new(options).run().await?;
        }

        #[cfg(feature = "http")]
        Commands::ServeHttp { addr } => {
            use mcp_action::transport::HttpTransport;

            let options = resolve_options(cli.config.as_deref(), &overrides)?;
            tracing::info!("Serving {} over HTTP", options.normalized_name());
            HttpTransport::new(ActionHandler::new(options))
                .run(&addr)
                .await?;
        }

        Commands::Invoke { .. } => {
            let options = resolve_options(cli.config.as_deref(), &overrides)?;
            let event = event.unwrap_or_default();
            let mut handler = ActionHandler::new(options);
            if let Some(scope) = log_scope(std::env::var_os("RUST_LOG")) {
                handler = handler.with_log_scope(scope);
            }
            let response = handler.handle(event).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Validate => {
            let source = resolve_config_path(cli.config.as_deref())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            match resolve_options(cli.config.as_deref(), &overrides) {
                Ok(options) => {
                    println!("Valid project options: {source}");
                    println!("  Name:        {}", options.normalized_name());
                    println!("  Description: {}", options.description);
                    println!("  Author:      {}", options.author);
                    println!("  Features:    {:?}", options.features);
                    println!("  Examples:    {}", options.include_examples);
                }
                Err(e) => {
                    eprintln!("Invalid project options ({source}): {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Info => {
            let options = resolve_options(cli.config.as_deref(), &overrides)?;
            let handler = ProtocolHandler::from_options(&options);
            let registry: &CapabilityRegistry = handler.registry();
            let info = serde_json::json!({
                "server": handler.config(),
                "protocol_version": mcp_action::types::MCP_VERSION,
                "capabilities": registry.capabilities(),
                "tools": registry.tools.names(),
                "resources": registry.resources.list_resources().iter().map(|r| &r.uri).collect::<Vec<_>>(),
                "prompts": registry.prompts.list_prompts().iter().map(|p| &p.name).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "mcp-action", &mut std::io::stdout());
        }

        Commands::Repl => {
            let options = resolve_options(cli.config.as_deref(), &overrides)?;
            mcp_action::repl::run(options)?;
        }
    }

    Ok(())
}
