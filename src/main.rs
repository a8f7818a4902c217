use anyhow::Context;
use jarvis::{
    AppState, JarvisConfig,
    api::routes::create_router,
    cli::{Cli, Commands, output::Output},
    utils::toml_config::{LogFormat, ProviderConfig},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        None | Some(Commands::Serve) => serve(config, &output).await,
        Some(Commands::Ask { message, agent }) => ask(config, &message, &agent, &output).await,
        Some(Commands::Agents) => list_agents(config, &output).await,
        Some(Commands::Config { validate }) => show_config(&config, validate, &output),
    }
}

/// Missing files fall back to defaults so the server runs with env vars alone
fn load_config(cli: &Cli) -> anyhow::Result<JarvisConfig> {
    if cli.config.exists() {
        JarvisConfig::parse_file(&cli.config)
            .with_context(|| format!("Invalid configuration file {}", cli.config.display()))
    } else {
        Ok(JarvisConfig::default())
    }
}

fn init_tracing(config: &JarvisConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "jarvis={0},jarvis_server={0},tower_http={0}",
            default_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_state(config: JarvisConfig) -> anyhow::Result<AppState> {
    config.validate().context("Invalid configuration")?;
    AppState::from_config(config)
        .await
        .context("Failed to initialize agents")
}

async fn serve(config: JarvisConfig, output: &Output) -> anyhow::Result<()> {
    output.banner();

    for warning in config.validate_with_warnings()? {
        output.warning(&warning.message);
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host/port")?;
    let cors_allow_any = config.server.cors_allow_any;
    let rate_limit = config.rate_limit.clone();

    let state = build_state(config).await?;
    output.success(&format!("{} agents registered", state.registry.len()));

    let mut app = create_router(state).layer(TraceLayer::new_for_http());

    if cors_allow_any {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    if rate_limit.enabled {
        let governor = GovernorConfigBuilder::default()
            .per_second(rate_limit.cooldown_secs)
            .burst_size(rate_limit.burst_size)
            .finish()
            .context("Invalid rate limit configuration")?;
        app = app.layer(GovernorLayer::new(Arc::new(governor)));
        output.info(&format!(
            "Rate limit: {} request(s) per {}s per client",
            rate_limit.burst_size, rate_limit.cooldown_secs
        ));
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    output.success(&format!("Listening on http://{}", addr));
    tracing::info!(%addr, "Server started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

async fn ask(
    config: JarvisConfig,
    message: &str,
    agent: &str,
    output: &Output,
) -> anyhow::Result<()> {
    let state = build_state(config).await?;

    let reply = if agent == "auto" {
        state.orchestrator.process(message).await?
    } else {
        state.orchestrator.chat_direct(message, agent).await?
    };

    output.reply(&reply.agent_used, &reply.response);
    Ok(())
}

async fn list_agents(config: JarvisConfig, output: &Output) -> anyhow::Result<()> {
    let state = build_state(config).await?;

    output.header("Agents");
    output.table_header(&["Key", "Kind", "Description"]);
    for agent in state.registry.iter() {
        let kind = serde_json::to_value(agent.kind())?;
        output.table_row(&[
            agent.key(),
            kind.as_str().unwrap_or_default(),
            agent.description(),
        ]);
    }
    output.hint(&format!(
        "Planner: '{}'. Use `ask --agent <key>` to bypass it.",
        state.registry.planner_key()
    ));

    Ok(())
}

fn show_config(config: &JarvisConfig, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.header("Server");
    output.kv("address", &format!("{}:{}", config.server.host, config.server.port));
    output.kv("log level", &config.server.log_level);
    output.kv(
        "rate limit",
        &if config.rate_limit.enabled {
            format!(
                "{} per {}s",
                config.rate_limit.burst_size, config.rate_limit.cooldown_secs
            )
        } else {
            "disabled".to_string()
        },
    );

    output.header("Language model");
    match &config.llm {
        ProviderConfig::OpenAI {
            api_base,
            model,
            api_key_env,
            ..
        } => {
            output.kv("provider", "openai-compatible");
            output.kv("endpoint", api_base);
            output.kv("model", model);
            output.kv("key env", api_key_env);
        }
        ProviderConfig::Ollama { base_url, model } => {
            output.kv("provider", "ollama");
            output.kv("endpoint", base_url);
            output.kv("model", model);
        }
    }

    output.header("Search");
    output.kv("timeout", &format!("{}s", config.search.timeout_secs));
    output.kv("instant answers", &config.search.instant_answer_url);
    output.kv("encyclopedia", &config.search.encyclopedia_api_url);

    if validate {
        output.header("Validation");
        match config.validate_with_warnings() {
            Ok(warnings) => {
                output.success("Configuration is valid");
                for warning in warnings {
                    output.warning(&warning.message);
                }
            }
            Err(e) => {
                output.error(&e.to_string());
                anyhow::bail!("Configuration validation failed");
            }
        }
    }

    Ok(())
}
