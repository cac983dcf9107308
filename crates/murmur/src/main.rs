use clap::Parser;
use murmur::prelude::*;
use murmur::DEFAULT_PORT;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "Multi-room long-polling chat server")]
struct Cli {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(short = 'b', long, default_value = "0.0.0.0")]
    host: String,

    /// Number of request-handling workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_directive = if cli.debug { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    let server = ChatServer::builder()
        .bind(&format!("{}:{}", cli.host, cli.port))
        .workers(cli.workers)
        .build()
        .await?;

    tracing::info!(addr = %server.local_addr()?, "serving chat rooms");
    server.run().await?;
    Ok(())
}
