use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_tracker::config::ClientConfig;
use course_tracker::gateway::HttpCourseGateway;
use course_tracker::navigation::Navigator;
use course_tracker::session::{StaticIdentity, UserContext};
use course_tracker::shell::Shell;
use course_tracker::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_tracker=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::new_from_env()?;
    info!("using backend at {}", config.backend_url);

    let gateway = Arc::new(HttpCourseGateway::new(&config)?);
    let identity = StaticIdentity::new(config.user_id.clone());
    let user = UserContext::acquire(&identity);

    let (navigator, mut navigation) = Navigator::channel();
    let mut shell = Shell::new(gateway, user, navigator, config.redirect_delay);
    shell.start().await;

    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    terminal.run(&mut shell, &mut navigation).await?;

    info!("bye");
    Ok(())
}
