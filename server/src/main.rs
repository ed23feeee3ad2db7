#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = todo_server::config::parse();
    todo_server::logging::init(&config.log_level);
    todo_server::app::run(config).await
}
