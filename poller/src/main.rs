mod api;
mod app;
mod clock;
mod poller;
mod sink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
