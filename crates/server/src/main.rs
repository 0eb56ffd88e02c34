#[tokio::main]
async fn main() -> anyhow::Result<()> {
    avethics_server::start().await
}
