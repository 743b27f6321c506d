#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billing::billing_service().await
}
