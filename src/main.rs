use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    espkey::cli::run().await
}
