use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    keyflash::cli::run().await
}
