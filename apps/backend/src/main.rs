#[tokio::main]
async fn main() -> anyhow::Result<()> {
    speller_bee_backend::run().await
}
