#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = tutora_rust::run().await {
        eprintln!("tutora-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
