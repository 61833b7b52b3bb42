#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = quizgrade_rust::run().await {
        eprintln!("quizgrade-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
