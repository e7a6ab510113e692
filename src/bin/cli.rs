use miette::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    seedsync::cli::run().await
}
