#[tokio::main]
async fn main() -> anyhow::Result<()> {
  songbook_lib::run().await
}
