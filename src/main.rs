#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gb_desktop::bootstrap::run_app().await
}
