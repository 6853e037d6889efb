#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quizflow_backend::run().await
}
