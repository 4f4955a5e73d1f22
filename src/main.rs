/*
 * Responsibility
 * - tokio runtime entrypoint
 * - call app::run() (no logic here)
 */
use anyhow::Result;

use demo_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
