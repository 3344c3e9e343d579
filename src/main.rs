use std::error::Error;

use api::telemetry;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the environment.
    dotenvy::dotenv().ok();

    telemetry::init()?;

    if let Err(err) = api::start().await {
        error!(error = %err, "pangyo-qna stopped with an error");
        return Err(err.into());
    }

    Ok(())
}
