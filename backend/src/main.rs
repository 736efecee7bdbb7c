use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(error) = crates::observability::init_observability("backend") {
        eprintln!("Failed to initialise logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = backend::run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}
