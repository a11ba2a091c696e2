//! Terminal entry point: headless smoke flow over the controllers.

use terminal::core::config::AppConfig;
use terminal::App;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let _log_guard = terminal::logging::init(&config);

    tracing::info!(api = %config.api_base_url, "Starting merchant terminal");

    let mut app = App::new(config);

    let installed = app.connector.installed_wallets();
    tracing::info!(?installed, "Detected wallets");

    if app.connector.auto_reconnect().await {
        if let Some(address) = app.connector.state().address() {
            println!("Session restored for {}", shared::utils::format_address(address, 4, 4));
        }
    } else {
        println!("No wallet session; connect a wallet to manage your networks.");
    }

    match app.merchant.load_networks().await {
        Ok(()) => {
            println!("Networks: {}", app.merchant.networks().len());
            for network in app.merchant.networks() {
                println!("  [{}] {}", network.id, network.name);
            }
        }
        Err(e) => eprintln!("Failed to load networks: {}", e),
    }

    let reachable = app.payments.probe_server().await;
    println!(
        "Payment server: {}",
        if reachable { "online" } else { "offline (local QR fallback active)" }
    );
}
