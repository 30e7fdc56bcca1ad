use ticket_price::core::ModelConfig;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let config = ModelConfig::default();
    if let Err(e) = ticket_price::pipeline::run(&config) {
        tracing::error!("ticket-price failed: {e}");
        std::process::exit(1);
    }
}
