use appointments_lib::config::ServerConfig;

#[tokio::main]
async fn main() {
    appointments_lib::init_tracing();

    let result = match ServerConfig::from_env() {
        Ok(config) => appointments_lib::run(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
