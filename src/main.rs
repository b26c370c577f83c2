//! # minihttp - Entry Point
//! src/main.rs
//!
//! Punto de entrada: parsea la configuración, inicializa el logging,
//! abre el puerto y corre el loop de aceptación.
//!
//! El proceso corre hasta que se lo mata; el ciclo start/stop programático
//! está en `Server::start` y `RunningServer::stop`.

use minihttp::config::Config;
use minihttp::logger;
use minihttp::server::Server;

fn main() {
    let config = Config::new();

    if let Err(e) = logger::init_logger(&config) {
        eprintln!("Error al inicializar el logging: {}", e);
        std::process::exit(1);
    }

    log::info!("minihttp v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            log::error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    server.run();
}
