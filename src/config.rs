//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI con respaldo en variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttp --directory /tmp/files --port 4221 --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILES_DIR=/tmp/files HTTP_PORT=4221 ./minihttp
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp")]
#[command(about = "Servidor HTTP/1.1 mínimo: echo, user-agent y archivos estáticos")]
#[command(version)]
pub struct Config {
    /// Directorio base para la ruta /files
    #[arg(long, default_value = ".", env = "FILES_DIR")]
    pub directory: PathBuf,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    // === Logging ===

    /// Nivel de log (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: LevelFilter,

    /// Archivo de log; sin este flag se escribe en stderr
    #[arg(long = "log-file", env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use minihttp::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// El directorio puede no existir todavía (los GET darán 404), pero si
    /// existe debe ser un directorio.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        if self.directory.exists() && !self.directory.is_dir() {
            return Err(format!(
                "Files directory is not a directory: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        log::info!("Dirección:      {}", self.address());
        log::info!("Directorio:     {}", self.directory.display());
        log::info!("Nivel de log:   {}", self.log_level);
        if let Some(file) = &self.log_file {
            log::info!("Archivo de log: {}", file.display());
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            port: 4221,
            host: "0.0.0.0".to_string(),
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}
