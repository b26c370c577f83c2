//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor que atiende múltiples conexiones simultáneas usando threads.
//! Cada conexión se procesa en su propio thread y se cierra tras un solo
//! intercambio.
//!
//! ## Ciclo de vida
//!
//! ```text
//! Server::bind → run (bloqueante)        → ShutdownHandle::stop
//!              → start (thread de fondo) → RunningServer::stop
//! ```
//!
//! Los threads de conexión solo comparten el router y el directorio base,
//! ambos de solo lectura.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;

use super::connection;
use crate::config::Config;
use crate::handlers;
use crate::router::{RouteContext, Router};

/// Errores de arranque del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Server I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Servidor HTTP/1.1 con el listener ya abierto
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Arc<Router>,
    ctx: Arc<RouteContext>,
    running: Arc<AtomicBool>,
}

impl Server {
    /// Valida la configuración y abre el listener
    ///
    /// Con `port = 0` el sistema elige un puerto libre; usar
    /// [`Server::local_addr`] para conocerlo.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::Config)?;

        let address = config.address();
        let listener = TcpListener::bind(&address)
            .map_err(|source| ServerError::Bind { address, source })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            router: Arc::new(handlers::default_router()),
            ctx: Arc::new(RouteContext::new(&config.directory)),
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Reemplaza el router por defecto
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = Arc::new(router);
        self
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle para detener el loop desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            running: Arc::clone(&self.running),
            wake_addr: wake_address(self.local_addr),
        }
    }

    /// Loop de aceptación (bloqueante)
    ///
    /// Retorna después de que se pidió el shutdown. Las conexiones en curso
    /// terminan por su cuenta.
    pub fn run(&self) {
        log::info!("Servidor escuchando en {}", self.local_addr);
        log::info!("Modo concurrente: un thread por conexión");

        for stream in self.listener.incoming() {
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => log::error!("Error al aceptar conexión: {}", e),
            }
        }

        log::info!("Servidor detenido");
    }

    /// Ejecuta el loop en un thread de fondo
    pub fn start(self) -> Result<RunningServer, ServerError> {
        let handle = self.shutdown_handle();
        let local_addr = self.local_addr;

        let thread = thread::Builder::new()
            .name("accept-loop".to_string())
            .spawn(move || self.run())?;

        Ok(RunningServer {
            handle,
            local_addr,
            thread: Some(thread),
        })
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let ctx = Arc::clone(&self.ctx);

        let spawned = thread::Builder::new()
            .name("connection".to_string())
            .spawn(move || {
                if let Err(e) = connection::handle_tcp(stream, &router, &ctx) {
                    log::warn!("Error en conexión: {}", e);
                }
            });

        if let Err(e) = spawned {
            log::error!("No se pudo crear el thread de conexión: {}", e);
        }
    }
}

/// Detiene un [`Server`] en ejecución
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Pide el shutdown y despierta el `accept` bloqueado
    ///
    /// Llamarlo más de una vez no tiene efecto.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            // La conexión solo sirve para desbloquear accept()
            if let Err(e) = TcpStream::connect(self.wake_addr) {
                log::warn!("No se pudo despertar el listener: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Servidor corriendo en un thread de fondo
///
/// Al hacer drop también se detiene.
pub struct RunningServer {
    handle: ShutdownHandle,
    local_addr: SocketAddr,
    thread: Option<JoinHandle<()>>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    /// Detiene el loop y espera a que termine
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.handle.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("El thread de aceptación terminó con panic");
            }
        }
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Dirección a la que conectarse para despertar el listener
///
/// Un listener en 0.0.0.0 / :: se alcanza por loopback.
fn wake_address(local: SocketAddr) -> SocketAddr {
    let ip = match local.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local.port())
}
