use anyhow::{Context, Result};
use clap::Parser;
use rml_rtmp_ingest::connection::{
    ConnectionConfig, ConnectionError, ConnectionEvent, ServerConnection,
};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rtmp-ingest-server")]
#[command(about = "Accepts RTMP publishers and logs the messages they send")]
struct Cli {
    #[arg(long, default_value = "0.0.0.0:1935", help = "Address to listen on")]
    listen: SocketAddr,

    #[arg(long, default_value_t = 30, help = "Seconds a read may block (0 disables)")]
    read_timeout_secs: u64,

    #[arg(long, default_value_t = 30, help = "Seconds a write may block (0 disables)")]
    write_timeout_secs: u64,

    #[arg(long, help = "Largest chunk size a peer may request")]
    max_chunk_size: Option<u32>,

    #[arg(
        long,
        default_value = "rtmp_ingest_server=info,rml_rtmp_ingest=info",
        help = "Log filter, used when RUST_LOG is not set"
    )]
    log_filter: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_filter))
        .context("invalid log filter")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ConnectionConfig::new();
    config.read_timeout = to_timeout(cli.read_timeout_secs);
    config.write_timeout = to_timeout(cli.write_timeout_secs);
    if let Some(size) = cli.max_chunk_size {
        config.max_chunk_size_limit = size;
    }

    let listener = TcpListener::bind(cli.listen)
        .with_context(|| format!("failed to listen on {}", cli.listen))?;

    info!(address = %cli.listen, "Listening for connections");

    let mut next_connection_id: u64 = 0;
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(error) => {
                warn!(error = %error, "Failed to accept connection");
                continue;
            }
        };

        next_connection_id += 1;
        let connection_id = next_connection_id;
        let config = config.clone();
        let spawned = thread::Builder::new()
            .name(format!("rtmp-connection-{}", connection_id))
            .spawn(move || handle_connection(connection_id, stream, config));

        if let Err(error) = spawned {
            error!(connection_id, error = %error, "Failed to spawn connection thread");
        }
    }

    Ok(())
}

fn handle_connection(connection_id: u64, stream: TcpStream, config: ConnectionConfig) {
    let peer = stream
        .peer_addr()
        .map(|x| x.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    info!(connection_id, peer = %peer, "Connection started");

    if let Err(error) = config.apply_timeouts(&stream) {
        warn!(connection_id, error = %error, "Failed to set socket timeouts");
        return;
    }

    let mut connection = ServerConnection::new(stream, config);
    match run(connection_id, &mut connection) {
        Ok(()) => info!(connection_id, "Connection closed"),
        Err(error) if error.is_disconnect() => info!(connection_id, "Peer disconnected"),
        Err(error) if error.is_timeout() => warn!(connection_id, "Connection timed out"),
        Err(error) => error!(connection_id, error = %error, "Connection failed"),
    }
}

fn run(
    connection_id: u64,
    connection: &mut ServerConnection<TcpStream>,
) -> Result<(), ConnectionError> {
    connection.perform_handshake()?;
    info!(connection_id, peer_epoch = connection.peer_epoch(), "Handshake completed");

    loop {
        match connection.next_event()? {
            ConnectionEvent::MessageReceived(message) => debug!(
                connection_id,
                csid = message.chunk_stream_id,
                message_stream_id = message.message_stream_id,
                type_id = message.type_id,
                timestamp = message.timestamp.value,
                length = message.data.len(),
                "Message received"
            ),

            ConnectionEvent::ChunkSizeChanged {
                previous_size,
                new_size,
            } => info!(connection_id, previous_size, new_size, "Chunk size changed"),

            ConnectionEvent::UnsupportedControlMessage(message) => {
                debug!(connection_id, control_message = ?message, "Control message ignored")
            }
        }
    }
}

fn to_timeout(seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        None
    } else {
        Some(Duration::from_secs(seconds))
    }
}
