//! vhand Mock Peer
//!
//! Pretends to be the renderer: connects to a controller, logs every
//! command it receives, and acknowledges each one.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vhand::network::MockPeer;
use vhand::protocol::{decode, Command};

/// vhand Mock Peer
#[derive(Parser, Debug)]
#[command(name = "vhand-mock-peer")]
#[command(about = "Stand-in renderer that logs and acknowledges commands")]
#[command(version)]
struct Args {
    /// Controller address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:23068")]
    connect: SocketAddr,

    /// Byte sent back for every command
    #[arg(short, long, default_value = "1")]
    ack: u8,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vhand=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("Mock peer connecting to {}", args.connect);

    let peer = MockPeer::spawn(args.connect, args.ack);

    for message in peer.messages().iter() {
        let tokens = decode(&message);
        match Command::parse(&tokens) {
            Some(command) => tracing::info!("{:?} ({})", command, tokens),
            None => tracing::info!("Unrecognized {:?} ({:02x?})", tokens, message),
        }
    }

    match peer.join() {
        Ok(count) => tracing::info!("Controller hung up after {} commands", count),
        Err(e) => {
            tracing::error!("Mock peer failed: {}", e);
            std::process::exit(1);
        }
    }
}
