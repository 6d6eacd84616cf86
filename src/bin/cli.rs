//! vhand CLI
//!
//! Opens the control channel (optionally launching the renderer) and issues
//! commands, either one from the command line or one per line from stdin.

use std::io::BufRead;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vhand::config::DEFAULT_BACKLOG;
use vhand::{CommandChannel, Config};

/// vhand CLI
#[derive(Parser, Debug)]
#[command(name = "vhand-cli")]
#[command(about = "Drive a virtual prosthetic limb renderer")]
#[command(version)]
struct Args {
    /// Renderer executable to launch before listening
    #[arg(short, long)]
    app: Option<PathBuf>,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:23068")]
    listen: String,

    /// Listen backlog
    #[arg(short, long, default_value_t = DEFAULT_BACKLOG)]
    backlog: u32,

    /// Give up waiting for the renderer after this many ms (0 = never)
    #[arg(long, default_value = "0")]
    accept_timeout_ms: u64,

    /// Give up waiting for an ack after this many ms (0 = never)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Command to send; reads commands from stdin when omitted
    #[command(subcommand)]
    command: Option<Op>,
}

/// One line of a command script, parsed with the same grammar
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ScriptLine {
    #[command(subcommand)]
    command: Op,
}

#[derive(Subcommand, Debug)]
enum Op {
    /// Initialize an arm model
    InitArm,

    /// Initialize a leg model
    InitLeg,

    /// Switch between right and left limb
    SwitchSide,

    /// Switch between above and below elbow/knee
    SwitchPosition,

    /// Look through a camera
    Camera {
        /// Camera index (0-4)
        camera: u32,
    },

    /// Switch the TAC test on
    TacOn,

    /// Switch the TAC test off
    TacOff,

    /// Reset the limb pose
    Reset {
        /// Reset the TAC limb instead
        #[arg(long)]
        tac: bool,
    },

    /// Move a degree of freedom
    Move {
        /// DOF index (1-9)
        dof: u32,

        /// 0 = flexion, 1 = extension
        direction: u32,

        /// Distance numerator
        numerator: u32,

        /// Distance denominator
        #[arg(default_value = "1")]
        denominator: u32,

        /// Move the TAC limb
        #[arg(long)]
        tac: bool,
    },

    /// Send a raw token string
    Raw {
        tokens: String,
    },
}

impl Op {
    fn run(self, channel: &CommandChannel) -> vhand::Result<u8> {
        match self {
            Op::InitArm => channel.init_arm(),
            Op::InitLeg => channel.init_leg(),
            Op::SwitchSide => channel.switch_side(),
            Op::SwitchPosition => channel.switch_position(),
            Op::Camera { camera } => channel.switch_camera(camera),
            Op::TacOn => channel.activate_tac(),
            Op::TacOff => channel.deactivate_tac(),
            Op::Reset { tac } => channel.reset_position(tac),
            Op::Move {
                dof,
                direction,
                numerator,
                denominator,
                tac,
            } => channel.move_limb(dof, direction, numerator, denominator, tac),
            Op::Raw { tokens } => channel.send_command(&tokens),
        }
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vhand=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("vhand v{}", vhand::VERSION);
    tracing::info!("Waiting for renderer on {}", args.listen);

    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .backlog(args.backlog)
        .accept_timeout_ms(args.accept_timeout_ms)
        .read_timeout_ms(args.read_timeout_ms);
    if let Some(app) = &args.app {
        builder = builder.app_path(app);
    }
    let config = builder.build();

    let channel = match CommandChannel::open(config) {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!("Failed to open channel: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Some(op) => op.run(&channel).map(|ack| println!("{}", ack)),
        None => run_script(&channel),
    };

    channel.stop();

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Run one command per stdin line; blank lines and `#` comments are skipped
fn run_script(channel: &CommandChannel) -> vhand::Result<()> {
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let op = match ScriptLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {:?}", line, e.kind());
                continue;
            }
        };

        match op.run(channel) {
            Ok(ack) => println!("{} -> {}", line, ack),
            // Range errors never touch the socket, so the link is still usable
            Err(e @ vhand::VhandError::FieldOutOfRange { .. }) => {
                tracing::warn!("Skipping {:?}: {}", line, e)
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
