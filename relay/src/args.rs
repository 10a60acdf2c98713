use std::path::PathBuf;

use clap::Parser;

/// Voice relay for speech recognition, chat, and speech synthesis
#[derive(Debug, Parser)]
#[command(name = "relay", about = "Relay browser audio and chat to managed speech and model APIs")]
pub struct Args {
    /// Path to configuration file; the environment is used when it does not exist
    #[arg(short, long, default_value = "relay.toml", env = "RELAY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "RELAY_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
