//! MFTP server entry point.

use clap::Parser;
use log::info;

use mftp::{Server, ServerConfig};

/// MFTP file transfer server.
#[derive(Parser)]
#[command(name = "mftpd", version, about)]
struct Args {
    /// TCP port for the control channel.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mftpd: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config, args.port).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("mftpd: cannot listen on port {}: {}", args.port, e);
            std::process::exit(1);
        }
    };

    info!("Serving on port {}", args.port);
    server.run().await;
}
