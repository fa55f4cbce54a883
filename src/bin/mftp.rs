//! MFTP interactive client entry point.

use clap::Parser;

use mftp::client::repl;
use mftp::client::session::ClientSession;

/// MFTP interactive file transfer client.
#[derive(Parser)]
#[command(name = "mftp", version, about)]
struct Args {
    /// Server control port.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Server hostname or IP address.
    hostname: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut session = match ClientSession::connect(&args.hostname, args.port).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("mftp: cannot connect to {}:{}: {}", args.hostname, args.port, e);
            std::process::exit(1);
        }
    };

    println!("Connected to server at {}", args.hostname);

    if let Err(e) = repl::run(&mut session).await {
        eprintln!("mftp: {}", e);
        std::process::exit(1);
    }
}
