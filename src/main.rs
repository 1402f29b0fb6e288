use clap::{Parser, Subcommand, ValueEnum};
use netaddrs::dns::{GaiResolver, HickoryResolver, Resolve};
use netaddrs::{Context, Logger, NoopLogger, Resolver, TracingLogger};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "netaddrs", version, about = "Look up IP addresses from a DNS name or an executable")]
struct Cli {
    /// No verbose output
    #[arg(short, long)]
    quiet: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// DNS backend used for DNS names
    #[arg(long, value_enum, default_value_t = DnsBackend::System)]
    resolver: DnsBackend,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the IP addresses for "DNS name" or "exec=<executable with optional args>"
    Ip {
        /// DNS name, or exec= followed by a command line
        config: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DnsBackend {
    /// getaddrinfo
    System,
    /// hickory-dns
    Hickory,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
    let logger: &dyn Logger = if cli.quiet { &NoopLogger } else { &TracingLogger };

    let dns: Arc<dyn Resolve> = match cli.resolver {
        DnsBackend::System => Arc::new(GaiResolver::new()),
        DnsBackend::Hickory => Arc::new(HickoryResolver::new()),
    };
    let resolver = Resolver::with_dns(dns);

    let mut ctx = Context::background();
    if let Some(secs) = cli.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }
    let (ctx, cancel) = ctx.with_cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let Command::Ip { config } = cli.command;
    match resolver.ip_addrs(&ctx, &config, logger).await {
        Ok(addrs) => {
            let line: Vec<String> = addrs.iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("netaddrs: {}", err);
            ExitCode::FAILURE
        }
    }
}
