use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use quickform_testing::{emailjs, postgrest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::EmailJs {
            host,
            port,
            service_id,
            template_id,
            public_key,
        } => emailjs::start_server(host, port, service_id, template_id, public_key).await?,
        Command::Postgrest {
            host,
            port,
            api_key,
            table,
        } => postgrest::start_server(host, port, api_key, table).await?,
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the EmailJS testing server
    #[clap(name = "emailjs")]
    EmailJs {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        #[arg(long, default_value = "service_test")]
        service_id: String,
        #[arg(long, default_value = "template_test")]
        template_id: String,
        #[arg(long, default_value = "public-key")]
        public_key: String,
    },
    /// Start the PostgREST (Supabase) testing server
    Postgrest {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8002")]
        port: u16,
        #[arg(long, default_value = "anon-key")]
        api_key: String,
        #[arg(long, default_value = "inscriptions")]
        table: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
