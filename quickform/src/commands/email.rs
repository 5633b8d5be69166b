use anyhow::ensure;
use clap::Subcommand;
use quickform_config::Config;
use quickform_email_contracts::{DispatchOutcome, EmailDispatchService};
use quickform_models::submission::Submission;

use crate::environment::Provider;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a registration email for a made-up registrant, without storing it
    Test {
        /// Email address of the made-up registrant, used as reply-to address
        email: String,
        /// Name of the made-up registrant
        #[arg(long, default_value = "Test")]
        name: String,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { email, name } => test(config, email, name).await,
        }
    }
}

async fn test(config: Config, email: String, name: String) -> anyhow::Result<()> {
    let email_dispatch = Provider::new(&config)?.email_dispatch();
    ensure!(email_dispatch.is_enabled(), "EmailJS is not configured");

    let submission = Submission {
        name,
        email,
        phone: "+229 00 00 00 00 00".into(),
        message: "Email deliverability seems to be working!".into(),
        ..Default::default()
    };

    let outcome = email_dispatch.dispatch(&submission).await?;
    ensure!(outcome == DispatchOutcome::Sent, "No email has been sent");

    println!("Email sent");
    Ok(())
}
