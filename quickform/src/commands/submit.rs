use anyhow::{bail, Context};
use clap::Args;
use quickform_config::Config;
use quickform_core_form_contracts::FormFeatureService;
use quickform_models::submission::SubmissionField;

use crate::environment::Provider;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name of the registrant
    #[arg(long)]
    name: String,
    /// Email address of the registrant
    #[arg(long)]
    email: String,
    /// Phone number of the registrant
    #[arg(long)]
    phone: String,
    /// Optional message for the organizers
    #[arg(long, default_value = "")]
    message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let form = Provider::new(&config)?.form_feature();

        for (field, value) in [
            (SubmissionField::Name, self.name),
            (SubmissionField::Email, self.email),
            (SubmissionField::Phone, self.phone),
            (SubmissionField::Message, self.message),
        ] {
            form.change_field(field, value);
        }

        let draft = form.state().draft;
        draft.validate().context("Invalid registration")?;

        let notification = form.submit(draft).await?;
        if !notification.is_success() {
            bail!(notification.message);
        }

        println!("{}", notification.message);
        Ok(())
    }
}
