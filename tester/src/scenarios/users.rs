//! User lifecycle and invitation suites
//!
//! These steps depend on mail delivery: the receiver account is activated
//! and its password reset through links read from the IMAP mailbox.

use shared::logging::log_suite_start;
use tracing::warn;

use super::Suite;
use crate::error::TesterResult;
use crate::helpers::{accounts, auth, users};
use crate::pollers::{activation_token, EmailMode};
use crate::runtime::ImapMailbox;
use crate::testing::{ensure_some, run_step, SuiteContext};

async fn mail_token(suite: &Suite, mailbox: &ImapMailbox, mode: EmailMode) -> TesterResult<Option<String>> {
    activation_token(mailbox, mode, &suite.email_policy(), &suite.cancel).await
}

pub async fn user_lifecycle(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Adding user, posting email and change password");
    let api = &suite.api;
    let config = &suite.config;
    let mailbox = ImapMailbox::new(config.mailbox.clone());

    run_step("Shall clear unread mail", async {
        mail_token(suite, &mailbox, EmailMode::Clear).await.map(|_| ())
    })
    .await?;

    run_step("Shall add a new user", async {
        users::add_user(api, ctx.user_token()?, &config.receiver.username, &config.receiver.password)
            .await
            .map(|_| ())
    })
    .await?;

    let receiver_token = run_step("Shall activate user with token", async {
        let token = mail_token(suite, &mailbox, EmailMode::Get).await?;
        let token = ensure_some(token, "activation token")?;
        users::activate_user(api, &token).await?;
        auth::login(api, &config.receiver.username, &config.receiver.password).await
    })
    .await?;
    ctx.receiver_token = Some(receiver_token);

    run_step("Shall request change receiver password", async {
        mail_token(suite, &mailbox, EmailMode::Clear).await?;
        users::request_password_change(api, &config.receiver.username)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall update receiver password", async {
        let token = mail_token(suite, &mailbox, EmailMode::Get).await?;
        let token = ensure_some(token, "password reset token")?;
        if let Err(e) = users::update_password(api, &token, &config.receiver_new_password).await {
            warn!(error = %e, "Cannot update receiver password");
        }
        Ok(())
    })
    .await?;

    run_step("Shall change password", async {
        let credentials = config.require_credentials()?;
        users::change_password(
            api,
            ctx.user_token()?,
            &credentials.username,
            &credentials.password,
            &config.user_new_password,
        )
        .await
        .map(|_| ())
    })
    .await
}

/// Ask for another activation mail and grant the receiver admin rights
pub async fn invite(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Invite receiver");
    let api = &suite.api;

    run_step("Shall request activation", async {
        let credentials = suite.config.require_credentials()?;
        if let Err(e) = users::request_user_activation(api, &credentials.username).await {
            warn!(error = %e, "Activation request rejected");
        }
        Ok(())
    })
    .await?;

    let receiver_id = run_step("Shall get id of receiver and change privilege", async {
        let (_, receiver_id) = auth::token_info(api, ctx.receiver_token()?).await?;
        tracing::info!("receiver userId is: {}", receiver_id);
        accounts::change_account_user(api, ctx.user_token()?, ctx.account_id()?, &receiver_id).await?;
        Ok(receiver_id)
    })
    .await?;
    ctx.receiver_id = Some(receiver_id);

    Ok(())
}
