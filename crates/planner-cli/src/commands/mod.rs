//! Command handlers. Each module turns parsed arguments into calls on the
//! core services and renders the outcome.

pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod init;
pub mod setup_help;
pub mod template;
pub mod verify;

use tracing::{debug, instrument, warn};

use planner_adapters::{
    CredentialResolver, CredentialSources, EnvSnapshot, ResolvedCredentials, TrelloClient,
};
use planner_core::{
    application::{Interrupt, Retrying, TrelloApi},
    domain::Member,
    error::PlannerError,
};

use crate::{cli::CredentialArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Client used by every networked command.
pub type Api = Retrying<TrelloClient>;

/// A client whose credentials Trello has accepted.
pub struct Session {
    pub api: Api,
    pub member: Member,
    pub resolved: ResolvedCredentials,
}

/// Resolve credentials, build the retrying client, and confirm the
/// credentials with `GET /members/me` before anything is changed.
///
/// Retry waits end early once `interrupt` is raised.
#[instrument(skip_all)]
pub fn connect(
    args: &CredentialArgs,
    config: &AppConfig,
    output: &OutputManager,
    interrupt: &Interrupt,
) -> CliResult<Session> {
    let env = EnvSnapshot::capture();
    let sources = CredentialSources {
        api_key: args.api_key.clone(),
        token: args.token.clone(),
        env_file: args.env_file.clone(),
    };
    let resolved = CredentialResolver::new(&env).resolve(&sources)?;
    for warning in &resolved.warnings {
        output.warning(warning)?;
    }
    resolved
        .credentials
        .validate_format()
        .map_err(PlannerError::from)?;
    debug!(
        api_key = %resolved.api_key_origin,
        token = %resolved.token_origin,
        "Credentials resolved"
    );

    let client = TrelloClient::new(resolved.credentials.clone(), &config.client_config())?;
    let api = Retrying::new(client, config.retry_policy()).with_interrupt(interrupt.clone());

    let member = api.verify_credentials()?;
    debug!(member = %member.username, "Credentials accepted");

    Ok(Session {
        api,
        member,
        resolved,
    })
}

/// Raise `interrupt` on Ctrl-C. The services check it between API calls.
pub fn interrupt_on_ctrl_c() -> Interrupt {
    let interrupt = Interrupt::new();
    let handle = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || handle.raise()) {
        warn!("Could not install the Ctrl-C handler: {e}");
    }
    interrupt
}
