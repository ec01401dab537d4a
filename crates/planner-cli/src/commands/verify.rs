//! `trello-career-planner verify`: confirm the credentials with Trello.

use planner_core::application::Interrupt;

use crate::{
    cli::VerifyArgs, commands::connect, config::AppConfig, error::CliResult,
    output::OutputManager,
};

pub fn execute(args: VerifyArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let session = connect(&args.credentials, config, output, &Interrupt::default())?;
    let name = session.member.display_name();

    if output.is_json() {
        output.json(&serde_json::json!({
            "valid": true,
            "member": {
                "id": session.member.id,
                "username": session.member.username,
                "display_name": name,
            },
            "api_key_source": session.resolved.api_key_origin.to_string(),
            "token_source": session.resolved.token_origin.to_string(),
        }))?;
        return Ok(());
    }

    output.success(&format!("Credentials valid! Authenticated as: {name}"))?;
    output.print(&format!(
        "  API key from: {}",
        session.resolved.api_key_origin
    ))?;
    output.print(&format!("  Token from:   {}", session.resolved.token_origin))?;
    Ok(())
}
