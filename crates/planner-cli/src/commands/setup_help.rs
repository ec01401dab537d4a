//! `trello-career-planner setup-help`: how to obtain and configure credentials.

use crate::{error::CliResult, output::OutputManager};

pub const SETUP_HELP: &str = "\
Trello API Credentials Setup
============================

This tool needs a Trello API key and token.

Step 1: Get your API key
------------------------
1. Go to https://trello.com/app-key
2. Log in to your Trello account if prompted
3. Copy the API key shown on the page

Step 2: Generate a token
------------------------
1. On the same page, click \"Generate a Token\"
2. Authorize the application
3. Copy the token shown

Step 3: Configure credentials
-----------------------------
Option A: Environment variables
    export TRELLO_API_KEY=your_api_key_here
    export TRELLO_TOKEN=your_token_here

Option B: A .env file in the current directory (or pass --env-file FILE)
    TRELLO_API_KEY=your_api_key_here
    TRELLO_TOKEN=your_token_here

Option C: Command-line flags
    trello-career-planner generate --api-key YOUR_KEY --token YOUR_TOKEN

Flags win over environment variables, which win over the .env file.
Check the result with:
    trello-career-planner verify

Security note: never commit your .env file or share your credentials.
Keep the file private (chmod 600 .env).";

/// Printed even with `--quiet`: the help text is the whole point.
pub fn execute(output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&serde_json::json!({ "setup_help": SETUP_HELP }))?;
    } else {
        console::Term::stdout().write_line(SETUP_HELP)?;
    }
    Ok(())
}
