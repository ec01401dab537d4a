//! `trello-career-planner template export`.

use std::path::Path;

use tracing::info;

use planner_adapters::{builtin_template, template_to_toml};

use crate::{
    cli::TemplateCommands,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: TemplateCommands, output: &OutputManager) -> CliResult<()> {
    match cmd {
        TemplateCommands::Export {
            output: path,
            force,
        } => {
            let rendered = template_to_toml(&builtin_template())?;
            match path {
                Some(path) => {
                    write_template(&path, &rendered, force)?;
                    output.success(&format!("Template written to {}", path.display()))?;
                }
                None => console::Term::stdout().write_str(&rendered)?,
            }
        }
    }
    Ok(())
}

fn write_template(path: &Path, rendered: &str, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::FileExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, rendered)
        .with_cli_context(|| format!("Failed to write template to '{}'", path.display()))?;
    info!(path = %path.display(), "Template exported");
    Ok(())
}
