//! Board templates: the built-in career board and TOML template files.
//!
//! A template file is the TOML form of [`BoardTemplate`]; see
//! `planner_core::domain::entities::template` for the format.
//! `template export` writes the built-in board in that form so it can be
//! used as a starting point.

mod builtin;

use std::{fs, path::Path};

use tracing::{debug, instrument};

use planner_core::{
    domain::BoardTemplate,
    error::{PlannerError, PlannerResult},
};

pub use builtin::{BUILTIN_NAME, builtin_template};

/// Read, parse, and validate a template file.
#[instrument]
pub fn load_template(path: &Path) -> PlannerResult<BoardTemplate> {
    let file_error = |reason: String| PlannerError::TemplateFile {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let template = parse_template(&content).map_err(file_error)?;
    template.validate()?;

    debug!(
        lists = template.lists.len(),
        cards = template.card_count(),
        "Template loaded"
    );
    Ok(template)
}

/// Parse template TOML without validating it.
pub fn parse_template(content: &str) -> Result<BoardTemplate, String> {
    toml::from_str(content).map_err(|e| e.message().to_string())
}

/// Render a template as TOML.
pub fn template_to_toml(template: &BoardTemplate) -> PlannerResult<String> {
    toml::to_string_pretty(template)
        .map_err(|e| PlannerError::internal(format!("cannot serialize template: {e}")))
}
