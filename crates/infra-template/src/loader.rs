// Workflow template loading and rendering
use minijinja::{context, Environment, UndefinedBehavior};
use std::path::Path;
use tracing::info;

use mobydick_core::domain::WorkflowFile;
use mobydick_core::error::{AppError, Result};

/// Read the template at `path`, render it with `version` and target
/// `.github/workflows/<basename of path>`
///
/// # Errors
/// - AppError::Config if the template cannot be read
/// - AppError::Template if the template does not parse or render
/// - AppError::Domain if `path` has no file name
pub fn load_workflow_file(path: impl AsRef<Path>, version: &str) -> Result<WorkflowFile> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "cannot read workflow template {}: {}",
            path.display(),
            e
        ))
    })?;

    let name = path.display().to_string();
    let rendered = render_workflow(&name, &source, version)?;
    let workflow_file = WorkflowFile::new(path, rendered)?;

    info!(
        template = %name,
        destination = workflow_file.path(),
        version,
        bytes = workflow_file.content().len(),
        "Workflow file rendered"
    );
    Ok(workflow_file)
}

/// Render a workflow template
///
/// The context exposes the version as both `version` and `Version`. Undefined
/// variables are errors; GitHub expressions such as `${{ secrets.TOKEN }}` must
/// sit inside `{% raw %}` blocks.
pub fn render_workflow(name: &str, source: &str, version: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_template(name, source).map_err(template_error)?;

    env.get_template(name)
        .and_then(|template| template.render(context! { version => version, Version => version }))
        .map_err(template_error)
}

fn template_error(err: minijinja::Error) -> AppError {
    AppError::Template(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_template(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mobydick-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mobydick.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_render_substitutes_version() {
        let rendered = render_workflow(
            "mobydick.yaml",
            "uses: jace-ys/actions-mobydick@{{ version }}\n",
            "v1.2.3",
        )
        .unwrap();
        assert_eq!(rendered, "uses: jace-ys/actions-mobydick@v1.2.3\n");
    }

    #[test]
    fn test_render_accepts_capitalised_version() {
        let rendered = render_workflow("t", "{{ Version }}", "v2.0.0").unwrap();
        assert_eq!(rendered, "v2.0.0");
    }

    #[test]
    fn test_raw_block_preserves_github_expressions() {
        let source = "token: {% raw %}${{ secrets.GITHUB_TOKEN }}{% endraw %}\n";
        let rendered = render_workflow("t", source, "v1.0.0").unwrap();
        assert_eq!(rendered, "token: ${{ secrets.GITHUB_TOKEN }}\n");
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let result = render_workflow("t", "{{ secrets.GITHUB_TOKEN }}", "v1.0.0");
        assert!(matches!(result, Err(AppError::Template(_))));
    }

    #[test]
    fn test_syntax_error_is_a_template_error() {
        let result = render_workflow("t", "{{ version ", "v1.0.0");
        assert!(matches!(result, Err(AppError::Template(_))));
    }

    #[test]
    fn test_load_workflow_file_from_disk() {
        let path = temp_template("name: mobydick\nversion: {{ version }}\n");

        let file = load_workflow_file(&path, "v1.0.0").unwrap();

        assert_eq!(file.path(), ".github/workflows/mobydick.yaml");
        assert_eq!(file.content(), b"name: mobydick\nversion: v1.0.0\n");

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_missing_template_is_a_config_error() {
        let path = std::env::temp_dir()
            .join(format!("mobydick-missing-{}", uuid::Uuid::new_v4()))
            .join("mobydick.yaml");

        let result = load_workflow_file(&path, "v1.0.0");

        match result {
            Err(AppError::Config(message)) => assert!(message.contains("mobydick.yaml")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
