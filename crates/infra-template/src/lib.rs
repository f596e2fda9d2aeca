// Mobydick Infrastructure - Workflow Template Loader
// Reads the local workflow template and renders it with the run's version

mod loader;

pub use loader::{load_workflow_file, render_workflow};
