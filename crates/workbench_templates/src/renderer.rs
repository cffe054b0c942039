//! Template rendering to files.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::engine::Template;
use crate::error::{TemplateError, TemplateResult};
use crate::source::TemplateSource;

/// Renders templates from a [`TemplateSource`].
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    source: TemplateSource,
}

impl TemplateRenderer {
    /// Create a renderer reading from the given source.
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    /// Render a template to a string.
    pub fn render<T: Serialize + ?Sized>(&self, template_path: &str, data: &T) -> TemplateResult<String> {
        let body = self.source.read(template_path)?;
        let template = Template::parse(template_path, &body)?;
        let data = serde_json::to_value(data)?;
        template.render(&data)
    }

    /// Render a template into `destination`, overwriting it.
    ///
    /// The destination's parent directory is created first. Nothing is
    /// written when rendering fails.
    pub fn render_to_file<T: Serialize + ?Sized>(
        &self,
        template_path: &str,
        data: &T,
        destination: &Path,
    ) -> TemplateResult<()> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| TemplateError::io(parent, e))?;
        }

        let rendered = self.render(template_path, data)?;
        fs::write(destination, rendered).map_err(|e| TemplateError::io(destination, e))?;

        debug!("Rendered {} to {:?}", template_path, destination);
        Ok(())
    }

    /// Render every template named in `names` from `src_dir` into `dest_dir`,
    /// keeping file names.
    ///
    /// Stops at the first failure; files rendered before it stay on disk.
    pub fn render_set<T: Serialize + ?Sized>(
        &self,
        src_dir: &str,
        names: &[&str],
        data: &T,
        dest_dir: &Path,
    ) -> TemplateResult<()> {
        for name in names {
            let template_path = format!("{}/{}", src_dir, name);
            self.render_to_file(&template_path, data, &dest_dir.join(name))?;
        }
        Ok(())
    }
}
