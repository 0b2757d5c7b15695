//! Visualization export
//!
//! Writes the laid-out network as a JSON payload and as an interactive HTML
//! page.

pub mod html;
pub mod payload;

pub use html::render_html;
pub use payload::{ConnectionView, EdgeView, NodeView, VisualizationPayload};

use std::io::Write;
use std::path::Path;

use crate::error::util::safe_create_file;
use crate::error::{NetworkError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Write the payload as pretty-printed JSON
pub fn write_json(payload: &VisualizationPayload, path: &Path) -> Result<()> {
    log_operation_start("Writing network payload to", path);
    let file = safe_create_file(path)?;
    serde_json::to_writer_pretty(file, payload)?;
    log_operation_complete("wrote", path, payload.nodes.len(), None);
    Ok(())
}

/// Write the payload as a self-contained HTML page
pub fn write_html(payload: &VisualizationPayload, path: &Path) -> Result<()> {
    log_operation_start("Writing network visualization to", path);
    let html = render_html(payload)?;
    let mut file = safe_create_file(path)?;
    file.write_all(html.as_bytes())
        .map_err(|e| NetworkError::io(path, e))?;
    log_operation_complete("wrote", path, payload.nodes.len(), None);
    Ok(())
}
