use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::diagram::{DiagramLine, RenderedDiagram, Visibility};
use crate::traits::diagram_renderer::{DiagramRenderer, RenderError};

/// Diagram types accepted on the header line
const KNOWN_DIAGRAM_TYPES: [&str; 12] = [
    "classDiagram",
    "classDiagram-v2",
    "sequenceDiagram",
    "flowchart",
    "graph",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "componentDiagram",
    "C4Component",
    "C4Container",
    "C4Context",
];

/// Terminal renderer for Mermaid text.
///
/// It does no layout. It checks the header and brace nesting, then hands the
/// lines back tagged with member visibility so the front-end can color them.
#[derive(Debug, Default)]
pub struct MermaidTextRenderer {
    renders: AtomicU64,
}

impl MermaidTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagramRenderer for MermaidTextRenderer {
    fn render(&self, id: &str, definition: &str) -> Result<RenderedDiagram, RenderError> {
        let numbered: Vec<(usize, &str)> = definition
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end()))
            .collect();
        let mut lines = numbered.iter().copied().skip(header_index(&numbered));

        let (header_line, header) = lines.next().ok_or(RenderError::EmptyDefinition)?;
        let diagram_type = header.split_whitespace().next().unwrap_or_default();
        if !KNOWN_DIAGRAM_TYPES.contains(&diagram_type) {
            return Err(RenderError::UnknownDiagramType(diagram_type.to_string()));
        }
        let tags_members = diagram_type.starts_with("classDiagram");

        let mut depth: i64 = 0;
        let mut last_line = header_line;
        let mut body = Vec::new();
        for (number, line) in lines {
            last_line = number;
            depth += line.matches('{').count() as i64;
            depth -= line.matches('}').count() as i64;
            if depth < 0 {
                return Err(RenderError::UnbalancedBraces { line: number });
            }
            if line.trim().is_empty() {
                continue;
            }
            body.push(DiagramLine {
                text: line.to_string(),
                visibility: if tags_members { Visibility::from_marker(line) } else { None },
            });
        }
        if depth != 0 {
            return Err(RenderError::UnbalancedBraces { line: last_line });
        }

        let n = self.renders.fetch_add(1, Ordering::Relaxed);
        Ok(RenderedDiagram {
            render_id: format!("mermaid-{}-{}", id, n),
            diagram_type: diagram_type.to_string(),
            lines: body,
        })
    }
}

/// Index of the header line: leading blank lines, `%%` comments and one
/// `---` front-matter block are skipped. An unterminated block is left in
/// place and fails the header check.
fn header_index(lines: &[(usize, &str)]) -> usize {
    let mut index = 0;
    let mut front_matter_seen = false;
    while let Some((_, line)) = lines.get(index) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("%%") {
            index += 1;
            continue;
        }
        if trimmed == "---" && !front_matter_seen {
            let closing = lines[index + 1..].iter().position(|(_, l)| l.trim() == "---");
            if let Some(offset) = closing {
                index += offset + 2;
                front_matter_seen = true;
                continue;
            }
        }
        break;
    }
    index
}
