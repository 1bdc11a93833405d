//! SVG rendering of a graph's current positions.

use std::{collections::HashSet, f32::consts::PI, path::Path};

use log::{debug, info};
use svg::{
    Document,
    node::element::{self as svg_element, path::Data},
};

use tensile_core::{
    color::Color,
    geometry::{Point, Size},
    identifier::NodeId,
};

use crate::{config::StyleConfig, error::TensileError, graph::Graph};

const ARROW_LENGTH: f32 = 5.0;
const ARROW_SPREAD: f32 = 0.5;

/// Draws nodes as circles, edges as lines and node identifiers as labels,
/// centered on a fixed-size canvas.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    canvas: Size,
    directed: bool,
    font: String,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    radius: f32,
}

impl SvgRenderer {
    /// Creates a renderer from style options.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Style`] if a configured color cannot be parsed.
    pub fn new(style: &StyleConfig) -> Result<Self, TensileError> {
        Ok(Self {
            canvas: style.canvas(),
            directed: style.directed(),
            font: style.font().to_string(),
            fill: style.fill().map_err(TensileError::Style)?,
            stroke: style.stroke().map_err(TensileError::Style)?,
            stroke_width: style.stroke_width(),
            radius: style.radius(),
        })
    }

    /// Renders the graph into an SVG document
    pub fn render(&self, graph: &Graph) -> Document {
        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.canvas.width(), self.canvas.height()),
            )
            .set("width", self.canvas.width())
            .set("height", self.canvas.height());

        if graph.is_empty() {
            return doc;
        }

        // Move the center of the node bounds to the center of the canvas
        let offset = self.canvas.center().sub_point(graph.bounds().center());
        let main_group = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({}, {})", offset.x(), offset.y()),
            )
            .add(self.render_edges(graph))
            .add(self.render_nodes(graph))
            .add(self.render_labels(graph));

        doc.add(main_group)
    }

    /// Renders the graph and serializes the document
    pub fn render_to_string(&self, graph: &Graph) -> String {
        self.render(graph).to_string()
    }

    /// Renders the graph and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Io`] if the file cannot be written.
    pub fn save(&self, graph: &Graph, path: impl AsRef<Path>) -> Result<(), TensileError> {
        let path = path.as_ref();
        svg::save(path, &self.render(graph))?;
        info!(path:? = path; "SVG written");
        Ok(())
    }

    /// One line per edge, drawn once for a pair connected both ways, plus an
    /// arrowhead per edge when directed.
    fn render_edges(&self, graph: &Graph) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("stroke", self.stroke)
            .set("stroke-width", self.stroke_width)
            .set("fill", self.stroke);

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut lines = 0;
        for (source, target, _) in graph.edges() {
            let (Some(from), Some(to)) = (graph.position(source), graph.position(target)) else {
                continue;
            };

            if !(graph.has_edge(target, source) && seen.contains(&target)) {
                group = group.add(
                    svg_element::Line::new()
                        .set("x1", from.x())
                        .set("y1", from.y())
                        .set("x2", to.x())
                        .set("y2", to.y()),
                );
                lines += 1;
            }

            if self.directed {
                group = group.add(self.arrowhead(from, to));
            }
            seen.insert(source);
        }

        debug!(lines = lines, directed = self.directed; "Edges rendered");
        group
    }

    /// Triangle pointing at `to`, its tip on the node outline
    fn arrowhead(&self, from: Point, to: Point) -> svg_element::Path {
        let delta = from.sub_point(to);
        let angle = PI + delta.x().atan2(delta.y());

        let tip = Point::new(
            to.x() - angle.sin() * self.radius,
            to.y() - angle.cos() * self.radius,
        );
        let wing = |spread: f32| {
            Point::new(
                tip.x() - (angle + spread).sin() * ARROW_LENGTH,
                tip.y() - (angle + spread).cos() * ARROW_LENGTH,
            )
        };
        let left = wing(-ARROW_SPREAD);
        let right = wing(ARROW_SPREAD);

        let data = Data::new()
            .move_to((tip.x(), tip.y()))
            .line_to((left.x(), left.y()))
            .line_to((right.x(), right.y()))
            .close();
        svg_element::Path::new().set("d", data)
    }

    fn render_nodes(&self, graph: &Graph) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("fill", self.fill)
            .set("stroke", self.stroke)
            .set("stroke-width", self.stroke_width * 2.0);

        for (_, position) in graph.positions() {
            group = group.add(
                svg_element::Circle::new()
                    .set("cx", position.x())
                    .set("cy", position.y())
                    .set("r", self.radius),
            );
        }
        group
    }

    fn render_labels(&self, graph: &Graph) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("fill", self.stroke)
            .set("style", format!("font: {}", self.font));

        for (id, position) in graph.positions() {
            group = group.add(
                svg_element::Text::new(id.to_string())
                    .set("x", position.x() + self.radius)
                    .set("y", position.y() - self.radius - 1.0),
            );
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{config::Options, particle::InitialPosition};

    fn style(options: Options) -> StyleConfig {
        StyleConfig::default().merged(&options)
    }

    fn renderer(options: Options) -> SvgRenderer {
        SvgRenderer::new(&style(options)).unwrap()
    }

    fn pinned(edges: &[(&str, &str)], positions: &[(&str, f32, f32)]) -> Graph {
        let mut builder = Graph::builder();
        for &(source, target) in edges {
            builder = builder.edge(source, target, 1.0);
        }
        for &(id, x, y) in positions {
            builder = builder.place(id, InitialPosition::at(x, y));
        }
        builder.build()
    }

    #[test]
    fn test_empty_graph_has_no_content() {
        let svg = renderer(Options::default()).render_to_string(&Graph::default());

        assert!(svg.contains("viewBox=\"0 0 800 600\""));
        assert!(!svg.contains("<g"));
        assert!(!svg.contains("translate"));
    }

    #[test]
    fn test_content_is_centered() {
        let graph = pinned(&[("a", "b")], &[("a", 0.0, 0.0), ("b", 100.0, 50.0)]);
        let svg = renderer(Options::default()).render_to_string(&graph);

        // Canvas center (400, 300) minus bounds center (50, 25)
        assert!(svg.contains("translate(350, 275)"), "{svg}");
    }

    #[test]
    fn test_single_node_is_centered() {
        let graph = pinned(&[], &[("solo", 10.0, 20.0)]);
        let options = Options {
            width: Some(200.0),
            height: Some(100.0),
            ..Options::default()
        };
        let svg = renderer(options).render_to_string(&graph);

        assert!(svg.contains("translate(90, 30)"), "{svg}");
        assert_eq!(svg.matches("<circle").count(), 1);
        // Text content is written on its own line
        assert!(svg.contains("\nsolo\n"), "{svg}");
    }

    #[test]
    fn test_reciprocal_edges_draw_one_line() {
        let graph = pinned(
            &[("a", "b"), ("b", "a"), ("b", "c")],
            &[("a", 0.0, 0.0), ("b", 50.0, 0.0), ("c", 0.0, 50.0)],
        );
        let svg = renderer(Options::default()).render_to_string(&graph);

        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_directed_draws_arrowhead_per_edge() {
        let graph = pinned(
            &[("a", "b"), ("b", "a")],
            &[("a", 0.0, 0.0), ("b", 50.0, 0.0)],
        );
        let options = Options {
            directed: Some(true),
            ..Options::default()
        };
        let svg = renderer(options).render_to_string(&graph);

        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_arrowhead_tip_touches_target_outline() {
        let renderer = renderer(Options::default());
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);

        let delta = from.sub_point(to);
        let angle = PI + delta.x().atan2(delta.y());
        let tip_x = to.x() - angle.sin() * renderer.radius;
        let tip_y = to.y() - angle.cos() * renderer.radius;

        assert_approx_eq!(f32, tip_x, 96.0, epsilon = 0.001);
        assert_approx_eq!(f32, tip_y, 0.0, epsilon = 0.001);

        let path = renderer.arrowhead(from, to).to_string();
        assert!(path.starts_with("<path"));
    }

    #[test]
    fn test_labels_are_offset_by_radius() {
        let graph = pinned(&[], &[("n", 10.0, 20.0)]);
        let svg = renderer(Options::default()).render_to_string(&graph);

        assert!(svg.contains("x=\"14\""), "{svg}");
        assert!(svg.contains("y=\"15\""), "{svg}");
    }

    #[test]
    fn test_node_outline_is_twice_edge_width() {
        let graph = pinned(&[("a", "b")], &[("a", 0.0, 0.0), ("b", 1.0, 1.0)]);
        let options = Options {
            stroke_width: Some(1.5),
            ..Options::default()
        };
        let svg = renderer(options).render_to_string(&graph);

        assert!(svg.contains("stroke-width=\"1.5\""));
        assert!(svg.contains("stroke-width=\"3\""));
    }

    #[test]
    fn test_invalid_color_is_style_error() {
        let options = Options {
            fill: Some("not-a-color".to_string()),
            ..Options::default()
        };
        let err = SvgRenderer::new(&style(options)).unwrap_err();
        assert!(matches!(err, TensileError::Style(_)));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.svg");

        let graph = pinned(&[("a", "b")], &[("a", 0.0, 0.0), ("b", 10.0, 0.0)]);
        renderer(Options::default()).save(&graph, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("<line"));
    }
}
