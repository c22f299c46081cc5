//! Parser for jdeps `-verbose:class` output.
//!
//! The format is tool-specific and semi-structured, so it is treated as
//! untrusted: lines that do not carry a recognizable dependency fact are
//! skipped, never fatal. Two line shapes carry class-level facts. The
//! flat form, one fact per indented line:
//!
//! ```text
//!    com.example.App  ->  com.example.util.Strings  classes
//! ```
//!
//! and the grouped form, a class header followed by indented arrow lines:
//!
//! ```text
//! com.example.App (classes)
//!    -> com.example.util.Strings  classes
//!    -> java.lang.Object          java.base
//! ```
//!
//! Archive summary lines (`classes -> java.base`) sit at column zero and
//! are ignored, as are blank lines and tool diagnostics.

use crate::model::{ClassId, DependencyEdge};

/// What one parse pass saw. `lines_skipped` counts non-blank lines that
/// carried no dependency fact, for degradation reporting.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub edges: Vec<DependencyEdge>,
    pub lines_skipped: usize,
}

impl ParseOutcome {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

const DIAGNOSTIC_PREFIXES: &[&str] = &[
    "Warning:",
    "Error:",
    "Exception",
    "Picked up JAVA_TOOL_OPTIONS:",
];

fn is_diagnostic(line: &str) -> bool {
    DIAGNOSTIC_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// A plausible binary class name: dot-separated Java identifier segments,
/// `$` allowed for nested classes. Rejects paths, array descriptors, and
/// anything else the tool mixes into its output columns.
fn is_class_name(token: &str) -> bool {
    let starts_like_identifier = token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    starts_like_identifier
        && token.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

/// Right-hand side of an arrow: `a.b.C [archive...]`. The trailing archive
/// or module column is ignored.
fn target_class(rest: &str) -> Option<ClassId> {
    let rest = rest.trim();
    if rest == "not found" {
        return None;
    }
    rest.split_whitespace()
        .next()
        .filter(|token| is_class_name(token))
        .map(ClassId::new)
}

/// Grouped-form header: `com.example.App (archive)`.
fn group_header(line: &str) -> Option<ClassId> {
    let (name, rest) = line.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    if is_class_name(name) && rest.starts_with('(') && rest.ends_with(')') {
        Some(ClassId::new(name))
    } else {
        None
    }
}

/// Parse one analyzer run's stdout into dependency edges.
///
/// Deterministic: the same input always yields the same edge sequence.
pub fn parse_dependencies(output: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut current_source: Option<ClassId> = None;

    for raw in output.lines() {
        if raw.trim().is_empty() {
            current_source = None;
            continue;
        }
        let indented = raw.starts_with(' ') || raw.starts_with('\t');
        let line = raw.trim();

        if is_diagnostic(line) {
            outcome.lines_skipped += 1;
            continue;
        }

        if let Some(rest) = line.strip_prefix("->") {
            // grouped continuation, attributed to the current header
            match (&current_source, target_class(rest)) {
                (Some(source), Some(target)) => outcome.edges.push(DependencyEdge {
                    from: source.clone(),
                    to: target,
                }),
                _ => outcome.lines_skipped += 1,
            }
            continue;
        }

        if let Some((lhs, rhs)) = line.split_once("->") {
            // Flat facts are always indented; an arrow at column zero is
            // an archive summary line.
            if !indented {
                outcome.lines_skipped += 1;
                current_source = None;
                continue;
            }
            let source = lhs
                .trim()
                .split_whitespace()
                .next()
                .filter(|token| is_class_name(token));
            match (source, target_class(rhs)) {
                (Some(source), Some(target)) => outcome.edges.push(DependencyEdge {
                    from: ClassId::new(source),
                    to: target,
                }),
                _ => outcome.lines_skipped += 1,
            }
            continue;
        }

        if let Some(source) = group_header(line) {
            current_source = Some(source);
            continue;
        }

        outcome.lines_skipped += 1;
        current_source = None;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge {
            from: ClassId::new(from),
            to: ClassId::new(to),
        }
    }

    const FLAT_OUTPUT: &str = "\
classes -> java.base
classes -> test-classes
   com.example.App                  -> com.example.util.Strings        classes
   com.example.App                  -> java.lang.Object                java.base
   com.example.AppTest              -> com.example.App                 classes
";

    const GROUPED_OUTPUT: &str = "\
app.jar -> java.base

com.example.App (app.jar)
   -> com.example.util.Strings  app.jar
   -> java.lang.Object          java.base

com.example.AppTest (app.jar)
   -> com.example.App           app.jar
";

    #[test]
    fn parses_flat_verbose_output() {
        let outcome = parse_dependencies(FLAT_OUTPUT);
        assert_eq!(
            outcome.edges,
            vec![
                edge("com.example.App", "com.example.util.Strings"),
                edge("com.example.App", "java.lang.Object"),
                edge("com.example.AppTest", "com.example.App"),
            ]
        );
    }

    #[test]
    fn parses_grouped_verbose_output() {
        let outcome = parse_dependencies(GROUPED_OUTPUT);
        assert_eq!(
            outcome.edges,
            vec![
                edge("com.example.App", "com.example.util.Strings"),
                edge("com.example.App", "java.lang.Object"),
                edge("com.example.AppTest", "com.example.App"),
            ]
        );
    }

    #[test]
    fn summary_lines_are_not_facts() {
        let outcome = parse_dependencies("classes -> java.base\nfoo.jar -> java.logging\n");
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.lines_skipped, 2);
    }

    #[test]
    fn diagnostics_and_banners_are_filtered() {
        let output = "\
Warning: split package: javax.annotation
Picked up JAVA_TOOL_OPTIONS: -Xmx1g
   com.example.App -> com.example.Util classes
";
        let outcome = parse_dependencies(output);
        assert_eq!(outcome.edges, vec![edge("com.example.App", "com.example.Util")]);
        assert_eq!(outcome.lines_skipped, 2);
    }

    #[test]
    fn unresolved_targets_are_skipped() {
        let output = "   com.example.App -> not found\n";
        let outcome = parse_dependencies(output);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.lines_skipped, 1);
    }

    #[test]
    fn garbage_yields_zero_edges_without_error() {
        let output = "lorem ipsum dolor\n12345\n!!! ???\n\n<<>>\n";
        let outcome = parse_dependencies(output);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.lines_skipped, 4);
    }

    #[test]
    fn continuation_without_header_is_skipped() {
        let output = "   -> com.example.Orphan classes\n";
        let outcome = parse_dependencies(output);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.lines_skipped, 1);
    }

    #[test]
    fn blank_line_closes_a_group() {
        let output = "\
com.example.App (classes)

   -> com.example.Util classes
";
        let outcome = parse_dependencies(output);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.lines_skipped, 1);
    }

    #[test]
    fn nested_and_self_references_parse() {
        let output = "\
   com.example.App$Inner -> com.example.App classes
   com.example.App       -> com.example.App classes
";
        let outcome = parse_dependencies(output);
        assert_eq!(
            outcome.edges,
            vec![
                edge("com.example.App$Inner", "com.example.App"),
                edge("com.example.App", "com.example.App"),
            ]
        );
    }

    #[test]
    fn array_descriptors_are_rejected() {
        let output = "   com.example.App -> [Ljava.lang.Object; java.base\n";
        let outcome = parse_dependencies(output);
        assert!(outcome.edges.is_empty());
    }

    #[test]
    fn parse_is_deterministic() {
        let first = parse_dependencies(FLAT_OUTPUT);
        let second = parse_dependencies(FLAT_OUTPUT);
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.lines_skipped, second.lines_skipped);
    }
}
