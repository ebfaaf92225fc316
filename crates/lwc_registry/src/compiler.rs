//! Component compiler collaborator.
//!
//! The indexer only needs the public shape of a component: its declared
//! properties and documentation. [`ComponentCompiler`] is the seam for any
//! tool that can produce that shape; [`ApiScanner`] is the built-in
//! implementation that reads `@api` members straight from the source.

use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::naming::to_kebab;

/// A declared public property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
}

/// Public shape of a compiled component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetadata {
    /// Public properties in declaration order.
    pub properties: Vec<PropertyDecl>,
    /// Documentation attached to the component class.
    pub doc: Option<String>,
}

/// Successful compile output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileResult {
    pub metadata: ComponentMetadata,
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based line, when known.
    pub line: Option<u32>,
}

impl CompileDiagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            line: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a line number.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Output of compiling one file.
///
/// Diagnostics do not preclude a result: a compiler may report warnings
/// alongside partial metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    pub result: Option<CompileResult>,
    pub diagnostics: Vec<CompileDiagnostic>,
    /// The source file no longer exists.
    pub source_missing: bool,
}

impl CompileOutput {
    /// Output with metadata and no diagnostics.
    pub fn ok(metadata: ComponentMetadata) -> Self {
        Self {
            result: Some(CompileResult { metadata }),
            diagnostics: Vec::new(),
            source_missing: false,
        }
    }

    /// Output with diagnostics only.
    pub fn failed(diagnostics: Vec<CompileDiagnostic>) -> Self {
        Self {
            result: None,
            diagnostics,
            source_missing: false,
        }
    }

    /// Output for a source file that was deleted before it could be read.
    pub fn missing() -> Self {
        Self {
            source_missing: true,
            ..Self::default()
        }
    }
}

/// Extract kebab-case attribute names from compiled metadata.
pub fn extract_attributes(metadata: &ComponentMetadata) -> Vec<String> {
    metadata
        .properties
        .iter()
        .map(|p| to_kebab(&p.name))
        .collect()
}

/// Trait for turning a component source file into metadata.
#[async_trait]
pub trait ComponentCompiler: Send + Sync {
    /// Compile a single file. Failures are reported as diagnostics.
    async fn compile(&self, path: &Path) -> CompileOutput;
}

/// Side channel for compiler diagnostics.
///
/// Reporting is fire-and-forget and never affects indexing.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, path: &Path, diagnostics: &[CompileDiagnostic]);
}

/// Diagnostic sink that writes to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn report(&self, path: &Path, diagnostics: &[CompileDiagnostic]) {
        for diag in diagnostics {
            match diag.line {
                Some(line) => tracing::warn!(
                    "error compiling {}:{}: {:?}: {}",
                    path.display(),
                    line,
                    diag.severity,
                    diag.message
                ),
                None => tracing::warn!(
                    "error compiling {}: {:?}: {}",
                    path.display(),
                    diag.severity,
                    diag.message
                ),
            }
        }
    }
}

fn class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export\s+default\s+class\s+([A-Za-z_$][\w$]*)").expect("valid class regex")
    })
}

fn api_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"@api\s+(?:(?:get|set|static|async)\s+)*([A-Za-z_$][\w$]*)")
            .expect("valid @api regex")
    })
}

/// Compiler that scans a component's source for its `@api` members.
///
/// Comments and string literal contents are masked before scanning, so
/// `@api` or braces inside them are ignored. Regular expression literals
/// and nested template expressions are not understood.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiScanner;

impl ApiScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan source text that has already been read.
    pub fn scan(source: &str) -> CompileOutput {
        let masked = mask_comments_and_strings(source);
        let Some(class) = class_regex().find(&masked) else {
            return CompileOutput::failed(vec![CompileDiagnostic::error(
                "no default-exported component class",
            )]);
        };

        let mut properties: Vec<PropertyDecl> = Vec::new();
        for cap in api_regex().captures_iter(&masked[class.end()..]) {
            let name = &cap[1];
            // Getter/setter pairs declare the same property twice.
            if !properties.iter().any(|p| p.name == name) {
                properties.push(PropertyDecl {
                    name: name.to_string(),
                });
            }
        }

        CompileOutput {
            result: Some(CompileResult {
                metadata: ComponentMetadata {
                    properties,
                    doc: leading_doc_comment(&source[..class.start()]),
                },
            }),
            diagnostics: unbalanced_brace(&masked).into_iter().collect(),
            source_missing: false,
        }
    }
}

#[async_trait]
impl ComponentCompiler for ApiScanner {
    async fn compile(&self, path: &Path) -> CompileOutput {
        match tokio::fs::read_to_string(path).await {
            Ok(source) => Self::scan(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CompileOutput::missing(),
            Err(e) => CompileOutput::failed(vec![CompileDiagnostic::error(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))]),
        }
    }
}

/// Copy of `source` with comments and string literal contents blanked out.
///
/// Byte offsets and line breaks are preserved.
fn mask_comments_and_strings(source: &str) -> String {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut out = bytes.to_vec();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = source[i..].find('\n').map_or(len, |e| i + e);
                blank(&mut out[i..end]);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = source[i + 2..].find("*/").map_or(len, |e| i + 2 + e + 2);
                blank(&mut out[i..end]);
                i = end;
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < len && bytes[i] != quote {
                    let step = if bytes[i] == b'\\' { 2 } else { 1 };
                    let end = (i + step).min(len);
                    blank(&mut out[i..end]);
                    i = end;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn blank(bytes: &mut [u8]) {
    for b in bytes.iter_mut().filter(|b| **b != b'\n') {
        *b = b' ';
    }
}

/// Warning for the first unmatched `}` or the outermost unclosed `{`.
fn unbalanced_brace(masked: &str) -> Option<CompileDiagnostic> {
    let mut open_lines: Vec<u32> = Vec::new();

    for (idx, line) in masked.lines().enumerate() {
        let line_no = idx as u32 + 1;
        for c in line.chars() {
            match c {
                '{' => open_lines.push(line_no),
                '}' if open_lines.pop().is_none() => {
                    return Some(
                        CompileDiagnostic::warning("unmatched closing brace").at_line(line_no),
                    );
                }
                _ => {}
            }
        }
    }

    open_lines
        .first()
        .map(|&line| CompileDiagnostic::warning("unclosed brace").at_line(line))
}

/// Text of the `/** ... */` block that directly precedes the class.
fn leading_doc_comment(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_end();
    let body_end = trimmed.strip_suffix("*/")?;
    let start = body_end.rfind("/**")?;
    let body = &body_end[start + 3..];

    let doc = body
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if doc.is_empty() {
        None
    } else {
        Some(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"
import { LightningElement, api } from 'lwc';

/**
 * Displays a greeting.
 */
export default class Hello extends LightningElement {
    @api greetingText;
    @api iconName = 'utility:smiley';
    @api
    get size() { return this._size; }
    set size(value) { this._size = value; }
    internalState;
}
"#;

    #[test]
    fn test_scan_api_properties() {
        let output = ApiScanner::scan(COMPONENT);
        let metadata = output.result.unwrap().metadata;

        let names: Vec<_> = metadata.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["greetingText", "iconName", "size"]);
        assert_eq!(metadata.doc.as_deref(), Some("Displays a greeting."));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_extract_attributes() {
        let metadata = ApiScanner::scan(COMPONENT).result.unwrap().metadata;
        assert_eq!(
            extract_attributes(&metadata),
            vec!["greeting-text", "icon-name", "size"]
        );
    }

    #[test]
    fn test_scan_accessor_pair_declared_once() {
        let source = "export default class A { @api get value() {} @api set value(v) {} }";
        let metadata = ApiScanner::scan(source).result.unwrap().metadata;
        assert_eq!(metadata.properties.len(), 1);
    }

    #[test]
    fn test_scan_without_class_fails() {
        let output = ApiScanner::scan("const x = 1;");
        assert!(output.result.is_none());
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_scan_partial_result_with_warning() {
        let output = ApiScanner::scan("export default class A {\n    @api label;\n");
        assert_eq!(output.result.unwrap().metadata.properties.len(), 1);
        assert_eq!(output.diagnostics[0].severity, Severity::Warning);
        assert_eq!(output.diagnostics[0].line, Some(1));
    }

    #[test]
    fn test_scan_unmatched_closing_brace_line() {
        let output = ApiScanner::scan("export default class A {\n}\n}\n");
        assert_eq!(output.diagnostics[0].message, "unmatched closing brace");
        assert_eq!(output.diagnostics[0].line, Some(3));
    }

    #[test]
    fn test_scan_ignores_comments_and_strings() {
        let source = r#"
// export default class Old { @api stale; }
export default class A extends LightningElement {
    /* @api commented; */
    @api label = '{ not a brace';
    // @api alsoCommented;
    @api title = "@api quoted \" }";
    @api pattern = `}{`;
}
"#;
        let output = ApiScanner::scan(source);
        let names: Vec<_> = output
            .result
            .unwrap()
            .metadata
            .properties
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["label", "title", "pattern"]);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_mask_preserves_offsets() {
        let source = "a /* é */ 'x' // y\nb";
        let masked = mask_comments_and_strings(source);
        assert_eq!(masked.len(), source.len());
        assert_eq!(masked, "a          ' '     \nb");
    }

    #[test]
    fn test_leading_doc_comment() {
        assert_eq!(leading_doc_comment("// plain\n"), None);
        assert_eq!(
            leading_doc_comment("/** one */\n/**\n * two\n * lines\n */\n"),
            Some("two\nlines".to_string())
        );
    }

    #[tokio::test]
    async fn test_compile_missing_file() {
        let output = ApiScanner::new()
            .compile(Path::new("/nonexistent/foo/foo.js"))
            .await;
        assert!(output.result.is_none());
        assert!(output.source_missing);
        assert!(output.diagnostics.is_empty());
    }
}
