//! Component source analysis
//!
//! A light, regex-driven reading of a TSX/JSX component file. It finds the component's display
//! name, the npm packages it imports and the relative files it pulls in. It does not parse the
//! language, so unusual export forms fall back to the file stem.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ComponentAnalysis, LocalImport};
use crate::error::{ArtifactError, Result};

/// How many levels of relative imports are followed below the analyzed file
const MAX_IMPORT_DEPTH: usize = 2;

const RESOLVE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Packages every preview needs regardless of the source
const BASE_DEPENDENCIES: &[&str] = &["react", "react-dom"];

static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).expect("Invalid import regex")
});

static DEFAULT_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+function\s+(\w+)").expect("Invalid default function regex")
});

static DEFAULT_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s+(\w+)").expect("Invalid default regex"));

static NAMED_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:const|function)\s+([A-Z]\w*)").expect("Invalid named export regex")
});

/// Analyze the component file at `path`
pub fn analyze(path: &Path) -> Result<ComponentAnalysis> {
    let path = std::path::absolute(path).map_err(|e| analysis_failed(path, e))?;
    let source_text = fs::read_to_string(&path).map_err(|e| analysis_failed(&path, e))?;

    Ok(ComponentAnalysis {
        component_name: component_name(&source_text, &path),
        dependencies: dependencies(&source_text),
        local_imports: local_imports(&source_text, &path, 0),
        source_text,
    })
}

fn analysis_failed(path: &Path, reason: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::AnalysisFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Display name: default-exported function, default-exported identifier, first PascalCase named
/// export, then the file stem
pub fn component_name(source: &str, path: &Path) -> String {
    [&*DEFAULT_FUNCTION, &*DEFAULT_IDENT, &*NAMED_COMPONENT]
        .iter()
        .find_map(|re| re.captures(source).map(|c| c[1].to_string()))
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Component".to_string())
        })
}

/// Package names imported by bare specifier. `@scope/pkg/sub` reduces to `@scope/pkg`.
pub fn dependencies(source: &str) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();

    for caps in IMPORT_FROM.captures_iter(source) {
        let specifier = &caps[1];
        if specifier.starts_with('.') || specifier.starts_with('/') {
            continue;
        }

        let segments = if specifier.starts_with('@') { 2 } else { 1 };
        let package = specifier
            .splitn(segments + 1, '/')
            .take(segments)
            .collect::<Vec<_>>()
            .join("/");
        if !deps.contains(&package) {
            deps.push(package);
        }
    }

    for base in BASE_DEPENDENCIES {
        if !deps.iter().any(|d| d == base) {
            deps.push((*base).to_string());
        }
    }

    deps
}

fn local_imports(source: &str, importer: &Path, depth: usize) -> Vec<LocalImport> {
    if depth > MAX_IMPORT_DEPTH {
        return Vec::new();
    }

    let dir = importer.parent().unwrap_or_else(|| Path::new("."));
    let mut found = Vec::new();

    for caps in IMPORT_FROM.captures_iter(source) {
        let specifier = &caps[1];
        if !specifier.starts_with('.') {
            continue;
        }

        let Some(resolved) = resolve_relative(dir, specifier) else {
            tracing::debug!(
                target: "artifact::analyzer",
                import = specifier,
                "unresolved local import"
            );
            continue;
        };
        let Ok(text) = fs::read_to_string(&resolved) else {
            continue;
        };

        let nested = local_imports(&text, &resolved, depth + 1);
        found.push(LocalImport {
            import_path: specifier.to_string(),
            resolved_path: resolved,
            source_text: text,
        });
        found.extend(nested);
    }

    found
}

/// Resolve `specifier` the way bundlers do: as written, with a known extension, or as a directory
/// index
fn resolve_relative(dir: &Path, specifier: &str) -> Option<PathBuf> {
    let base = dir.join(specifier);
    if base.is_file() {
        return Some(base);
    }

    let with_extension = RESOLVE_EXTENSIONS.iter().map(|ext| {
        let mut candidate = base.clone().into_os_string();
        candidate.push(".");
        candidate.push(ext);
        PathBuf::from(candidate)
    });
    let index = RESOLVE_EXTENSIONS
        .iter()
        .map(|ext| base.join(format!("index.{ext}")));

    with_extension.chain(index).find(|candidate| candidate.is_file())
}
