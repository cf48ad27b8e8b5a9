//! Component analysis result handed from the analyzer to the renderer

use std::path::PathBuf;

/// A relative import resolved next to the analyzed component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImport {
    /// Specifier as written in the source (e.g. "./Icon")
    pub import_path: String,
    pub resolved_path: PathBuf,
    pub source_text: String,
}

/// What the analyzer knows about a component file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnalysis {
    pub component_name: String,
    pub source_text: String,
    /// Package names of bare imports, always including react and react-dom
    pub dependencies: Vec<String>,
    pub local_imports: Vec<LocalImport>,
}
