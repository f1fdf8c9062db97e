use std::fmt;

/// Target languages the asset bundle carries source listings for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeLanguage {
    #[default]
    Cpp,
    Rust,
    Java,
}

impl CodeLanguage {
    pub const ALL: [CodeLanguage; 3] = [CodeLanguage::Cpp, CodeLanguage::Rust, CodeLanguage::Java];

    /// Key used in the `sourceCode` object of the response
    pub fn key(&self) -> &'static str {
        match self {
            CodeLanguage::Cpp => "cpp",
            CodeLanguage::Rust => "rust",
            CodeLanguage::Java => "java",
        }
    }

    /// Tab label shown above the listing
    pub fn label(&self) -> &'static str {
        match self {
            CodeLanguage::Cpp => "C++ (MISRA)",
            CodeLanguage::Rust => "Rust",
            CodeLanguage::Java => "Java",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "cpp" | "c++" => Some(CodeLanguage::Cpp),
            "rust" | "rs" => Some(CodeLanguage::Rust),
            "java" => Some(CodeLanguage::Java),
            _ => None,
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The two architecture diagrams in an asset bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagramKind {
    #[default]
    Class,
    Sequence,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 2] = [DiagramKind::Class, DiagramKind::Sequence];

    /// Stable identifier handed to the renderer
    pub fn id(&self) -> &'static str {
        match self {
            DiagramKind::Class => "class",
            DiagramKind::Sequence => "sequence",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiagramKind::Class => "Class Diagram",
            DiagramKind::Sequence => "Sequence Diagram",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
