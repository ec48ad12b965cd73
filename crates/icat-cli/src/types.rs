use std::path::PathBuf;

/// Result of one conversion command, for the run summary.
#[derive(Debug)]
pub struct ConvertReport {
    /// Input files the conversion read.
    pub sources: Vec<PathBuf>,
    /// Output files the conversion wrote.
    pub artifacts: Vec<Artifact>,
}

/// One output file of a conversion run.
#[derive(Debug)]
pub struct Artifact {
    pub kind: &'static str,
    pub path: PathBuf,
    /// Record count, when the artifact is tabular.
    pub records: Option<usize>,
}
