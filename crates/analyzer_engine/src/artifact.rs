use crate::{FailureKind, Stage, SubmitError};

/// Final `/`-delimited segment of a storage reference.
///
/// `"a/b/c/report123.pdf"` yields `"report123.pdf"`; a reference without any
/// slash is returned whole. An empty final segment (e.g. a trailing slash)
/// names no artifact and is rejected.
pub fn artifact_identifier(storage_reference: &str) -> Result<&str, SubmitError> {
    let identifier = storage_reference
        .rsplit('/')
        .next()
        .unwrap_or(storage_reference);
    if identifier.is_empty() {
        return Err(SubmitError::new(
            Stage::Analyzing,
            FailureKind::MissingArtifact,
            format!("no artifact name in storage reference {storage_reference:?}"),
        ));
    }
    Ok(identifier)
}
