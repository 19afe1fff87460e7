/// Failures caused by the analysed code: something in an exported signature cannot
/// be named from outside its package.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    #[error("unsupported type in {item}: {message}")]
    UnsupportedType { item: String, message: String },
}
