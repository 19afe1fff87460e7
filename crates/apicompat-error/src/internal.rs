#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    /// The converter met a type shape it has no rendering for.
    #[error("unimplemented type shape `{shape}`: {ty}")]
    UnimplementedTypeShape { shape: &'static str, ty: String },

    #[error("Unexpected state: {0}")]
    InvalidState(String),
}
