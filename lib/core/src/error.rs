use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Invalid vertex kind: {0}")]
    InvalidKind(String),

    #[error("Kind declared as both item and category: {0}")]
    KindConflict(String),

    #[error("Self-loop not allowed on vertex: {0}")]
    SelfLoop(String),

    #[error("Invalid edge weight {weight} between {from} and {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("Vertex has no incident edges: {0}")]
    IsolatedVertex(String),

    #[error("Vertex is not recommendable: {id} (kind {kind})")]
    NotRecommendable { id: String, kind: String },

    #[error("Invalid limit: {0}, must be at least 1")]
    InvalidLimit(usize),

    #[error("No weight configured for category kind: {0}")]
    MissingWeight(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
