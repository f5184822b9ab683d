use thiserror::Error;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// An unreachable destination is deliberately absent: it is represented by an
/// empty [`crate::RouteResult`] rather than an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location identifier is not part of the catalog.
    #[error("unknown location: {id}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when two catalog entries share the same identifier.
    #[error("duplicate location identifier in catalog: {id}")]
    DuplicateLocation { id: String },

    /// Raised when a floor has locations to wire but no hub to wire them to.
    #[error("floor {floor} has no hub (intersection) location")]
    MissingHub { floor: i32 },

    /// Raised when a floor declares more than one hub.
    #[error("floor {floor} has more than one hub: {first} and {second}")]
    DuplicateHub {
        floor: i32,
        first: String,
        second: String,
    },

    /// Raised when an explicit catalog connection references an unknown location.
    #[error("connection {from} <-> {to} references unknown location {missing}")]
    UnknownConnectionEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    /// Raised when an explicit catalog connection joins a location to itself.
    #[error("connection joins location {id} to itself")]
    SelfConnection { id: String },

    /// Wrapper for catalog JSON parsing errors.
    #[error("failed to parse location catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
