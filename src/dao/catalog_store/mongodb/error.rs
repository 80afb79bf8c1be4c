//! Error types shared by the MongoDB storage implementation.

use thiserror::Error;

/// Convenient result alias returning [`MongoDaoError`] failures.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures that can occur while interacting with MongoDB.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// Required environment variable is missing.
    #[error("missing MongoDB environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// The connection URI could not be parsed.
    #[error("invalid MongoDB URI `{uri}`")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        /// Underlying parse failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The client could not be constructed from the parsed options.
    #[error("failed to construct MongoDB client")]
    ClientConstruction {
        /// Underlying driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The initial reachability ping failed.
    #[error("initial MongoDB ping failed")]
    InitialPing {
        /// Underlying driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The reachability ping failed during a health check.
    #[error("MongoDB health ping failed")]
    HealthPing {
        /// Underlying driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The catalog window query failed.
    #[error("failed to fetch puzzle catalog")]
    FetchCatalog {
        /// Underlying driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// Upserting a puzzle document failed.
    #[error("failed to save puzzle `{id}`")]
    SavePuzzle {
        /// Date id of the puzzle.
        id: String,
        /// Underlying driver failure.
        #[source]
        source: mongodb::error::Error,
    },
}
