//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error source carried by error variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Stampede cache-aside layer
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Infrastructure-level error (logging, file handling, wiring)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Key-value store operation error, propagated unchanged from the backend
    #[error("Store error: {message}")]
    Store {
        /// Description of the failed store operation
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A value could not be serialized for storage
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A stored payload is malformed and cannot be decoded
    #[error("Deserialization error: {message}")]
    Deserialization {
        /// Description of the deserialization failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The authoritative source failed while loading a key
    #[error("Loader failed for key {key}: {source}")]
    Loader {
        /// Cache key the loader was invoked for
        key: String,
        /// The loader's own error
        #[source]
        source: BoxError,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// The mutex strategy gave up waiting for a contended key lock
    #[error("Lock for key {key} still held after {attempts} attempts")]
    LockTimeout {
        /// Cache key whose lock could not be acquired
        key: String,
        /// Number of acquisition attempts made
        attempts: u32,
    },

    /// A wait was interrupted by client cancellation
    #[error("Operation on key {key} was cancelled")]
    Cancelled {
        /// Cache key of the interrupted read
        key: String,
    },

    /// The rebuild queue is full and the task was rejected
    #[error("Rebuild scheduler saturated, task for key {key} rejected")]
    SchedulerSaturated {
        /// Cache key of the rejected rebuild
        key: String,
    },

    /// The rebuild scheduler no longer accepts tasks
    #[error("Rebuild scheduler is shut down")]
    SchedulerClosed,

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Store error creation methods
impl Error {
    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Codec error creation methods
impl Error {
    /// Create a serialization error with source
    pub fn serialization_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a deserialization error
    pub fn deserialization<S: Into<String>>(message: S) -> Self {
        Self::Deserialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a deserialization error with source
    pub fn deserialization_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Deserialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Coordination error creation methods
impl Error {
    /// Wrap a loader failure for the given cache key
    pub fn loader<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        key: S,
        source: E,
    ) -> Self {
        Self::Loader {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a lock timeout error
    pub fn lock_timeout<S: Into<String>>(key: S, attempts: u32) -> Self {
        Self::LockTimeout {
            key: key.into(),
            attempts,
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(key: S) -> Self {
        Self::Cancelled { key: key.into() }
    }

    /// Create a scheduler saturation error
    pub fn scheduler_saturated<S: Into<String>>(key: S) -> Self {
        Self::SchedulerSaturated { key: key.into() }
    }
}

// Configuration and general error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether the error came from the key-value store backend
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// Whether the error is a rejected or closed scheduler submission
    pub fn is_scheduler_rejection(&self) -> bool {
        matches!(self, Self::SchedulerSaturated { .. } | Self::SchedulerClosed)
    }
}
