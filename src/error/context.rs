//! Error context for enriched error information.
//!
//! Context records where an error happened (operation, route, store) so log
//! lines can be correlated across a resolution and its queries.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Name of the route being resolved, if any.
    pub route: Option<String>,

    /// Store the operation was scoped to, if any.
    pub store_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,

    /// Optional correlation ID, usually the resolution ID.
    pub correlation_id: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            route: None,
            store_id: None,
            timestamp: Utc::now(),
            component: None,
            correlation_id: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref route) = self.route {
            parts.push(format!("route={}", route));
        }

        if let Some(ref store_id) = self.store_id {
            parts.push(format!("store_id={}", store_id));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        if let Some(ref correlation_id) = self.correlation_id {
            parts.push(format!("correlation_id={}", correlation_id));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref route) = self.route {
            write!(f, " route={}", route)?;
        }

        if let Some(ref store_id) = self.store_id {
            write!(f, " store={}", store_id)?;
        }

        Ok(())
    }
}
