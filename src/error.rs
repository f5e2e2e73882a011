//! Custom error types for the mdserve application
//!
//! This module defines custom error types and implements the necessary traits
//! to properly handle errors throughout the application.

use std::fmt;

/// Main error type for the mdserve application
#[derive(Debug)]
pub enum MdServeError {
    /// Error occurred while binding the listener
    Bind(std::io::Error),

    /// Error occurred while running the server
    Server(std::io::Error),

    /// Error occurred while rendering the page template
    Template(askama::Error),

    /// Error occurred while setting up the file watcher
    Watcher(notify::Error),

    /// Generic error with a message
    Generic(String),
}

impl fmt::Display for MdServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MdServeError::Bind(e) => {
                write!(f, "Failed to bind listener: {e}")
            }
            MdServeError::Server(e) => {
                write!(f, "Server runtime error: {e}")
            }
            MdServeError::Template(e) => {
                write!(f, "Failed to render page template: {e}")
            }
            MdServeError::Watcher(e) => {
                write!(f, "Failed to watch content directory: {e}")
            }
            MdServeError::Generic(msg) => {
                write!(f, "Error: {msg}")
            }
        }
    }
}

impl std::error::Error for MdServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MdServeError::Bind(e) => Some(e),
            MdServeError::Server(e) => Some(e),
            MdServeError::Template(e) => Some(e),
            MdServeError::Watcher(e) => Some(e),
            MdServeError::Generic(_) => None,
        }
    }
}

impl From<askama::Error> for MdServeError {
    fn from(error: askama::Error) -> Self {
        MdServeError::Template(error)
    }
}

impl From<notify::Error> for MdServeError {
    fn from(error: notify::Error) -> Self {
        MdServeError::Watcher(error)
    }
}

impl From<&str> for MdServeError {
    fn from(message: &str) -> Self {
        MdServeError::Generic(message.to_string())
    }
}

/// Result type alias using our custom error type
pub type Result<T> = std::result::Result<T, MdServeError>;
