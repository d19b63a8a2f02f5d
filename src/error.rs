// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Errors fall into two groups: failures reported by the router client
//! ([`ClientError`]) and invalid configuration records ([`ConfigError`]).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The router client reported a failure.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// A configuration or options record could not be interpreted.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reported by a [`RouterClient`](crate::client::RouterClient).
///
/// The bridge never inspects these beyond logging them; they are passed
/// through to the caller from every accessor except `connect`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The session to the router could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The router rejected the supplied credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// A request exceeded the client's own deadline.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// A request was issued without an open session.
    #[error("router is not connected")]
    NotConnected,

    /// A shell command on the router exited unsuccessfully.
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// The router's command output could not be understood.
    #[error("unexpected router output: {0}")]
    Parse(String),
}

/// Errors related to configuration and options records.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The record did not have the expected shape.
    #[error("invalid record: {0}")]
    Invalid(#[from] serde_json::Error),

    /// Unknown connection protocol.
    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    /// Unknown operating mode.
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// A required key is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
