// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur while configuring or constructing a generator run
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build intake client: {0}")]
    ClientBuild(String),
}
