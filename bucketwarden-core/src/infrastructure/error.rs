// bucketwarden-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- HTTP (Storage control plane & topic publish) ---
    #[error("HTTP Client Error: {0}")]
    #[diagnostic(
        code(warden::infra::http),
        help("Check the WARDEN_ENDPOINT base URL and network reachability.")
    )]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from '{url}'")]
    #[diagnostic(code(warden::infra::http_status))]
    UnexpectedStatus { url: String, status: u16 },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(warden::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(warden::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(warden::infra::config))]
    ConfigError(String),
}
