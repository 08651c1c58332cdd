use thiserror::Error;

pub type Result<T> = std::result::Result<T, CartError>;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction data error: {0}")]
    Data(String),

    #[error("Rule mining error: {0}")]
    Mining(String),

    #[error("Chat model error: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod basket;
pub mod commands;
pub mod config;
pub mod engine;
pub mod form;
pub mod llm;
pub mod mining;
pub mod store;
