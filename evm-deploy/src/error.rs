// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::TxHash;
use alloy::transports::{RpcError, TransportErrorKind};
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get EVM network: {0}")]
    FailedToGetEvmNetwork(String),
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Artifact for contract {name} not found in {}", .dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },
    #[error("Multiple artifacts for contract {name}, use a fully qualified name instead: {candidates:?}")]
    AmbiguousArtifact {
        name: String,
        candidates: Vec<String>,
    },
    #[error("Could not read artifact {}: {source}", .path.display())]
    ArtifactIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not walk artifacts directory: {0}")]
    ArtifactsDir(#[from] walkdir::Error),
    #[error("Could not parse artifact {}: {source}", .path.display())]
    ArtifactParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Contract {0} is abstract and can't be deployed")]
    AbstractContract(String),
    #[error("Contract {0} has unlinked library references in its bytecode")]
    UnlinkedLibraries(String),
    #[error("Invalid bytecode for contract {name}: {source}")]
    InvalidBytecode {
        name: String,
        source: alloy::hex::FromHexError,
    },

    #[error("Contract {contract} expects {expected} constructor arguments, got {got}")]
    ArgumentCount {
        contract: String,
        expected: usize,
        got: usize,
    },
    #[error("Constructor argument #{index} ({value:?}) is not a valid {ty}: {source}")]
    InvalidArgument {
        index: usize,
        value: String,
        ty: String,
        source: alloy::dyn_abi::Error,
    },
    #[error(transparent)]
    AbiError(#[from] alloy::dyn_abi::Error),

    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    PendingTransactionError(#[from] alloy::providers::PendingTransactionError),
    #[error("Current gas price {current} exceeds the max fee per gas limit of {limit}")]
    GasPriceAboveLimit { current: u128, limit: u128 },
    #[error("Deployment transaction {0} was reverted")]
    Reverted(TxHash),
    #[error("Receipt of deployment transaction {0} has no contract address")]
    MissingContractAddress(TxHash),
}
