// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Compiled contract artifacts.
//!
//! Both the Hardhat layout (`artifacts/<source>.sol/<Contract>.json` with a hex `bytecode`
//! string) and the Foundry layout (`out/<source>.sol/<Contract>.json` with a
//! `bytecode.object` field) are understood.

use crate::common::Bytes;
use crate::{Error, Result};
use alloy::json_abi::{Constructor, JsonAbi};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory Hardhat writes its artifacts to.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

const BUILD_INFO_DIR: &str = "build-info";

/// ABI and creation bytecode of a single compiled contract.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(hex) => hex,
            RawBytecode::Object { object } => object,
        }
    }
}

impl Artifact {
    /// Look up the artifact of `contract_name` below `artifacts_dir` and load it.
    pub fn find(artifacts_dir: &Path, contract_name: &str) -> Result<Self> {
        let path = find_artifact_path(artifacts_dir, contract_name)?;
        Self::load(&path)
    }

    /// Load an artifact file. Fails for contracts without deployable bytecode.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawArtifact =
            serde_json::from_str(&content).map_err(|source| Error::ArtifactParse {
                path: path.to_path_buf(),
                source,
            })?;

        // Foundry artifacts carry neither name, so fall back to the file layout.
        let contract_name = raw
            .contract_name
            .or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default();
        let source_name = raw.source_name.or_else(|| {
            path.parent()
                .and_then(|parent| parent.file_name())
                .map(|name| name.to_string_lossy().into_owned())
        });

        let bytecode = decode_bytecode(&contract_name, raw.bytecode.as_hex())?;
        debug!(
            "Loaded artifact of {contract_name} from {path:?} ({} bytes of creation code)",
            bytecode.len()
        );

        Ok(Self {
            contract_name,
            source_name,
            abi: raw.abi,
            bytecode,
        })
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }
}

fn decode_bytecode(contract_name: &str, hex: &str) -> Result<Bytes> {
    // Library placeholders look like `__$<34 hex chars>$__`.
    if hex.contains("__") {
        return Err(Error::UnlinkedLibraries(contract_name.to_string()));
    }
    let bytecode = alloy::hex::decode(hex).map_err(|source| Error::InvalidBytecode {
        name: contract_name.to_string(),
        source,
    })?;
    if bytecode.is_empty() {
        return Err(Error::AbstractContract(contract_name.to_string()));
    }
    Ok(bytecode.into())
}

/// Resolve a contract name to its artifact file.
///
/// A fully qualified name such as `contracts/Token.sol:Token` maps straight to a file. A bare
/// name has to be unique across the whole artifacts directory.
pub fn find_artifact_path(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf> {
    let not_found = || Error::ArtifactNotFound {
        name: contract_name.to_string(),
        dir: artifacts_dir.to_path_buf(),
    };

    if let Some((source_name, name)) = contract_name.rsplit_once(':') {
        let path = artifacts_dir
            .join(source_name)
            .join(format!("{name}.json"));
        return if path.is_file() {
            Ok(path)
        } else {
            Err(not_found())
        };
    }

    if !artifacts_dir.is_dir() {
        error!("Artifacts directory {artifacts_dir:?} does not exist, has the contract been compiled?");
        return Err(not_found());
    }

    let file_name = format!("{contract_name}.json");
    let mut candidates = vec![];
    for entry in WalkDir::new(artifacts_dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
            candidates.push(entry.into_path());
        }
    }

    match candidates.len() {
        0 => Err(not_found()),
        1 => Ok(candidates.remove(0)),
        _ => {
            let mut candidates: Vec<String> = candidates
                .iter()
                .map(|path| fully_qualified_name(artifacts_dir, path, contract_name))
                .collect();
            candidates.sort();
            Err(Error::AmbiguousArtifact {
                name: contract_name.to_string(),
                candidates,
            })
        }
    }
}

fn fully_qualified_name(artifacts_dir: &Path, path: &Path, contract_name: &str) -> String {
    let source = path
        .parent()
        .and_then(|parent| parent.strip_prefix(artifacts_dir).ok())
        .map(|source| source.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    format!("{source}:{contract_name}")
}
