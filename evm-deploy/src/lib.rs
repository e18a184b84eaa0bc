// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use alloy::transports::http::reqwest;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::sync::LazyLock;

#[macro_use]
extern crate tracing;

pub mod abi;
pub mod artifact;
pub mod common;
pub mod deployer;
mod error;
pub mod factory;
pub mod testnet;
pub mod transaction_config;
pub mod utils;

pub use artifact::Artifact;
pub use deployer::{deploy_contract, Deployment};
pub use error::{Error, Result};
pub use factory::{
    ArtifactResolver, ContractFactory, Factory, FactoryResolver, Pending, PendingDeployment,
};
pub use transaction_config::{MaxFeePerGas, TransactionConfig};

#[allow(clippy::expect_used)]
static PUBLIC_ARBITRUM_ONE_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://arb1.arbitrum.io/rpc"
        .parse()
        .expect("Invalid RPC URL")
});

#[allow(clippy::expect_used)]
static PUBLIC_ARBITRUM_SEPOLIA_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://sepolia-rollup.arbitrum.io/rpc"
        .parse()
        .expect("Invalid RPC URL")
});

/// An EVM network reachable over HTTP that isn't one of the well-known ones.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomNetwork {
    #[serde_as(as = "DisplayFromStr")]
    pub rpc_url_http: reqwest::Url,
}

impl CustomNetwork {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let rpc_url_http = reqwest::Url::parse(rpc_url)
            .map_err(|err| Error::InvalidRpcUrl(format!("{rpc_url}: {err}")))?;
        Ok(Self { rpc_url_http })
    }
}

/// The network a contract gets deployed to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Network {
    ArbitrumOne,
    ArbitrumSepolia,
    Custom(CustomNetwork),
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::ArbitrumOne => write!(f, "evm-arbitrum-one"),
            Network::ArbitrumSepolia => write!(f, "evm-arbitrum-sepolia"),
            Network::Custom(_) => write!(f, "evm-custom"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "evm-arbitrum-one" | "arbitrum-one" => Ok(Network::ArbitrumOne),
            "evm-arbitrum-sepolia" | "arbitrum-sepolia" => Ok(Network::ArbitrumSepolia),
            _ => Err(Error::FailedToGetEvmNetwork(format!(
                "unknown EVM network '{s}'"
            ))),
        }
    }
}

impl Network {
    /// Select the network from the environment, see [`utils::get_evm_network`].
    pub fn new(local: bool) -> Result<Self> {
        utils::get_evm_network(local).inspect_err(|err| {
            warn!("Failed to select EVM network from ENV: {err}");
        })
    }

    pub fn new_custom(rpc_url: &str) -> Result<Self> {
        Ok(Self::Custom(CustomNetwork::new(rpc_url)?))
    }

    pub fn rpc_url(&self) -> &reqwest::Url {
        match self {
            Network::ArbitrumOne => &PUBLIC_ARBITRUM_ONE_HTTP_RPC_URL,
            Network::ArbitrumSepolia => &PUBLIC_ARBITRUM_SEPOLIA_HTTP_RPC_URL,
            Network::Custom(custom) => &custom.rpc_url_http,
        }
    }
}
