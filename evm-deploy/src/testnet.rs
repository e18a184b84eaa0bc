// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(clippy::expect_used)]

use crate::{CustomNetwork, Network};
use alloy::network::EthereumWallet;
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;

/// A throwaway local chain to deploy against.
pub struct Testnet {
    anvil: AnvilInstance,
    rpc_url: Url,
}

impl Testnet {
    /// Starts an Anvil node. Nothing is deployed to it yet.
    pub fn new() -> Self {
        let (anvil, rpc_url) = start_node();
        Testnet { anvil, rpc_url }
    }

    pub fn to_network(&self) -> Network {
        Network::Custom(CustomNetwork {
            rpc_url_http: self.rpc_url.clone(),
        })
    }

    /// Wallet of the first default Anvil account.
    pub fn default_wallet(&self) -> EthereumWallet {
        let signer: PrivateKeySigner = self.anvil.keys()[0].clone().into();
        EthereumWallet::from(signer)
    }
}

impl Default for Testnet {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a local Anvil node bound to a specified IP address.
///
/// The `AnvilInstance` `endpoint` function is hardcoded to return "localhost", so we must also
/// return the RPC URL if we want to listen on a different address.
///
/// The `anvil` binary respects the `ANVIL_IP_ADDR` environment variable, but defaults to "localhost".
pub fn start_node() -> (AnvilInstance, Url) {
    let host = std::env::var("ANVIL_IP_ADDR").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("ANVIL_PORT")
        .unwrap_or(0.to_string())
        .parse::<u16>()
        .expect("Invalid port number");

    let anvil = Anvil::new()
        .port(port)
        .try_spawn()
        .expect("Could not spawn Anvil node, install it by running `foundryup`");

    // We have to manually return the RPC URL because the `anvil::endpoint_url()` always returns `localhost`
    let url = Url::parse(&format!("http://{host}:{}", anvil.port())).expect("Failed to parse URL");

    (anvil, url)
}
