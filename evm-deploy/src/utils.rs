// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use crate::{Error, Network, Result};
use alloy::network::{Ethereum, EthereumWallet, NetworkWallet};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest;
use std::env;
use std::sync::OnceLock;

/// environment variable to connect to a custom EVM network
pub const RPC_URL: &str = "RPC_URL";
/// environment variable selecting a well-known EVM network, or `local`
pub const EVM_NETWORK: &str = "EVM_NETWORK";
/// environment variable holding the hex private key of the deploying account
pub const SECRET_KEY: &str = "SECRET_KEY";

/// The node a local development chain listens on by default.
pub const LOCAL_RPC_URL: &str = "http://localhost:8545";

static SELECTED_EVM_NETWORK: OnceLock<Network> = OnceLock::new();

/// Select the EVM network to deploy to.
///
/// `RPC_URL` wins over `EVM_NETWORK`. If neither is set and `local` is true the local
/// development chain at [`LOCAL_RPC_URL`] is used. Otherwise an error is returned: deploying to a
/// network nobody asked for is worse than not deploying at all.
pub fn get_evm_network(local: bool) -> Result<Network> {
    if let Some(network) = SELECTED_EVM_NETWORK.get() {
        return Ok(network.clone());
    }

    let network = network_from_vars(env::var(RPC_URL).ok(), env::var(EVM_NETWORK).ok(), local)?;
    let _ = SELECTED_EVM_NETWORK.set(network.clone());

    Ok(network)
}

fn network_from_vars(
    rpc_url: Option<String>,
    evm_network: Option<String>,
    local: bool,
) -> Result<Network> {
    if let Some(rpc_url) = rpc_url {
        info!("Using custom EVM network at {rpc_url} from {RPC_URL}");
        return Network::new_custom(&rpc_url);
    }

    match evm_network.as_deref() {
        Some("local") => {
            info!("Using local EVM network as {EVM_NETWORK} is set to 'local'");
            local_evm_network()
        }
        Some(name) => {
            let network = name.parse::<Network>()?;
            info!("Using {network} as {EVM_NETWORK} is set to '{name}'");
            Ok(network)
        }
        None if local => {
            info!("Using local EVM network at {LOCAL_RPC_URL}");
            local_evm_network()
        }
        None => {
            error!("Failed to obtain the desired EVM network through environment variables");
            Err(Error::FailedToGetEvmNetwork(format!(
                "set {RPC_URL} or {EVM_NETWORK}, or pass --local for a local chain"
            )))
        }
    }
}

pub fn local_evm_network() -> Result<Network> {
    Network::new_custom(LOCAL_RPC_URL)
}

/// Load the deploying wallet from the `SECRET_KEY` environment variable.
pub fn load_wallet_from_env() -> Result<EthereumWallet> {
    let secret_key = env::var(SECRET_KEY).map_err(|_| {
        Error::InvalidPrivateKey(format!("make sure you've provided the {SECRET_KEY} env var"))
    })?;
    wallet_from_private_key(&secret_key)
}

/// Create a wallet from a hex encoded private key, with or without `0x` prefix.
pub fn wallet_from_private_key(private_key: &str) -> Result<EthereumWallet> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .map_err(|err| Error::InvalidPrivateKey(format!("{err}")))?;
    Ok(EthereumWallet::from(signer))
}

pub fn wallet_address(wallet: &EthereumWallet) -> Address {
    <EthereumWallet as NetworkWallet<Ethereum>>::default_signer_address(wallet)
}

/// Provider that fills nonce, gas and chain id, and signs with `wallet`.
pub fn http_provider_with_wallet(
    rpc_url: reqwest::Url,
    wallet: EthereumWallet,
) -> impl Provider + Clone {
    ProviderBuilder::new().wallet(wallet).connect_http(rpc_url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // First default Anvil/Hardhat account.
    const DEV_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn rpc_url_takes_precedence() {
        let network = network_from_vars(
            Some("http://10.0.0.1:8545".to_string()),
            Some("arbitrum-one".to_string()),
            false,
        )
        .unwrap();
        assert_eq!(network.rpc_url().as_str(), "http://10.0.0.1:8545/");
    }

    #[test]
    fn named_network_is_selected() {
        let network = network_from_vars(None, Some("arbitrum-sepolia".to_string()), false).unwrap();
        assert_eq!(network, Network::ArbitrumSepolia);

        let network = network_from_vars(None, Some("local".to_string()), false).unwrap();
        assert_eq!(network, local_evm_network().unwrap());
    }

    #[test]
    fn local_flag_is_the_last_resort() {
        let network = network_from_vars(None, None, true).unwrap();
        assert_eq!(network.rpc_url().as_str(), "http://localhost:8545/");

        assert!(matches!(
            network_from_vars(None, None, false),
            Err(Error::FailedToGetEvmNetwork(_))
        ));
    }

    #[test]
    fn unknown_network_name_is_an_error() {
        assert!(network_from_vars(None, Some("moonbase".to_string()), true).is_err());
    }

    #[test]
    fn wallet_is_built_from_private_key() {
        let wallet = wallet_from_private_key(DEV_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet_address(&wallet),
            alloy::primitives::address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let without_prefix = wallet_from_private_key(&DEV_PRIVATE_KEY[2..]).unwrap();
        assert_eq!(wallet_address(&without_prefix), wallet_address(&wallet));

        assert!(matches!(
            wallet_from_private_key("0x1234"),
            Err(Error::InvalidPrivateKey(_))
        ));
    }
}
