// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::abi::encode_constructor_args;
use crate::artifact::Artifact;
use crate::common::{Address, InitCode, TxHash};
use crate::transaction_config::{MaxFeePerGas, TransactionConfig};
use crate::{Error, Result};
use alloy::network::{Ethereum, ReceiptResponse, TransactionBuilder};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionRequest;
use std::future::Future;
use std::path::PathBuf;

/// Turns a contract name into a [`Factory`] for that contract.
pub trait FactoryResolver {
    type Factory: Factory;

    fn get_contract_factory(
        &self,
        contract_name: &str,
    ) -> impl Future<Output = Result<Self::Factory>>;
}

/// Builds and submits deployment transactions for one contract.
pub trait Factory {
    type Pending: Pending;

    fn contract_name(&self) -> &str;

    /// Submit a deployment with the constructor arguments in declaration order.
    fn deploy(&self, args: &[&str]) -> impl Future<Output = Result<Self::Pending>>;
}

/// A submitted deployment that may not be mined yet.
pub trait Pending {
    fn tx_hash(&self) -> TxHash;

    /// Wait until the deployment is confirmed and return the new contract's address.
    fn deployed(self) -> impl Future<Output = Result<Address>>;
}

/// Resolves factories from compiled artifacts on disk, deploying through `provider`.
#[derive(Clone, Debug)]
pub struct ArtifactResolver<P> {
    artifacts_dir: PathBuf,
    provider: P,
    transaction_config: TransactionConfig,
}

impl<P> ArtifactResolver<P> {
    pub fn new(artifacts_dir: impl Into<PathBuf>, provider: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            provider,
            transaction_config: TransactionConfig::default(),
        }
    }

    pub fn with_transaction_config(mut self, transaction_config: TransactionConfig) -> Self {
        self.transaction_config = transaction_config;
        self
    }
}

impl<P> FactoryResolver for ArtifactResolver<P>
where
    P: Provider + Clone,
{
    type Factory = ContractFactory<P>;

    async fn get_contract_factory(&self, contract_name: &str) -> Result<ContractFactory<P>> {
        debug!(
            "Resolving the artifact of {contract_name} in {:?}",
            self.artifacts_dir
        );
        let artifact = Artifact::find(&self.artifacts_dir, contract_name)
            .inspect_err(|err| error!("Failed to resolve the artifact of {contract_name}: {err}"))?;

        Ok(ContractFactory::new(
            artifact,
            self.provider.clone(),
            self.transaction_config.clone(),
        ))
    }
}

/// Deploys a compiled contract through an alloy provider.
pub struct ContractFactory<P> {
    artifact: Artifact,
    provider: P,
    transaction_config: TransactionConfig,
}

impl<P> ContractFactory<P>
where
    P: Provider,
{
    pub fn new(artifact: Artifact, provider: P, transaction_config: TransactionConfig) -> Self {
        Self {
            artifact,
            provider,
            transaction_config,
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    pub fn deploy_code(&self, args: &[&str]) -> Result<InitCode> {
        let encoded_args =
            encode_constructor_args(&self.artifact.contract_name, &self.artifact.abi, args)?;

        let mut code = Vec::with_capacity(self.artifact.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.artifact.bytecode);
        code.extend_from_slice(&encoded_args);
        Ok(code.into())
    }

    async fn transaction_request(&self, code: InitCode) -> Result<TransactionRequest> {
        let mut transaction_request = TransactionRequest::default().with_deploy_code(code);

        if let Some(gas_limit) = self.transaction_config.gas_limit {
            transaction_request.set_gas_limit(gas_limit);
        }

        match self.transaction_config.max_fee_per_gas {
            MaxFeePerGas::Auto | MaxFeePerGas::Unlimited => {}
            MaxFeePerGas::LimitedAuto(limit) => {
                let current = self.provider.get_gas_price().await?;
                if current > limit {
                    error!("Gas price {current} is above the max fee per gas limit of {limit}");
                    return Err(Error::GasPriceAboveLimit { current, limit });
                }
                self.cap_fees(&mut transaction_request, limit).await?;
            }
            MaxFeePerGas::Custom(max_fee_per_gas) => {
                self.cap_fees(&mut transaction_request, max_fee_per_gas).await?;
            }
        }

        Ok(transaction_request)
    }

    /// Set the max fee and an estimated priority fee that never exceeds it.
    async fn cap_fees(
        &self,
        transaction_request: &mut TransactionRequest,
        max_fee_per_gas: u128,
    ) -> Result<()> {
        let estimation = self.provider.estimate_eip1559_fees().await?;
        let max_priority_fee_per_gas = estimation.max_priority_fee_per_gas.min(max_fee_per_gas);
        debug!(
            "Using max fee per gas {max_fee_per_gas} with priority fee {max_priority_fee_per_gas}"
        );

        transaction_request.set_max_fee_per_gas(max_fee_per_gas);
        transaction_request.set_max_priority_fee_per_gas(max_priority_fee_per_gas);
        Ok(())
    }
}

impl<P> Factory for ContractFactory<P>
where
    P: Provider,
{
    type Pending = PendingDeployment;

    fn contract_name(&self) -> &str {
        &self.artifact.contract_name
    }

    async fn deploy(&self, args: &[&str]) -> Result<PendingDeployment> {
        let contract_name = self.contract_name().to_string();
        debug!("Deploying {contract_name} with constructor arguments {args:?}");

        let code = self.deploy_code(args)?;
        let transaction_request = self.transaction_request(code).await?;

        let pending_tx_builder = self
            .provider
            .send_transaction(transaction_request)
            .await
            .inspect_err(|err| {
                error!("Error to send_transaction during deployment of {contract_name}: {err:?}")
            })?
            .with_required_confirmations(self.transaction_config.required_confirmations)
            .with_timeout(self.transaction_config.confirmation_timeout);

        let tx_hash = *pending_tx_builder.tx_hash();
        info!("{contract_name} deployment is pending with tx hash: {tx_hash}");

        Ok(PendingDeployment {
            contract_name,
            tx_hash,
            pending_tx_builder,
        })
    }
}

/// A deployment transaction that has been accepted by the node.
pub struct PendingDeployment {
    contract_name: String,
    tx_hash: TxHash,
    pending_tx_builder: PendingTransactionBuilder<Ethereum>,
}

impl Pending for PendingDeployment {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn deployed(self) -> Result<Address> {
        let Self {
            contract_name,
            tx_hash,
            pending_tx_builder,
        } = self;

        let receipt = pending_tx_builder.get_receipt().await.inspect_err(|err| {
            error!("Error waiting for the {contract_name} deployment {tx_hash} to confirm: {err:?}")
        })?;

        if !receipt.status() {
            error!("{contract_name} deployment {tx_hash} was reverted");
            return Err(Error::Reverted(tx_hash));
        }

        receipt
            .contract_address()
            .ok_or(Error::MissingContractAddress(tx_hash))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testnet::Testnet;
    use crate::utils::http_provider_with_wallet;
    use alloy::json_abi::JsonAbi;

    fn factory(
        testnet: &Testnet,
        transaction_config: TransactionConfig,
    ) -> ContractFactory<impl Provider> {
        let provider =
            http_provider_with_wallet(testnet.to_network().rpc_url().clone(), testnet.default_wallet());
        let artifact = Artifact {
            contract_name: "Empty".to_string(),
            source_name: Some("contracts/Empty.sol".to_string()),
            abi: JsonAbi::new(),
            bytecode: vec![0x60, 0x00, 0x80, 0xf3].into(),
        };
        ContractFactory::new(artifact, provider, transaction_config)
    }

    #[tokio::test]
    async fn custom_fee_below_the_estimated_tip_caps_the_tip() {
        let testnet = Testnet::new();
        let factory = factory(
            &testnet,
            TransactionConfig {
                max_fee_per_gas: MaxFeePerGas::Custom(1),
                ..Default::default()
            },
        );

        let request = factory
            .transaction_request(factory.deploy_code(&[]).unwrap())
            .await
            .unwrap();

        assert_eq!(request.max_fee_per_gas, Some(1));
        assert_eq!(request.max_priority_fee_per_gas, Some(1));
    }

    #[tokio::test]
    async fn limited_auto_fee_keeps_the_tip_under_the_limit() {
        let testnet = Testnet::new();
        let provider =
            http_provider_with_wallet(testnet.to_network().rpc_url().clone(), testnet.default_wallet());
        let limit = provider.get_gas_price().await.unwrap();
        let factory = factory(
            &testnet,
            TransactionConfig {
                max_fee_per_gas: MaxFeePerGas::LimitedAuto(limit),
                ..Default::default()
            },
        );

        let request = factory
            .transaction_request(factory.deploy_code(&[]).unwrap())
            .await
            .unwrap();

        assert_eq!(request.max_fee_per_gas, Some(limit));
        assert!(request.max_priority_fee_per_gas.unwrap() <= limit);
    }

    #[tokio::test]
    async fn fixed_gas_limit_is_applied() {
        let testnet = Testnet::new();
        let factory = factory(
            &testnet,
            TransactionConfig {
                gas_limit: Some(100_000),
                ..Default::default()
            },
        );

        let request = factory
            .transaction_request(factory.deploy_code(&[]).unwrap())
            .await
            .unwrap();

        assert_eq!(request.gas, Some(100_000));
        assert_eq!(request.max_fee_per_gas, None);
    }
}
