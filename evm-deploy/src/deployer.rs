// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, TxHash};
use crate::factory::{Factory, FactoryResolver, Pending};
use crate::Result;

/// A confirmed contract deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Resolve `contract_name`, deploy it with `args` and wait for the deployment to be confirmed.
///
/// Nothing is retried: a failure in any step is returned as is. Calling this twice deploys the
/// contract twice.
pub async fn deploy_contract<R>(
    resolver: &R,
    contract_name: &str,
    args: &[&str],
) -> Result<Deployment>
where
    R: FactoryResolver,
{
    let factory = resolver.get_contract_factory(contract_name).await?;
    let pending = factory.deploy(args).await?;
    let tx_hash = pending.tx_hash();

    let address = pending.deployed().await?;
    info!("{contract_name} deployed to {address} in tx {tx_hash}");

    Ok(Deployment {
        contract_name: contract_name.to_string(),
        address,
        tx_hash,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;
    use alloy::primitives::{address, b256};
    use std::cell::Cell;

    const STUB_ADDRESS: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const STUB_TX_HASH: TxHash =
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111");

    struct StubResolver {
        resolve: bool,
        resolved: Cell<usize>,
    }

    struct StubFactory;

    struct StubPending;

    impl FactoryResolver for StubResolver {
        type Factory = StubFactory;

        async fn get_contract_factory(&self, contract_name: &str) -> Result<StubFactory> {
            if !self.resolve {
                return Err(Error::AbstractContract(contract_name.to_string()));
            }
            self.resolved.set(self.resolved.get() + 1);
            Ok(StubFactory)
        }
    }

    impl Factory for StubFactory {
        type Pending = StubPending;

        fn contract_name(&self) -> &str {
            "Stub"
        }

        async fn deploy(&self, _args: &[&str]) -> Result<StubPending> {
            Ok(StubPending)
        }
    }

    impl Pending for StubPending {
        fn tx_hash(&self) -> TxHash {
            STUB_TX_HASH
        }

        async fn deployed(self) -> Result<Address> {
            Ok(STUB_ADDRESS)
        }
    }

    #[tokio::test]
    async fn deployment_carries_address_and_tx_hash() {
        let resolver = StubResolver {
            resolve: true,
            resolved: Cell::new(0),
        };

        let deployment = deploy_contract(&resolver, "Stub", &[]).await.unwrap();
        assert_eq!(
            deployment,
            Deployment {
                contract_name: "Stub".to_string(),
                address: STUB_ADDRESS,
                tx_hash: STUB_TX_HASH,
            }
        );
        assert_eq!(resolver.resolved.get(), 1);
    }

    #[tokio::test]
    async fn resolution_failure_is_returned_unchanged() {
        let resolver = StubResolver {
            resolve: false,
            resolved: Cell::new(0),
        };

        let err = deploy_contract(&resolver, "Stub", &[]).await.unwrap_err();
        assert!(matches!(err, Error::AbstractContract(name) if name == "Stub"));
        assert_eq!(resolver.resolved.get(), 0);
    }
}
