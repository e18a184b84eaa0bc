// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::{Result, WrapErr};
use evm_deploy::{deploy_contract, Deployment, FactoryResolver};
use std::io::Write;

pub(crate) const CONTRACT_NAME: &str = "StandardNFT";

// Numeric values are in the token's smallest unit, 1 ETH = 10^18 WEI.
pub(crate) const CONSTRUCTOR_ARGS: [&str; 5] = ["My NFT", "MNFT", "URI", "10", "10000"];

/// Deploy `StandardNFT` and print where it ended up to `stdout`.
pub(crate) async fn deploy_standard_nft<R>(resolver: &R, stdout: &mut impl Write) -> Result<Deployment>
where
    R: FactoryResolver,
{
    let deployment = deploy_contract(resolver, CONTRACT_NAME, &CONSTRUCTOR_ARGS)
        .await
        .wrap_err_with(|| format!("Failed to deploy {CONTRACT_NAME}"))?;

    writeln!(stdout, "{}", success_message(&deployment))?;
    Ok(deployment)
}

pub(crate) fn success_message(deployment: &Deployment) -> String {
    format!(
        "🧑‍🍳 {} has been deployed to {}!",
        deployment.contract_name, deployment.address
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exit_code::{report, DEPLOYMENT_FAILED_EXIT_CODE, SUCCESS_EXIT_CODE};
    use evm_deploy::common::{Address, TxHash};
    use evm_deploy::{Error, Factory, Pending};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Records every deployment and hands out a fresh address for each.
    #[derive(Default)]
    struct MockChain {
        fail_resolution: bool,
        fail_confirmation: bool,
        deployments: RefCell<Vec<Vec<String>>>,
        resolved: RefCell<Vec<String>>,
        next_id: Cell<u8>,
    }

    struct MockResolver(Rc<MockChain>);

    struct MockFactory(Rc<MockChain>);

    struct MockPending {
        id: u8,
        fail: bool,
    }

    impl FactoryResolver for MockResolver {
        type Factory = MockFactory;

        async fn get_contract_factory(&self, contract_name: &str) -> evm_deploy::Result<MockFactory> {
            if self.0.fail_resolution {
                return Err(Error::ArtifactNotFound {
                    name: contract_name.to_string(),
                    dir: "artifacts".into(),
                });
            }
            self.0.resolved.borrow_mut().push(contract_name.to_string());
            Ok(MockFactory(Rc::clone(&self.0)))
        }
    }

    impl Factory for MockFactory {
        type Pending = MockPending;

        fn contract_name(&self) -> &str {
            CONTRACT_NAME
        }

        async fn deploy(&self, args: &[&str]) -> evm_deploy::Result<MockPending> {
            self.0
                .deployments
                .borrow_mut()
                .push(args.iter().map(|arg| arg.to_string()).collect());
            let id = self.0.next_id.get() + 1;
            self.0.next_id.set(id);
            Ok(MockPending {
                id,
                fail: self.0.fail_confirmation,
            })
        }
    }

    impl Pending for MockPending {
        fn tx_hash(&self) -> TxHash {
            TxHash::with_last_byte(self.id)
        }

        async fn deployed(self) -> evm_deploy::Result<Address> {
            if self.fail {
                return Err(Error::Reverted(self.tx_hash()));
            }
            Ok(Address::with_last_byte(self.id))
        }
    }

    async fn run(chain: &Rc<MockChain>) -> (u8, String, String) {
        let resolver = MockResolver(Rc::clone(chain));
        let mut stdout = vec![];
        let mut stderr = vec![];

        let result = deploy_standard_nft(&resolver, &mut stdout).await;
        let code = report(&result, &mut stderr);

        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[tokio::test]
    async fn success_prints_one_line_with_name_and_address() {
        let chain = Rc::new(MockChain::default());

        let (code, stdout, stderr) = run(&chain).await;

        assert_eq!(code, SUCCESS_EXIT_CODE);
        assert!(stderr.is_empty());
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![format!(
                "🧑‍🍳 StandardNFT has been deployed to {}!",
                Address::with_last_byte(1)
            )]
        );
        assert_eq!(*chain.resolved.borrow(), vec!["StandardNFT".to_string()]);
    }

    #[tokio::test]
    async fn constructor_arguments_are_forwarded_in_order() {
        let chain = Rc::new(MockChain::default());

        run(&chain).await;

        assert_eq!(
            *chain.deployments.borrow(),
            vec![vec!["My NFT", "MNFT", "URI", "10", "10000"]]
        );
    }

    #[tokio::test]
    async fn resolution_failure_exits_non_zero_without_deploying() {
        let chain = Rc::new(MockChain {
            fail_resolution: true,
            ..Default::default()
        });

        let (code, stdout, stderr) = run(&chain).await;

        assert_eq!(code, DEPLOYMENT_FAILED_EXIT_CODE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("Failed to deploy StandardNFT"));
        assert!(stderr.contains("Artifact for contract StandardNFT not found"));
        assert!(chain.deployments.borrow().is_empty());
    }

    #[tokio::test]
    async fn confirmation_failure_exits_non_zero() {
        let chain = Rc::new(MockChain {
            fail_confirmation: true,
            ..Default::default()
        });

        let (code, stdout, stderr) = run(&chain).await;

        assert_eq!(code, DEPLOYMENT_FAILED_EXIT_CODE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("was reverted"));
        assert_eq!(chain.deployments.borrow().len(), 1);
    }

    #[tokio::test]
    async fn running_twice_deploys_twice() {
        let chain = Rc::new(MockChain::default());

        let (first_code, first, _) = run(&chain).await;
        let (second_code, second, _) = run(&chain).await;

        assert_eq!(first_code, SUCCESS_EXIT_CODE);
        assert_eq!(second_code, SUCCESS_EXIT_CODE);
        assert_eq!(chain.deployments.borrow().len(), 2);
        assert_ne!(first, second);
        assert!(first.contains(&Address::with_last_byte(1).to_string()));
        assert!(second.contains(&Address::with_last_byte(2).to_string()));
    }
}
