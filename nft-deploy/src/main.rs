// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[macro_use]
extern crate tracing;

mod deploy;
mod exit_code;
mod logging;
mod opt;

use crate::logging::LogBuilder;
use crate::opt::Opt;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use evm_deploy::utils::{http_provider_with_wallet, load_wallet_from_env, wallet_address};
use evm_deploy::{ArtifactResolver, Network, TransactionConfig};
use std::io::Write;
use std::process::ExitCode;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("Failed to install the error report handler: {err}");
    }

    let opt = Opt::parse();

    if opt.version {
        println!("nft-deploy {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if opt.crate_version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let (result, log_guard) = match init_logging(&opt) {
        Ok(log_guard) => (run(opt).await, Some(log_guard)),
        Err(err) => (Err(err), None),
    };
    ExitCode::from(finish(&result, log_guard, &mut std::io::stderr()))
}

/// Report the outcome while the log writer is still running, then flush it.
fn finish<T>(result: &Result<T>, log_guard: Option<WorkerGuard>, stderr: &mut impl Write) -> u8 {
    let code = exit_code::report(result, stderr);
    drop(log_guard);
    code
}

async fn run(opt: Opt) -> Result<()> {
    info!("Starting nft-deploy with args: {opt:?}");

    let network = Network::new(opt.local).wrap_err("Failed to select the EVM network")?;
    let wallet =
        load_wallet_from_env().wrap_err("The secret key is required to perform a deployment")?;
    info!(
        "Deploying from {} to {network} at {}",
        wallet_address(&wallet),
        network.rpc_url()
    );

    let transaction_config = TransactionConfig {
        max_fee_per_gas: opt.max_fee_per_gas.unwrap_or_default(),
        ..Default::default()
    };
    let provider = http_provider_with_wallet(network.rpc_url().clone(), wallet);
    let resolver = ArtifactResolver::new(opt.artifacts_dir, provider)
        .with_transaction_config(transaction_config);

    let deployment = deploy::deploy_standard_nft(&resolver, &mut std::io::stdout()).await?;
    debug!("Deployment confirmed in tx {}", deployment.tx_hash);

    Ok(())
}

fn init_logging(opt: &Opt) -> Result<WorkerGuard> {
    let logging_targets = vec![
        ("evm_deploy".to_string(), Level::DEBUG),
        ("nft_deploy".to_string(), Level::DEBUG),
    ];
    let mut log_builder = LogBuilder::new(logging_targets);
    if let Some(output_dest) = &opt.log_output_dest {
        log_builder.output_dest(output_dest.clone());
    }
    if let Some(format) = opt.log_format {
        log_builder.format(format);
    }
    let guard = log_builder.initialize()?;

    if let Some(output_dest) = &opt.log_output_dest {
        debug!("Logging to {output_dest}");
    }
    Ok(guard)
}
