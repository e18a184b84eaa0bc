// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::logging::{LogFormat, LogOutputDest};
use clap::Parser;
use evm_deploy::artifact::DEFAULT_ARTIFACTS_DIR;
use evm_deploy::MaxFeePerGas;
use std::path::PathBuf;

// Please do not remove the blank lines in these doc comments.
// They are used for inserting line breaks when the help menu is rendered in the UI.

/// Deploy the StandardNFT contract.
///
/// The network is taken from `RPC_URL` or `EVM_NETWORK` and the deploying account from
/// `SECRET_KEY`.
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// Deploy to the local development chain at http://localhost:8545 when no network is
    /// configured through the environment.
    #[clap(long)]
    pub local: bool,

    /// Directory holding the compiled contract artifacts.
    #[clap(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Max fee per gas for the deployment transaction.
    ///
    /// Valid values are "auto", "unlimited", "limited-auto:<WEI AMOUNT>" or an amount in WEI.
    ///
    /// If the argument is not used, "auto" is applied.
    #[clap(long, verbatim_doc_comment)]
    pub max_fee_per_gas: Option<MaxFeePerGas>,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    ///
    /// If the argument is not used, the default format will be applied.
    #[clap(long, value_parser = LogFormat::parse_from_str, verbatim_doc_comment)]
    pub log_format: Option<LogFormat>,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stderr", "stdout", "data-dir", or a custom path.
    ///
    /// `stderr` is the default value.
    ///
    /// The data directory location is platform specific:
    ///  - Linux: $HOME/.local/share/nft-deploy/logs
    ///  - macOS: $HOME/Library/Application Support/nft-deploy/logs
    ///  - Windows: C:\Users\<username>\AppData\Roaming\nft-deploy\logs
    #[clap(long, value_parser = LogOutputDest::parse_from_str, verbatim_doc_comment)]
    pub log_output_dest: Option<LogOutputDest>,

    /// Print the crate version.
    #[clap(long)]
    pub crate_version: bool,

    /// Print the version.
    #[clap(long)]
    pub version: bool,
}
