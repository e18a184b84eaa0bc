// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use std::time::Duration;

/// Settings applied to a deployment transaction.
#[derive(Clone, Debug)]
pub struct TransactionConfig {
    pub max_fee_per_gas: MaxFeePerGas,
    /// Blocks that have to be built on top of the deployment before it counts as confirmed.
    pub required_confirmations: u64,
    /// Give up waiting for the receipt after this long. `None` waits indefinitely.
    pub confirmation_timeout: Option<Duration>,
    /// Fixed gas limit. `None` lets the node estimate it, which rejects reverting deployments
    /// before they are sent.
    pub gas_limit: Option<u64>,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            max_fee_per_gas: MaxFeePerGas::default(),
            required_confirmations: 1,
            confirmation_timeout: None,
            gas_limit: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaxFeePerGas {
    /// Use the current market price for fee per gas. WARNING: This can result in unexpected high gas fees!
    #[default]
    Auto,
    /// Use the current market price for fee per gas, but with an upper limit.
    LimitedAuto(u128),
    /// Use no max fee per gas. WARNING: This can result in unexpected high gas fees!
    Unlimited,
    /// Use a custom max fee per gas in WEI.
    Custom(u128),
}

impl std::str::FromStr for MaxFeePerGas {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();

        match s.as_str() {
            "auto" => Ok(MaxFeePerGas::Auto),
            "unlimited" => Ok(MaxFeePerGas::Unlimited),
            _ => {
                if let Some(rest) = s.strip_prefix("limited-auto:") {
                    rest.parse::<u128>()
                        .map(MaxFeePerGas::LimitedAuto)
                        .map_err(|_| format!("Invalid limited-auto value: {rest}"))
                } else {
                    s.parse::<u128>()
                        .map(MaxFeePerGas::Custom)
                        .map_err(|_| format!("Invalid custom value: {s}"))
                }
            }
        }
    }
}
