// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::Result;
use std::io::Write;

pub(crate) const SUCCESS_EXIT_CODE: u8 = 0;
/// Every failure, whatever the cause, ends the process with this code.
pub(crate) const DEPLOYMENT_FAILED_EXIT_CODE: u8 = 1;

/// Report the outcome of a run, writing the full error report to `stderr` on failure.
pub(crate) fn report<T>(result: &Result<T>, stderr: &mut impl Write) -> u8 {
    match result {
        Ok(_) => SUCCESS_EXIT_CODE,
        Err(err) => {
            error!("Deployment failed: {err:?}");
            let _ = writeln!(stderr, "{err:?}");
            DEPLOYMENT_FAILED_EXIT_CODE
        }
    }
}
