// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{Error, Result};
use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::JsonAbi;

/// Turn a textual argument into a value of the given Solidity type.
///
/// Strings are taken verbatim, everything else goes through the dynamic ABI parser, so `"10"`
/// becomes a `uint256` and `"0x…"` an `address`.
pub fn coerce_argument(ty: &DynSolType, value: &str) -> alloy::dyn_abi::Result<DynSolValue> {
    match ty {
        DynSolType::String => Ok(DynSolValue::String(value.to_string())),
        _ => ty.coerce_str(value),
    }
}

/// ABI-encode constructor arguments, ready to be appended to the creation bytecode.
pub fn encode_constructor_args(contract_name: &str, abi: &JsonAbi, args: &[&str]) -> Result<Vec<u8>> {
    let Some(constructor) = abi.constructor() else {
        if args.is_empty() {
            return Ok(vec![]);
        }
        return Err(Error::ArgumentCount {
            contract: contract_name.to_string(),
            expected: 0,
            got: args.len(),
        });
    };

    if constructor.inputs.len() != args.len() {
        return Err(Error::ArgumentCount {
            contract: contract_name.to_string(),
            expected: constructor.inputs.len(),
            got: args.len(),
        });
    }

    let values = constructor
        .inputs
        .iter()
        .zip(args)
        .enumerate()
        .map(|(index, (param, value))| {
            let ty = param.resolve()?;
            coerce_argument(&ty, value).map_err(|source| Error::InvalidArgument {
                index,
                value: value.to_string(),
                ty: param.ty.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(constructor.abi_encode_input(&values)?)
}
