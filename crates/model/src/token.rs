// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use std::fmt::Display;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// An ERC-20 token with the metadata needed for amount and price rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token contract address.
    pub address: Address,
    /// The token name.
    pub name: String,
    /// The token symbol.
    pub symbol: String,
    /// The number of decimal places the token uses.
    pub decimals: u8,
}

impl Token {
    /// Creates a new [`Token`] with the specified parameters.
    #[must_use]
    pub fn new(address: Address, name: String, symbol: String, decimals: u8) -> Self {
        Self {
            address,
            name,
            symbol,
            decimals,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_token_display_uses_symbol() {
        let token = Token::new(
            Address::ZERO,
            "Wrapped Ether".to_string(),
            "WETH".to_string(),
            18,
        );
        assert_eq!(token.to_string(), "WETH");
    }
}
