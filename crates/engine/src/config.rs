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

use serde::{Deserialize, Serialize};

/// Configuration for snapshot reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructConfig {
    /// Number of histogram bands walked on each side of the active band.
    #[serde(default = "default_window_size")]
    pub window_size: u32,
    /// Page size used when streaming tick records from the data source.
    #[serde(default = "default_tick_page_size")]
    pub tick_page_size: usize,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            tick_page_size: default_tick_page_size(),
        }
    }
}

const fn default_window_size() -> u32 {
    100
}

const fn default_tick_page_size() -> usize {
    1000
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
