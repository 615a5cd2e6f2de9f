// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_lines;
mod test_links;
mod test_truncate;
mod utils;
