// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Numeric core: surplus allocation, timeline projection, momentum scoring
//! and feasibility prediction.

pub mod allocation;
pub mod feasibility;
pub mod momentum;
pub mod timeline;

/// Reserved month count meaning "not reachable under current inputs".
pub const NEVER_MONTHS: i64 = 999;
