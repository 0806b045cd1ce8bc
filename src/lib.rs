// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod models;
pub mod planner;
pub mod settings;
pub mod store;
pub mod utils;

/// Owner used when no user is given.
pub const DEFAULT_USER: &str = "local";
