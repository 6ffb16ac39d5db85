// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod importer;
pub mod transactions;
pub mod categories;
pub mod rules;
pub mod team;
pub mod fx;
pub mod reports;
pub mod exporter;
