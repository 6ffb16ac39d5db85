// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement normalization pipeline: raw CSV text in, canonical ledger
//! entries out. Stages run per file in a fixed order: tokenize, detect the
//! bank dialect from the header, extract each row into a raw record,
//! classify its economic type, clean the description, categorize, convert
//! currency. Rows never depend on each other.

pub mod csv;
pub mod detect;
pub mod extract;
pub mod classify;
pub mod describe;
pub mod categorize;
pub mod rates;
pub mod import;
pub mod apply;
