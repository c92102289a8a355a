// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Document model: observable nodes, the analysis document and its
//! persistence.

pub mod analysis;
pub mod node;
pub mod persistence;

pub use analysis::AnalysisModel;
pub use node::{Document, InvalidValue, NodeId, Validator, Value, View, ViewId};
pub use persistence::{DocumentFormatError, MAGIC, load_model, read_model, save_model, write_model};
