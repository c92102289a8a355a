// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Widget-side components: binders between text fields and attributes.

pub mod binder;

pub use binder::{AngleCodec, Binder, FloatCodec, TextWidget, ValueCodec, VectorBinder};
