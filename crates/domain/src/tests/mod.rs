// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-module tests for the domain crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]
