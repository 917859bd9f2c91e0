// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `swamp_disasm` live in `benches/`.
