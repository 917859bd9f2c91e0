// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use swamp_disasm::disasm::{disassemble_traced, disassemble_with};
use swamp_disasm::encoding::Encoding;
use swamp_disasm::opcode::Opcode;
use swamp_disasm::operand::{Label, Pc};
use swamp_disasm::trace::{TraceMask, TraceSink};

fn bench_decode(c: &mut Criterion) {
    bench_arith_chain(c);
    bench_arith_chain_traced(c);
    bench_case_tables(c);
    bench_render(c);
}

/// `add 0,1,2` repeated `n` times, then `ret`.
fn build_arith_chain(n: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(n * 4 + 1);
    for i in 0..n {
        let r = u8::try_from(i % 200).unwrap();
        out.extend_from_slice(&[Opcode::Add as u8, r, r + 1, r + 2]);
    }
    out.push(Opcode::Return as u8);
    out
}

/// `n` enum-case instructions with an eight-entry jump table each, then `ret`.
fn build_case_tables(n: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..n {
        out.extend_from_slice(&[Opcode::EnumCase as u8, 0, 1, 8]);
        for tag in 0..8_u8 {
            out.extend_from_slice(&[tag, 2, 3, 4, 1]);
        }
    }
    out.push(Opcode::Return as u8);
    out
}

fn bench_arith_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("arith_chain");
    for &len in &[10_usize, 100, 1000, 10_000] {
        let bytes = build_arith_chain(len);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| {
                let d = disassemble_with(bytes, &Encoding::COMPACT).unwrap();
                black_box(d);
            });
        });
    }
    group.finish();
}

#[derive(Default)]
struct Counting {
    instrs: u64,
    labels: u64,
}

impl TraceSink for Counting {
    fn mask(&self) -> TraceMask {
        TraceMask::INSTR | TraceMask::LABEL
    }

    fn instr(&mut self, _pc: Pc, _opcode: Opcode, _byte_len: usize) {
        self.instrs += 1;
    }

    fn label(&mut self, _pc: Pc, _label: &Label) {
        self.labels += 1;
    }
}

fn bench_arith_chain_traced(c: &mut Criterion) {
    let mut group = c.benchmark_group("arith_chain_traced");
    for &len in &[10_usize, 100, 1000] {
        let bytes = build_arith_chain(len);
        let mut sink = Counting::default();
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| {
                let d = disassemble_traced(bytes, &Encoding::COMPACT, Some(&mut sink)).unwrap();
                black_box(d);
            });
        });
        black_box((sink.instrs, sink.labels));
    }
    group.finish();
}

fn bench_case_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("case_tables");
    for &len in &[1_usize, 16, 256] {
        let bytes = build_case_tables(len);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| {
                let d = disassemble_with(bytes, &Encoding::COMPACT).unwrap();
                black_box(d);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &len in &[100_usize, 1000] {
        let d = disassemble_with(&build_arith_chain(len), &Encoding::COMPACT).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(len), &d, |b, d| {
            b.iter(|| black_box(d.to_string()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
