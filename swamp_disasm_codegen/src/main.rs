// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![doc = "Code generator for the `swamp_disasm` opcode table.\n\n\
          This is a std-only build tool crate. It is not shipped as part of the decoder.\n"]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Deserialize, Clone)]
struct Spec {
    version: u32,
    opcodes: Vec<OpcodeSpec>,
}

#[derive(Deserialize, Clone)]
struct OpcodeSpec {
    name: String,
    mnemonic: String,
    byte: String,
    terminator: bool,
    doc: String,
}

fn parse_u8_hex(s: &str) -> Result<u8> {
    let s = s.trim();
    let raw = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u8::from_str_radix(raw, 16).with_context(|| format!("invalid opcode byte '{s}'"))
}

fn fmt_hex_u8(b: u8) -> String {
    format!("0x{b:02X}")
}

fn sort_and_validate_ops(ops: &mut [(u8, OpcodeSpec)]) -> Result<()> {
    ops.sort_by(|(b0, o0), (b1, o1)| b0.cmp(b1).then_with(|| o0.name.cmp(&o1.name)));

    for w in ops.windows(2) {
        let (b0, o0) = &w[0];
        let (b1, o1) = &w[1];
        if b0 == b1 {
            bail!(
                "duplicate opcode byte {}: {} and {}",
                fmt_hex_u8(*b0),
                o0.name,
                o1.name
            );
        }
    }

    let mut names: Vec<&str> = ops.iter().map(|(_, o)| o.name.as_str()).collect();
    names.sort_unstable();
    if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
        bail!("duplicate opcode name '{}'", w[0]);
    }

    let mut mnemonics: Vec<&str> = ops.iter().map(|(_, o)| o.mnemonic.as_str()).collect();
    mnemonics.sort_unstable();
    if let Some(w) = mnemonics.windows(2).find(|w| w[0] == w[1]) {
        bail!("duplicate mnemonic '{}'", w[0]);
    }
    Ok(())
}

fn validate_op(op: &OpcodeSpec) -> Result<()> {
    let mut chars = op.name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => bail!(
            "opcode name '{}' must start with an uppercase letter",
            op.name
        ),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric()) {
        bail!("opcode name '{}' must be alphanumeric", op.name);
    }
    if op.mnemonic.is_empty()
        || !op
            .mnemonic
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        bail!(
            "mnemonic '{}' for opcode {} must be lowercase alphanumeric",
            op.mnemonic,
            op.name
        );
    }
    if op.doc.contains('\n') {
        bail!("doc for opcode {} must be a single line", op.name);
    }
    Ok(())
}

fn generate(spec: Spec) -> Result<String> {
    if spec.version != 1 {
        bail!("unsupported opcodes.json version {}", spec.version);
    }

    let mut ops: Vec<(u8, OpcodeSpec)> = Vec::with_capacity(spec.opcodes.len());
    for op in spec.opcodes {
        validate_op(&op)?;
        let b = parse_u8_hex(&op.byte)?;
        ops.push((b, op));
    }
    sort_and_validate_ops(&mut ops)?;

    let mut out = String::new();
    out.push_str("// Copyright 2026 the Swamp Disasm Authors\n");
    out.push_str("// SPDX-License-Identifier: Apache-2.0 OR MIT\n\n");
    out.push_str("// @generated by swamp_disasm_codegen. Do not edit by hand.\n");
    out.push('\n');

    out.push_str("/// Opcode byte values for the Swamp instruction set.\n");
    out.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    out.push_str("#[repr(u8)]\n");
    out.push_str("pub enum Opcode {\n");
    for (b, op) in &ops {
        out.push_str(&format!("    /// {}\n", op.doc));
        out.push_str(&format!("    {} = {},\n", op.name, fmt_hex_u8(*b)));
    }
    out.push_str("}\n\n");

    out.push_str("/// Per-opcode metadata used by decode and disasm.\n");
    out.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n");
    out.push_str("pub struct OpcodeInfo {\n");
    out.push_str("    /// Stable, parseable opcode name.\n");
    out.push_str("    pub mnemonic: &'static str,\n");
    out.push_str("    /// Whether this opcode terminates the current basic block.\n");
    out.push_str("    pub is_terminator: bool,\n");
    out.push_str("}\n\n");

    out.push_str("impl Opcode {\n");
    out.push_str("    /// Every opcode, in byte order.\n");
    out.push_str("    pub const ALL: &'static [Self] = &[\n");
    for (_, op) in &ops {
        out.push_str(&format!("        Self::{},\n", op.name));
    }
    out.push_str("    ];\n\n");

    out.push_str("    /// Parses an opcode from its byte value.\n");
    out.push_str("    #[must_use]\n");
    out.push_str("    pub const fn from_u8(b: u8) -> Option<Self> {\n");
    out.push_str("        match b {\n");
    for (b, op) in &ops {
        out.push_str(&format!(
            "            {} => Some(Self::{}),\n",
            fmt_hex_u8(*b),
            op.name
        ));
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    out.push_str("    /// Returns the metadata for this opcode.\n");
    out.push_str("    #[must_use]\n");
    out.push_str("    pub const fn info(self) -> OpcodeInfo {\n");
    out.push_str("        match self {\n");
    for (_, op) in &ops {
        out.push_str(&format!("            Self::{} => OpcodeInfo {{\n", op.name));
        out.push_str(&format!("                mnemonic: \"{}\",\n", op.mnemonic));
        out.push_str(&format!(
            "                is_terminator: {},\n",
            op.terminator
        ));
        out.push_str("            },\n");
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    Ok(out)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let spec_path: PathBuf = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("swamp_disasm/opcodes.json"));
    let opcode_out_path: PathBuf = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("swamp_disasm/src/opcodes_gen.rs"));
    if args.next().is_some() {
        bail!("usage: swamp_disasm_codegen [spec.json] [opcodes_out.rs]");
    }

    let json =
        fs::read_to_string(&spec_path).with_context(|| format!("read {}", spec_path.display()))?;
    let spec: Spec =
        serde_json::from_str(&json).with_context(|| format!("parse {}", spec_path.display()))?;

    let rendered = generate(spec)?;

    if let Some(parent) = opcode_out_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&opcode_out_path, rendered.as_bytes())
        .with_context(|| format!("write {}", opcode_out_path.display()))?;
    Ok(())
}
