// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disassembler example.
//!
//! Run with:
//! `cargo run -p swamp_disasm --example disasm`
//!
//! or pass an encoding name and a hex stream:
//! `cargo run -p swamp_disasm --example disasm -- compact 0a000102 06`

use swamp_disasm::disasm::disassemble_with;
use swamp_disasm::encoding::Encoding;

const DEMO: &str = "17000000000100000002000000000b00270000000002000000010006";

fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if !digits.len().is_multiple_of(2) {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = core::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let (enc, hex) = match args.next() {
        Some(name) => match name.parse::<Encoding>() {
            Ok(enc) => (enc, args.collect::<Vec<_>>().join("")),
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        },
        None => (Encoding::FRAME, DEMO.to_owned()),
    };

    let Some(bytes) = parse_hex(&hex) else {
        eprintln!("error: input is not a hex byte stream");
        return;
    };
    match disassemble_with(&bytes, &enc) {
        Ok(listing) => {
            print!("{listing}");
            for bad in listing.invalid_jump_targets() {
                println!(
                    "; warning: {} jumps to {} ({})",
                    bad.src_pc,
                    bad.target_pc,
                    if bad.out_of_range {
                        "past end of stream"
                    } else {
                        "inside an instruction"
                    }
                );
            }
        }
        Err(e) => eprintln!("error: {e}"),
    }
}
