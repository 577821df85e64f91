//! Text renderings of machine state for debugging front ends.

use std::fmt::Write;

use toyvm_common::{Instruction, Word};

use crate::machine::Machine;

/// `TRACE: <msg>: 0x<addr>: <mnemonic>`.
pub fn trace_line(msg: &str, addr: u32, instr: &Instruction) -> String {
    format!("TRACE: {msg}: 0x{addr:04x}: {instr}")
}

/// Program listing, one instruction per line with address and raw word.
pub fn format_program(machine: &Machine) -> String {
    let mut out = format!("\n*** PROGRAM (size: {}) ***\n", machine.text().len());
    for (addr, instr) in machine.text().iter().enumerate() {
        let _ = writeln!(out, "0x{addr:04x}: 0x{:08x} \t {instr}", instr.encode());
    }
    out.push('\n');
    out
}

/// Data segment, three words per line in hex and decimal.
pub fn format_data(machine: &Machine) -> String {
    let mut out = format!(
        "*** DATA (size: {}, end = 0x{:08x} ({})) ***",
        machine.data().len(),
        machine.dataend(),
        machine.dataend()
    );
    for (addr, word) in machine.data().iter().enumerate() {
        if addr % 3 == 0 {
            out.push('\n');
        }
        let _ = write!(out, "0x{addr:04x}: 0x{word:08x} {word:<4}   ");
    }
    out.push_str("\n\n");
    out
}

/// Program counter, condition code and registers, three per line.
pub fn format_cpu(machine: &Machine) -> String {
    let mut out = format!(
        "\n*** CPU ***\nPC:  0x{:08x}   CC: {}\n",
        machine.pc(),
        machine.cc().letter()
    );
    for (index, value) in machine.registers().iter().enumerate() {
        if index % 3 == 0 {
            out.push('\n');
        }
        let _ = write!(out, "R{index:02}: 0x{value:08x} {value:<4}   ");
    }
    out.push_str("\n\n");
    out
}

/// Both segments as C array initializers, four words per line.
pub fn format_dump(machine: &Machine) -> String {
    let mut out = String::from("Instruction text[] = {");
    push_words(&mut out, machine.text().iter().map(|i| i.encode()));
    let _ = write!(out, "\n}};\nunsigned textsize = {};\n\n", machine.text().len());

    out.push_str("Word data[] = {");
    push_words(&mut out, machine.data().iter().map(|&w: &Word| w as u32));
    let _ = writeln!(
        out,
        "\n}};\nunsigned datasize = {};\nunsigned dataend = {};",
        machine.data().len(),
        machine.dataend()
    );
    out
}

fn push_words(out: &mut String, words: impl Iterator<Item = u32>) {
    for (i, word) in words.enumerate() {
        if i % 4 == 0 {
            out.push_str("\n    ");
        }
        let _ = write!(out, "0x{word:08x}, ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toyvm_common::Opcode;

    fn machine() -> Machine {
        let mut machine = Machine::new();
        machine.load(
            vec![
                Instruction::immediate(Opcode::Load, 2, 5),
                Instruction::bare(Opcode::Halt),
            ],
            vec![0, -1, 20, 5],
            1,
        );
        machine
    }

    #[test]
    fn trace_format() {
        let instr = Instruction::absolute(Opcode::Pop, 0, 3);
        assert_eq!(
            trace_line("Executing", 6, &instr),
            "TRACE: Executing: 0x0006: POP @0x0003"
        );
    }

    #[test]
    fn program_listing() {
        let word = Instruction::immediate(Opcode::Load, 2, 5).encode();
        let expected = format!(
            "\n*** PROGRAM (size: 2) ***\n0x0000: 0x{word:08x} \t LOAD R02, #5\n0x0001: 0x0000000b \t HALT\n\n"
        );
        assert_eq!(format_program(&machine()), expected);
    }

    #[test]
    fn data_listing_three_per_line() {
        let text = format_data(&machine());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "*** DATA (size: 4, end = 0x00000001 (1)) ***");
        assert_eq!(
            lines[1],
            "0x0000: 0x00000000 0      0x0001: 0xffffffff -1     0x0002: 0x00000014 20     "
        );
        assert_eq!(lines[2], "0x0003: 0x00000005 5      ");
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn cpu_listing() {
        let text = format_cpu(&machine());
        assert!(text.starts_with("\n*** CPU ***\nPC:  0x00000000   CC: U\n\n"));
        assert!(text.contains("R00: 0x00000000 0      R01: 0x00000000 0      R02:"));
        assert!(text.contains("R15: 0x00000000 0      \n\n"));
    }

    #[test]
    fn dump_listing() {
        let text = format_dump(&machine());
        assert!(text.starts_with("Instruction text[] = {\n    0x"));
        assert!(text.contains("0x0000000b, \n};\nunsigned textsize = 2;\n\n"));
        assert!(text.contains(
            "Word data[] = {\n    0x00000000, 0xffffffff, 0x00000014, 0x00000005, \n};"
        ));
        assert!(text.ends_with("unsigned datasize = 4;\nunsigned dataend = 1;\n"));
    }
}
