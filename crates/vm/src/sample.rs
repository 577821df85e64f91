//! Built-in demonstration program.
//!
//! Multiplies data[2] by data[3] through a subroutine that adds data[3] to
//! itself data[2] times, and stores the product in data[1]. The operands are
//! pushed before the call and popped back in swapped order afterwards.

use toyvm_common::{Condition, Instruction, Opcode, ProgramImage, Word};

const DATASIZE: usize = 20;
const DATAEND: u32 = 10;

/// The demonstration program as a loadable image.
pub fn sample_image() -> ProgramImage {
    use Opcode::*;

    let nc = Condition::Nc as u8;
    let le = Condition::Le as u8;

    let text = vec![
        Instruction::absolute(Push, 0, 2),         // 0
        Instruction::absolute(Push, 0, 3),         // 1
        Instruction::absolute(Call, nc, 10),       // 2
        Instruction::immediate(Add, 15, 2),        // 3
        Instruction::absolute(Store, 0, 1),        // 4
        Instruction::absolute(Pop, 0, 2),          // 5
        Instruction::absolute(Pop, 0, 3),          // 6
        Instruction::bare(Halt),                   // 7
        Instruction::bare(Nop),                    // 8
        Instruction::bare(Nop),                    // 9
        Instruction::indexed(Load, 0, 15, 3),      // 10
        Instruction::indexed(Load, 1, 15, 2),      // 11
        Instruction::immediate(Sub, 1, 1),         // 12
        Instruction::absolute(Branch, le, 17),     // 13
        Instruction::indexed(Add, 0, 15, 3),       // 14
        Instruction::immediate(Sub, 1, 1),         // 15
        Instruction::absolute(Branch, nc, 13),     // 16
        Instruction::bare(Ret),                    // 17
    ];

    let mut data: Vec<Word> = vec![0; DATASIZE];
    data[2] = 20;
    data[3] = 5;

    ProgramImage {
        text,
        data,
        dataend: DATAEND,
    }
}
