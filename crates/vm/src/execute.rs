//! Instruction decode and execution.

use toyvm_common::{Condition, ConditionCode, Instruction, Opcode, Operand, Word};

use crate::error::{Fault, FaultKind, Reporter, Warning, WarningKind};
use crate::machine::{Machine, NREGISTERS};

impl Machine {
    /// Fetch the instruction at `pc`, advance `pc`, and execute it.
    ///
    /// Returns `Ok(false)` once HALT has executed, `Ok(true)` otherwise.
    pub fn step<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<bool, Fault> {
        let addr = self.pc;
        let instr = self.fetch()?;
        reporter.trace(addr, &instr);
        self.pc += 1;
        self.decode_execute(instr, addr, reporter)
    }

    /// Execute `instr`, fetched from text address `addr`.
    ///
    /// `pc` must already point past `instr`. Faults are reported at `addr`.
    pub fn decode_execute<R: Reporter + ?Sized>(
        &mut self,
        instr: Instruction,
        addr: u32,
        reporter: &mut R,
    ) -> Result<bool, Fault> {
        let opcode = instr
            .opcode()
            .map_err(|_| Fault::new(FaultKind::UnknownInstruction, addr))?;

        match opcode {
            Opcode::Illop => return Err(Fault::new(FaultKind::IllegalInstruction, addr)),
            Opcode::Nop => {}
            Opcode::Load => {
                let reg = self.register_index(instr.regcond, addr)?;
                self.registers[reg] = self.operand_value(&instr, addr)?;
                self.update_cc(reg);
            }
            Opcode::Store => {
                let reg = self.register_index(instr.regcond, addr)?;
                let dest = self.data_address(&instr, addr)?;
                self.data[dest] = self.registers[reg];
            }
            Opcode::Add => {
                let reg = self.register_index(instr.regcond, addr)?;
                let value = self.operand_value(&instr, addr)?;
                self.registers[reg] = self.registers[reg].wrapping_add(value);
                self.update_cc(reg);
            }
            Opcode::Sub => {
                let reg = self.register_index(instr.regcond, addr)?;
                let value = self.operand_value(&instr, addr)?;
                self.registers[reg] = self.registers[reg].wrapping_sub(value);
                self.update_cc(reg);
            }
            Opcode::Branch => {
                if let Some(target) = self.jump_target(&instr, addr)? {
                    self.pc = target;
                }
            }
            Opcode::Call => {
                if let Some(target) = self.jump_target(&instr, addr)? {
                    self.push_word(self.pc as Word, addr)?;
                    self.pc = target;
                }
            }
            Opcode::Ret => {
                self.pc = self.pop_word(addr)? as u32;
            }
            Opcode::Push => {
                let value = self.operand_value(&instr, addr)?;
                self.push_word(value, addr)?;
            }
            Opcode::Pop => {
                let dest = self.data_address(&instr, addr)?;
                self.data[dest] = self.pop_word(addr)?;
            }
            Opcode::Halt => {
                tracing::debug!(addr, "halted");
                reporter.warning(&Warning::new(WarningKind::HaltReached, addr));
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Evaluate `cond` against the current condition code.
    ///
    /// Any condition but `Nc` faults while the condition code is undefined.
    pub fn check_condition(&self, cond: Condition, addr: u32) -> Result<bool, Fault> {
        use ConditionCode::{Negative, Positive, Undefined, Zero};

        if cond != Condition::Nc && self.cc == Undefined {
            return Err(Fault::new(FaultKind::IllegalCondition, addr));
        }

        Ok(match cond {
            Condition::Nc => true,
            Condition::Eq => self.cc == Zero,
            Condition::Ne => self.cc != Zero,
            Condition::Gt => self.cc == Positive,
            Condition::Ge => matches!(self.cc, Zero | Positive),
            Condition::Lt => self.cc == Negative,
            Condition::Le => matches!(self.cc, Zero | Negative),
        })
    }

    fn update_cc(&mut self, reg: usize) {
        self.cc = ConditionCode::from_result(self.registers[reg]);
    }

    fn register_index(&self, index: u8, addr: u32) -> Result<usize, Fault> {
        let index = index as usize;
        if index < NREGISTERS {
            Ok(index)
        } else {
            Err(Fault::new(FaultKind::IllegalInstruction, addr))
        }
    }

    /// Address designated by an indexed or absolute operand.
    ///
    /// Immediate operands have no address.
    fn effective_address(&self, instr: &Instruction, addr: u32) -> Result<i64, Fault> {
        match instr.operand {
            Operand::Immediate(_) => Err(Fault::new(FaultKind::ImmediateForbidden, addr)),
            Operand::Indexed { rindex, offset } => {
                let base = self.registers[self.register_index(rindex, addr)?];
                Ok(base as i64 + offset as i64)
            }
            Operand::Absolute(address) => Ok(address as i64),
        }
    }

    fn data_address(&self, instr: &Instruction, addr: u32) -> Result<usize, Fault> {
        let ea = self.effective_address(instr, addr)?;
        usize::try_from(ea)
            .ok()
            .filter(|&i| i < self.data.len())
            .ok_or(Fault::new(FaultKind::SegFaultData, addr))
    }

    fn text_address(&self, instr: &Instruction, addr: u32) -> Result<u32, Fault> {
        let ea = self.effective_address(instr, addr)?;
        u32::try_from(ea)
            .ok()
            .filter(|&i| (i as usize) < self.text.len())
            .ok_or(Fault::new(FaultKind::SegFaultText, addr))
    }

    fn operand_value(&self, instr: &Instruction, addr: u32) -> Result<Word, Fault> {
        match instr.operand {
            Operand::Immediate(value) => Ok(value),
            _ => Ok(self.data[self.data_address(instr, addr)?]),
        }
    }

    /// Target of a BRANCH or CALL if its condition holds, `None` to fall through.
    fn jump_target(&self, instr: &Instruction, addr: u32) -> Result<Option<u32>, Fault> {
        let target = self.text_address(instr, addr)?;
        let cond = instr
            .condition()
            .map_err(|_| Fault::new(FaultKind::IllegalCondition, addr))?;
        Ok(self.check_condition(cond, addr)?.then_some(target))
    }

    fn push_word(&mut self, value: Word, addr: u32) -> Result<(), Fault> {
        let slot = self.sp as usize;
        if slot >= self.data.len() {
            return Err(Fault::new(FaultKind::SegFaultStack, addr));
        }
        self.data[slot] = value;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    fn pop_word(&mut self, addr: u32) -> Result<Word, Fault> {
        let top = self.sp.wrapping_add(1);
        let value = *self
            .data
            .get(top as usize)
            .ok_or(Fault::new(FaultKind::SegFaultStack, addr))?;
        self.sp = top;
        Ok(value)
    }
}
