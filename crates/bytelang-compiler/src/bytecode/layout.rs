use super::CompiledProgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    StartAddress,
    /// Index into `ProgramData::variables`.
    Variable(usize),
    /// Index into `CompiledProgram::instructions`.
    Instruction(usize),
}

/// A contiguous byte range of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub address: usize,
    pub size: usize,
    pub kind: RegionKind,
}

impl Region {
    pub fn end(&self) -> usize {
        self.address + self.size
    }
}

/// Regions in address order. They tile `[0, size)` without gaps.
pub fn layout(compiled: &CompiledProgram) -> Vec<Region> {
    let program = &compiled.program;
    let mut regions = Vec::with_capacity(1 + program.variables.len() + compiled.instructions.len());

    regions.push(Region {
        address: 0,
        size: program.heap_pointer().size,
        kind: RegionKind::StartAddress,
    });
    for (i, variable) in program.variables.iter().enumerate() {
        regions.push(Region {
            address: variable.address,
            size: variable.primitive.size,
            kind: RegionKind::Variable(i),
        });
    }
    for (i, instruction) in compiled.instructions.iter().enumerate() {
        regions.push(Region {
            address: instruction.address,
            size: instruction.size(),
            kind: RegionKind::Instruction(i),
        });
    }
    regions
}
