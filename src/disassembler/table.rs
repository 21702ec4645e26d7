//! The opcode length table.
//!
//! Every flat opcode id (see [`crate::disassembler::Opcode`]) maps to one
//! [`OpcodeLength`]: the total encoded size of the instruction, the marker for the one
//! variable-length instruction (`switch`), or the marker for an unassigned slot.
//!
//! The table is a `static` array indexed by id, so it is built at compile time, never
//! mutated, and readable from any number of threads without synchronization.
//!
//! # Contents
//!
//! - Primary ids `0x000..=0x0FF`: fixed lengths 1, 2, 5 and 9 (opcode byte plus 0, 1, 4 or 8
//!   operand bytes). `switch` (`0x045`) is [`OpcodeLength::Variable`]. The escape byte `0x0FE`
//!   is [`OpcodeLength::Invalid`], as it never stands for an instruction on its own.
//! - Extended ids `0x100..=0x11E`: fixed lengths 2, 3, 4 and 6 (escape pair plus 0, 1, 2 or
//!   4 operand bytes).
//!
//! The assigned/reserved partition has to match the runtime bit for bit. A single wrong entry
//! desynchronizes every instruction that follows it in a method body, so the entries below are
//! listed one per id and must not be derived from opcode ranges.

use super::Opcode;

/// Number of ids covered by the table (`0x000..=0x11E`).
pub const OPCODE_COUNT: usize = 0x11F;

/// The encoded size class of one opcode id.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum OpcodeLength {
    /// Total instruction length in bytes, including the opcode itself.
    Fixed(u8),
    /// `switch`: `1 + 4 + 4 * N` bytes, where `N` is the u32 following the opcode.
    Variable,
    /// Unassigned slot.
    Invalid,
}

impl OpcodeLength {
    /// Returns the fixed length, if this entry has one.
    #[must_use]
    pub fn fixed(self) -> Option<usize> {
        match self {
            OpcodeLength::Fixed(len) => Some(usize::from(len)),
            OpcodeLength::Variable | OpcodeLength::Invalid => None,
        }
    }
}

const F1: OpcodeLength = OpcodeLength::Fixed(1);
const F2: OpcodeLength = OpcodeLength::Fixed(2);
const F3: OpcodeLength = OpcodeLength::Fixed(3);
const F4: OpcodeLength = OpcodeLength::Fixed(4);
const F5: OpcodeLength = OpcodeLength::Fixed(5);
const F6: OpcodeLength = OpcodeLength::Fixed(6);
const F9: OpcodeLength = OpcodeLength::Fixed(9);
const V: OpcodeLength = OpcodeLength::Variable;
const I: OpcodeLength = OpcodeLength::Invalid;

#[rustfmt::skip]
static OPCODE_LENGTHS: [OpcodeLength; OPCODE_COUNT] = [
    F1, // 0x000 nop
    F1, // 0x001 break
    F1, // 0x002 ldarg.0
    F1, // 0x003 ldarg.1
    F1, // 0x004 ldarg.2
    F1, // 0x005 ldarg.3
    F1, // 0x006 ldloc.0
    F1, // 0x007 ldloc.1
    F1, // 0x008 ldloc.2
    F1, // 0x009 ldloc.3
    F1, // 0x00A stloc.0
    F1, // 0x00B stloc.1
    F1, // 0x00C stloc.2
    F1, // 0x00D stloc.3
    F2, // 0x00E ldarg.s
    F2, // 0x00F ldarga.s
    F2, // 0x010 starg.s
    F2, // 0x011 ldloc.s
    F2, // 0x012 ldloca.s
    F2, // 0x013 stloc.s
    F1, // 0x014 ldnull
    F1, // 0x015 ldc.i4.m1
    F1, // 0x016 ldc.i4.0
    F1, // 0x017 ldc.i4.1
    F1, // 0x018 ldc.i4.2
    F1, // 0x019 ldc.i4.3
    F1, // 0x01A ldc.i4.4
    F1, // 0x01B ldc.i4.5
    F1, // 0x01C ldc.i4.6
    F1, // 0x01D ldc.i4.7
    F1, // 0x01E ldc.i4.8
    F2, // 0x01F ldc.i4.s
    F5, // 0x020 ldc.i4
    F9, // 0x021 ldc.i8
    F5, // 0x022 ldc.r4
    F9, // 0x023 ldc.r8
    I,  // 0x024
    F1, // 0x025 dup
    F1, // 0x026 pop
    F5, // 0x027 jmp
    F5, // 0x028 call
    F5, // 0x029 calli
    F1, // 0x02A ret
    F2, // 0x02B br.s
    F2, // 0x02C brfalse.s
    F2, // 0x02D brtrue.s
    F2, // 0x02E beq.s
    F2, // 0x02F bge.s
    F2, // 0x030 bgt.s
    F2, // 0x031 ble.s
    F2, // 0x032 blt.s
    F2, // 0x033 bne.un.s
    F2, // 0x034 bge.un.s
    F2, // 0x035 bgt.un.s
    F2, // 0x036 ble.un.s
    F2, // 0x037 blt.un.s
    F5, // 0x038 br
    F5, // 0x039 brfalse
    F5, // 0x03A brtrue
    F5, // 0x03B beq
    F5, // 0x03C bge
    F5, // 0x03D bgt
    F5, // 0x03E ble
    F5, // 0x03F blt
    F5, // 0x040 bne.un
    F5, // 0x041 bge.un
    F5, // 0x042 bgt.un
    F5, // 0x043 ble.un
    F5, // 0x044 blt.un
    V,  // 0x045 switch
    F1, // 0x046 ldind.i1
    F1, // 0x047 ldind.u1
    F1, // 0x048 ldind.i2
    F1, // 0x049 ldind.u2
    F1, // 0x04A ldind.i4
    F1, // 0x04B ldind.u4
    F1, // 0x04C ldind.i8
    F1, // 0x04D ldind.i
    F1, // 0x04E ldind.r4
    F1, // 0x04F ldind.r8
    F1, // 0x050 ldind.ref
    F1, // 0x051 stind.ref
    F1, // 0x052 stind.i1
    F1, // 0x053 stind.i2
    F1, // 0x054 stind.i4
    F1, // 0x055 stind.i8
    F1, // 0x056 stind.r4
    F1, // 0x057 stind.r8
    F1, // 0x058 add
    F1, // 0x059 sub
    F1, // 0x05A mul
    F1, // 0x05B div
    F1, // 0x05C div.un
    F1, // 0x05D rem
    F1, // 0x05E rem.un
    F1, // 0x05F and
    F1, // 0x060 or
    F1, // 0x061 xor
    F1, // 0x062 shl
    F1, // 0x063 shr
    F1, // 0x064 shr.un
    F1, // 0x065 neg
    F1, // 0x066 not
    F1, // 0x067 conv.i1
    F1, // 0x068 conv.i2
    F1, // 0x069 conv.i4
    F1, // 0x06A conv.i8
    F1, // 0x06B conv.r4
    F1, // 0x06C conv.r8
    F1, // 0x06D conv.u4
    F1, // 0x06E conv.u8
    F5, // 0x06F callvirt
    F5, // 0x070 cpobj
    F5, // 0x071 ldobj
    F5, // 0x072 ldstr
    F5, // 0x073 newobj
    F5, // 0x074 castclass
    F5, // 0x075 isinst
    F1, // 0x076 conv.r.un
    I,  // 0x077
    I,  // 0x078
    F5, // 0x079 unbox
    F1, // 0x07A throw
    F5, // 0x07B ldfld
    F5, // 0x07C ldflda
    F5, // 0x07D stfld
    F5, // 0x07E ldsfld
    F5, // 0x07F ldsflda
    F5, // 0x080 stsfld
    F5, // 0x081 stobj
    F1, // 0x082 conv.ovf.i1.un
    F1, // 0x083 conv.ovf.i2.un
    F1, // 0x084 conv.ovf.i4.un
    F1, // 0x085 conv.ovf.i8.un
    F1, // 0x086 conv.ovf.u1.un
    F1, // 0x087 conv.ovf.u2.un
    F1, // 0x088 conv.ovf.u4.un
    F1, // 0x089 conv.ovf.u8.un
    F1, // 0x08A conv.ovf.i.un
    F1, // 0x08B conv.ovf.u.un
    F5, // 0x08C box
    F5, // 0x08D newarr
    F1, // 0x08E ldlen
    F5, // 0x08F ldelema
    F1, // 0x090 ldelem.i1
    F1, // 0x091 ldelem.u1
    F1, // 0x092 ldelem.i2
    F1, // 0x093 ldelem.u2
    F1, // 0x094 ldelem.i4
    F1, // 0x095 ldelem.u4
    F1, // 0x096 ldelem.i8
    F1, // 0x097 ldelem.i
    F1, // 0x098 ldelem.r4
    F1, // 0x099 ldelem.r8
    F1, // 0x09A ldelem.ref
    F1, // 0x09B stelem.i
    F1, // 0x09C stelem.i1
    F1, // 0x09D stelem.i2
    F1, // 0x09E stelem.i4
    F1, // 0x09F stelem.i8
    F1, // 0x0A0 stelem.r4
    F1, // 0x0A1 stelem.r8
    F1, // 0x0A2 stelem.ref
    F5, // 0x0A3 ldelem
    F5, // 0x0A4 stelem
    F5, // 0x0A5 unbox.any
    I,  // 0x0A6
    I,  // 0x0A7
    I,  // 0x0A8
    I,  // 0x0A9
    I,  // 0x0AA
    I,  // 0x0AB
    I,  // 0x0AC
    I,  // 0x0AD
    I,  // 0x0AE
    I,  // 0x0AF
    I,  // 0x0B0
    I,  // 0x0B1
    I,  // 0x0B2
    F1, // 0x0B3 conv.ovf.i1
    F1, // 0x0B4 conv.ovf.u1
    F1, // 0x0B5 conv.ovf.i2
    F1, // 0x0B6 conv.ovf.u2
    F1, // 0x0B7 conv.ovf.i4
    F1, // 0x0B8 conv.ovf.u4
    F1, // 0x0B9 conv.ovf.i8
    F1, // 0x0BA conv.ovf.u8
    I,  // 0x0BB
    I,  // 0x0BC
    I,  // 0x0BD
    I,  // 0x0BE
    I,  // 0x0BF
    I,  // 0x0C0
    I,  // 0x0C1
    F5, // 0x0C2 refanyval
    F1, // 0x0C3 ckfinite
    I,  // 0x0C4
    I,  // 0x0C5
    F5, // 0x0C6 mkrefany
    I,  // 0x0C7
    I,  // 0x0C8
    I,  // 0x0C9
    I,  // 0x0CA
    I,  // 0x0CB
    I,  // 0x0CC
    I,  // 0x0CD
    I,  // 0x0CE
    I,  // 0x0CF
    F5, // 0x0D0 ldtoken
    F1, // 0x0D1 conv.u2
    F1, // 0x0D2 conv.u1
    F1, // 0x0D3 conv.i
    F1, // 0x0D4 conv.ovf.i
    F1, // 0x0D5 conv.ovf.u
    F1, // 0x0D6 add.ovf
    F1, // 0x0D7 add.ovf.un
    F1, // 0x0D8 mul.ovf
    F1, // 0x0D9 mul.ovf.un
    F1, // 0x0DA sub.ovf
    F1, // 0x0DB sub.ovf.un
    F1, // 0x0DC endfinally
    F5, // 0x0DD leave
    F2, // 0x0DE leave.s
    F1, // 0x0DF stind.i
    F1, // 0x0E0 conv.u
    I,  // 0x0E1
    I,  // 0x0E2
    I,  // 0x0E3
    I,  // 0x0E4
    I,  // 0x0E5
    I,  // 0x0E6
    I,  // 0x0E7
    I,  // 0x0E8
    I,  // 0x0E9
    I,  // 0x0EA
    I,  // 0x0EB
    I,  // 0x0EC
    I,  // 0x0ED
    I,  // 0x0EE
    I,  // 0x0EF
    I,  // 0x0F0
    I,  // 0x0F1
    I,  // 0x0F2
    I,  // 0x0F3
    I,  // 0x0F4
    I,  // 0x0F5
    I,  // 0x0F6
    I,  // 0x0F7
    I,  // 0x0F8
    I,  // 0x0F9
    I,  // 0x0FA
    I,  // 0x0FB
    I,  // 0x0FC
    I,  // 0x0FD
    I,  // 0x0FE (escape byte)
    I,  // 0x0FF
    F2, // 0x100 arglist
    F2, // 0x101 ceq
    F2, // 0x102 cgt
    F2, // 0x103 cgt.un
    F2, // 0x104 clt
    F2, // 0x105 clt.un
    F6, // 0x106 ldftn
    F6, // 0x107 ldvirtftn
    I,  // 0x108
    F4, // 0x109 ldarg
    F4, // 0x10A ldarga
    F4, // 0x10B starg
    F4, // 0x10C ldloc
    F4, // 0x10D ldloca
    F4, // 0x10E stloc
    F2, // 0x10F localloc
    I,  // 0x110
    F2, // 0x111 endfilter
    F3, // 0x112 unaligned.
    F2, // 0x113 volatile.
    F2, // 0x114 tail.
    F6, // 0x115 initobj
    F6, // 0x116 constrained.
    F2, // 0x117 cpblk
    F2, // 0x118 initblk
    F3, // 0x119 no.
    F2, // 0x11A rethrow
    I,  // 0x11B
    F6, // 0x11C sizeof
    F2, // 0x11D refanytype
    F2, // 0x11E readonly.
];

/// Returns the table entry for any integer id.
///
/// Ids outside the table yield [`OpcodeLength::Invalid`].
#[must_use]
pub fn entry(id: u32) -> OpcodeLength {
    usize::try_from(id)
        .ok()
        .and_then(|index| OPCODE_LENGTHS.get(index))
        .copied()
        .unwrap_or(OpcodeLength::Invalid)
}

/// Returns `true` if `id` denotes an assigned instruction.
///
/// Safe to call with any value; ids outside the table are invalid.
#[must_use]
pub fn is_valid(id: u32) -> bool {
    entry(id) != OpcodeLength::Invalid
}

/// Returns the total encoded length of `opcode`: header plus operand bytes, excluding the
/// target table of `switch`.
///
/// # Panics
///
/// Panics if `opcode` is out of range, unassigned, or `switch`. Those ids have no fixed
/// length, so asking for one is a bug in the caller; malformed input has to be rejected
/// with [`is_valid`] or [`entry`] before this is reached.
#[must_use]
pub fn length_of(opcode: Opcode) -> usize {
    match entry(u32::from(opcode.id())) {
        OpcodeLength::Fixed(len) => usize::from(len),
        OpcodeLength::Variable => {
            panic!("length_of called on variable-length opcode {opcode}")
        }
        OpcodeLength::Invalid => panic!("length_of called on invalid opcode {opcode}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY_INVALID: &[u32] = &[
        0x24, 0x77, 0x78, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF, 0xB0, 0xB1,
        0xB2, 0xBB, 0xBC, 0xBD, 0xBE, 0xBF, 0xC0, 0xC1, 0xC4, 0xC5, 0xC7, 0xC8, 0xC9, 0xCA, 0xCB,
        0xCC, 0xCD, 0xCE, 0xCF, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xEB,
        0xEC, 0xED, 0xEE, 0xEF, 0xF0, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA,
        0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
    ];

    const EXTENDED_INVALID: &[u32] = &[0x108, 0x110, 0x11B];

    #[test]
    fn validity_partition() {
        for id in 0..(OPCODE_COUNT as u32 + 0x200) {
            let reserved = PRIMARY_INVALID.contains(&id)
                || EXTENDED_INVALID.contains(&id)
                || id >= OPCODE_COUNT as u32;
            assert_eq!(is_valid(id), !reserved, "id 0x{:03X}", id);
        }
        assert!(!is_valid(u32::MAX));
    }

    #[test]
    fn assigned_counts() {
        let primary = (0..0x100).filter(|id| is_valid(*id)).count();
        let extended = (0x100..OPCODE_COUNT as u32).filter(|id| is_valid(*id)).count();
        assert_eq!(primary, 256 - PRIMARY_INVALID.len());
        assert_eq!(primary, 191);
        assert_eq!(extended, 28);
    }

    #[test]
    fn primary_lengths() {
        for id in 0..0x100u16 {
            match entry(u32::from(id)) {
                OpcodeLength::Fixed(len) => assert!(
                    [1, 2, 5, 9].contains(&len),
                    "id 0x{:03X} has length {}",
                    id,
                    len
                ),
                OpcodeLength::Variable => assert_eq!(id, 0x45),
                OpcodeLength::Invalid => {}
            }
        }
    }

    #[test]
    fn extended_lengths() {
        for id in 0x100..OPCODE_COUNT as u16 {
            if let OpcodeLength::Fixed(len) = entry(u32::from(id)) {
                assert!([2, 3, 4, 6].contains(&len), "id 0x{:03X}", id);
            }
            assert_ne!(entry(u32::from(id)), OpcodeLength::Variable);
        }
    }

    #[test]
    fn exactly_one_variable_entry() {
        let variable: Vec<usize> = OPCODE_LENGTHS
            .iter()
            .enumerate()
            .filter(|(_, entry)| **entry == OpcodeLength::Variable)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(variable, vec![0x45]);
    }

    #[test]
    fn known_lengths() {
        assert_eq!(length_of(Opcode::primary(0x00)), 1); // nop
        assert_eq!(length_of(Opcode::primary(0x1F)), 2); // ldc.i4.s
        assert_eq!(length_of(Opcode::primary(0x20)), 5); // ldc.i4
        assert_eq!(length_of(Opcode::primary(0x21)), 9); // ldc.i8
        assert_eq!(length_of(Opcode::primary(0x23)), 9); // ldc.r8
        assert_eq!(length_of(Opcode::primary(0x28)), 5); // call
        assert_eq!(length_of(Opcode::primary(0xDE)), 2); // leave.s
        assert_eq!(length_of(Opcode::extended(0x01)), 2); // ceq
        assert_eq!(length_of(Opcode::extended(0x06)), 6); // ldftn
        assert_eq!(length_of(Opcode::extended(0x0C)), 4); // ldloc
        assert_eq!(length_of(Opcode::extended(0x12)), 3); // unaligned.
        assert_eq!(length_of(Opcode::extended(0x19)), 3); // no.
        assert_eq!(length_of(Opcode::extended(0x1C)), 6); // sizeof
    }

    #[test]
    #[should_panic(expected = "variable-length")]
    fn length_of_switch_panics() {
        let _ = length_of(Opcode::primary(0x45));
    }

    #[test]
    #[should_panic(expected = "invalid opcode")]
    fn length_of_reserved_panics() {
        let _ = length_of(Opcode::primary(0x24));
    }

    #[test]
    #[should_panic(expected = "invalid opcode")]
    fn length_of_out_of_range_panics() {
        let _ = length_of(Opcode::new(0x11F));
    }

    #[test]
    fn fixed_accessor() {
        assert_eq!(OpcodeLength::Fixed(5).fixed(), Some(5));
        assert_eq!(OpcodeLength::Variable.fixed(), None);
        assert_eq!(OpcodeLength::Invalid.fixed(), None);
    }
}
