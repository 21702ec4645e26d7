//! Named ids for every assigned CIL opcode (ECMA-335 Partition III).
//!
//! Single-byte opcodes are built with [`Opcode::primary`], escape-prefixed ones with
//! [`Opcode::extended`] from their second byte, so `CEQ` is the id `0x101` that `FE 01`
//! normalizes to. Prefix instructions drop their trailing dot (`tail.` is [`TAIL`]).
#![allow(missing_docs)]

use super::Opcode;

// Misc
pub const NOP: Opcode = Opcode::primary(0x00);
pub const BREAK: Opcode = Opcode::primary(0x01);

// Argument and local shorthand
pub const LDARG_0: Opcode = Opcode::primary(0x02);
pub const LDARG_1: Opcode = Opcode::primary(0x03);
pub const LDARG_2: Opcode = Opcode::primary(0x04);
pub const LDARG_3: Opcode = Opcode::primary(0x05);
pub const LDLOC_0: Opcode = Opcode::primary(0x06);
pub const LDLOC_1: Opcode = Opcode::primary(0x07);
pub const LDLOC_2: Opcode = Opcode::primary(0x08);
pub const LDLOC_3: Opcode = Opcode::primary(0x09);
pub const STLOC_0: Opcode = Opcode::primary(0x0A);
pub const STLOC_1: Opcode = Opcode::primary(0x0B);
pub const STLOC_2: Opcode = Opcode::primary(0x0C);
pub const STLOC_3: Opcode = Opcode::primary(0x0D);

// Argument and local access (short form)
pub const LDARG_S: Opcode = Opcode::primary(0x0E);
pub const LDARGA_S: Opcode = Opcode::primary(0x0F);
pub const STARG_S: Opcode = Opcode::primary(0x10);
pub const LDLOC_S: Opcode = Opcode::primary(0x11);
pub const LDLOCA_S: Opcode = Opcode::primary(0x12);
pub const STLOC_S: Opcode = Opcode::primary(0x13);

// Constants
pub const LDNULL: Opcode = Opcode::primary(0x14);
pub const LDC_I4_M1: Opcode = Opcode::primary(0x15);
pub const LDC_I4_0: Opcode = Opcode::primary(0x16);
pub const LDC_I4_1: Opcode = Opcode::primary(0x17);
pub const LDC_I4_2: Opcode = Opcode::primary(0x18);
pub const LDC_I4_3: Opcode = Opcode::primary(0x19);
pub const LDC_I4_4: Opcode = Opcode::primary(0x1A);
pub const LDC_I4_5: Opcode = Opcode::primary(0x1B);
pub const LDC_I4_6: Opcode = Opcode::primary(0x1C);
pub const LDC_I4_7: Opcode = Opcode::primary(0x1D);
pub const LDC_I4_8: Opcode = Opcode::primary(0x1E);
pub const LDC_I4_S: Opcode = Opcode::primary(0x1F);
pub const LDC_I4: Opcode = Opcode::primary(0x20);
pub const LDC_I8: Opcode = Opcode::primary(0x21);
pub const LDC_R4: Opcode = Opcode::primary(0x22);
pub const LDC_R8: Opcode = Opcode::primary(0x23);

// Stack manipulation
pub const DUP: Opcode = Opcode::primary(0x25);
pub const POP: Opcode = Opcode::primary(0x26);

// Calls and return
pub const JMP: Opcode = Opcode::primary(0x27);
pub const CALL: Opcode = Opcode::primary(0x28);
pub const CALLI: Opcode = Opcode::primary(0x29);
pub const RET: Opcode = Opcode::primary(0x2A);

// Branches (short form)
pub const BR_S: Opcode = Opcode::primary(0x2B);
pub const BRFALSE_S: Opcode = Opcode::primary(0x2C);
pub const BRTRUE_S: Opcode = Opcode::primary(0x2D);
pub const BEQ_S: Opcode = Opcode::primary(0x2E);
pub const BGE_S: Opcode = Opcode::primary(0x2F);
pub const BGT_S: Opcode = Opcode::primary(0x30);
pub const BLE_S: Opcode = Opcode::primary(0x31);
pub const BLT_S: Opcode = Opcode::primary(0x32);
pub const BNE_UN_S: Opcode = Opcode::primary(0x33);
pub const BGE_UN_S: Opcode = Opcode::primary(0x34);
pub const BGT_UN_S: Opcode = Opcode::primary(0x35);
pub const BLE_UN_S: Opcode = Opcode::primary(0x36);
pub const BLT_UN_S: Opcode = Opcode::primary(0x37);

// Branches (long form)
pub const BR: Opcode = Opcode::primary(0x38);
pub const BRFALSE: Opcode = Opcode::primary(0x39);
pub const BRTRUE: Opcode = Opcode::primary(0x3A);
pub const BEQ: Opcode = Opcode::primary(0x3B);
pub const BGE: Opcode = Opcode::primary(0x3C);
pub const BGT: Opcode = Opcode::primary(0x3D);
pub const BLE: Opcode = Opcode::primary(0x3E);
pub const BLT: Opcode = Opcode::primary(0x3F);
pub const BNE_UN: Opcode = Opcode::primary(0x40);
pub const BGE_UN: Opcode = Opcode::primary(0x41);
pub const BGT_UN: Opcode = Opcode::primary(0x42);
pub const BLE_UN: Opcode = Opcode::primary(0x43);
pub const BLT_UN: Opcode = Opcode::primary(0x44);

// Switch
pub const SWITCH: Opcode = Opcode::primary(0x45);

// Indirect load and store
pub const LDIND_I1: Opcode = Opcode::primary(0x46);
pub const LDIND_U1: Opcode = Opcode::primary(0x47);
pub const LDIND_I2: Opcode = Opcode::primary(0x48);
pub const LDIND_U2: Opcode = Opcode::primary(0x49);
pub const LDIND_I4: Opcode = Opcode::primary(0x4A);
pub const LDIND_U4: Opcode = Opcode::primary(0x4B);
pub const LDIND_I8: Opcode = Opcode::primary(0x4C);
pub const LDIND_I: Opcode = Opcode::primary(0x4D);
pub const LDIND_R4: Opcode = Opcode::primary(0x4E);
pub const LDIND_R8: Opcode = Opcode::primary(0x4F);
pub const LDIND_REF: Opcode = Opcode::primary(0x50);
pub const STIND_REF: Opcode = Opcode::primary(0x51);
pub const STIND_I1: Opcode = Opcode::primary(0x52);
pub const STIND_I2: Opcode = Opcode::primary(0x53);
pub const STIND_I4: Opcode = Opcode::primary(0x54);
pub const STIND_I8: Opcode = Opcode::primary(0x55);
pub const STIND_R4: Opcode = Opcode::primary(0x56);
pub const STIND_R8: Opcode = Opcode::primary(0x57);

// Arithmetic and bitwise
pub const ADD: Opcode = Opcode::primary(0x58);
pub const SUB: Opcode = Opcode::primary(0x59);
pub const MUL: Opcode = Opcode::primary(0x5A);
pub const DIV: Opcode = Opcode::primary(0x5B);
pub const DIV_UN: Opcode = Opcode::primary(0x5C);
pub const REM: Opcode = Opcode::primary(0x5D);
pub const REM_UN: Opcode = Opcode::primary(0x5E);
pub const AND: Opcode = Opcode::primary(0x5F);
pub const OR: Opcode = Opcode::primary(0x60);
pub const XOR: Opcode = Opcode::primary(0x61);
pub const SHL: Opcode = Opcode::primary(0x62);
pub const SHR: Opcode = Opcode::primary(0x63);
pub const SHR_UN: Opcode = Opcode::primary(0x64);
pub const NEG: Opcode = Opcode::primary(0x65);
pub const NOT: Opcode = Opcode::primary(0x66);

// Conversion
pub const CONV_I1: Opcode = Opcode::primary(0x67);
pub const CONV_I2: Opcode = Opcode::primary(0x68);
pub const CONV_I4: Opcode = Opcode::primary(0x69);
pub const CONV_I8: Opcode = Opcode::primary(0x6A);
pub const CONV_R4: Opcode = Opcode::primary(0x6B);
pub const CONV_R8: Opcode = Opcode::primary(0x6C);
pub const CONV_U4: Opcode = Opcode::primary(0x6D);
pub const CONV_U8: Opcode = Opcode::primary(0x6E);

// Object model
pub const CALLVIRT: Opcode = Opcode::primary(0x6F);
pub const CPOBJ: Opcode = Opcode::primary(0x70);
pub const LDOBJ: Opcode = Opcode::primary(0x71);
pub const LDSTR: Opcode = Opcode::primary(0x72);
pub const NEWOBJ: Opcode = Opcode::primary(0x73);
pub const CASTCLASS: Opcode = Opcode::primary(0x74);
pub const ISINST: Opcode = Opcode::primary(0x75);
pub const CONV_R_UN: Opcode = Opcode::primary(0x76);
pub const UNBOX: Opcode = Opcode::primary(0x79);

// Exceptions
pub const THROW: Opcode = Opcode::primary(0x7A);

// Field access
pub const LDFLD: Opcode = Opcode::primary(0x7B);
pub const LDFLDA: Opcode = Opcode::primary(0x7C);
pub const STFLD: Opcode = Opcode::primary(0x7D);
pub const LDSFLD: Opcode = Opcode::primary(0x7E);
pub const LDSFLDA: Opcode = Opcode::primary(0x7F);
pub const STSFLD: Opcode = Opcode::primary(0x80);

// Object store
pub const STOBJ: Opcode = Opcode::primary(0x81);

// Overflow conversion (unsigned source)
pub const CONV_OVF_I1_UN: Opcode = Opcode::primary(0x82);
pub const CONV_OVF_I2_UN: Opcode = Opcode::primary(0x83);
pub const CONV_OVF_I4_UN: Opcode = Opcode::primary(0x84);
pub const CONV_OVF_I8_UN: Opcode = Opcode::primary(0x85);
pub const CONV_OVF_U1_UN: Opcode = Opcode::primary(0x86);
pub const CONV_OVF_U2_UN: Opcode = Opcode::primary(0x87);
pub const CONV_OVF_U4_UN: Opcode = Opcode::primary(0x88);
pub const CONV_OVF_U8_UN: Opcode = Opcode::primary(0x89);
pub const CONV_OVF_I_UN: Opcode = Opcode::primary(0x8A);
pub const CONV_OVF_U_UN: Opcode = Opcode::primary(0x8B);

// Boxing and arrays
pub const BOX: Opcode = Opcode::primary(0x8C);
pub const NEWARR: Opcode = Opcode::primary(0x8D);
pub const LDLEN: Opcode = Opcode::primary(0x8E);
pub const LDELEMA: Opcode = Opcode::primary(0x8F);

// Array elements
pub const LDELEM_I1: Opcode = Opcode::primary(0x90);
pub const LDELEM_U1: Opcode = Opcode::primary(0x91);
pub const LDELEM_I2: Opcode = Opcode::primary(0x92);
pub const LDELEM_U2: Opcode = Opcode::primary(0x93);
pub const LDELEM_I4: Opcode = Opcode::primary(0x94);
pub const LDELEM_U4: Opcode = Opcode::primary(0x95);
pub const LDELEM_I8: Opcode = Opcode::primary(0x96);
pub const LDELEM_I: Opcode = Opcode::primary(0x97);
pub const LDELEM_R4: Opcode = Opcode::primary(0x98);
pub const LDELEM_R8: Opcode = Opcode::primary(0x99);
pub const LDELEM_REF: Opcode = Opcode::primary(0x9A);
pub const STELEM_I: Opcode = Opcode::primary(0x9B);
pub const STELEM_I1: Opcode = Opcode::primary(0x9C);
pub const STELEM_I2: Opcode = Opcode::primary(0x9D);
pub const STELEM_I4: Opcode = Opcode::primary(0x9E);
pub const STELEM_I8: Opcode = Opcode::primary(0x9F);
pub const STELEM_R4: Opcode = Opcode::primary(0xA0);
pub const STELEM_R8: Opcode = Opcode::primary(0xA1);
pub const STELEM_REF: Opcode = Opcode::primary(0xA2);
pub const LDELEM: Opcode = Opcode::primary(0xA3);
pub const STELEM: Opcode = Opcode::primary(0xA4);
pub const UNBOX_ANY: Opcode = Opcode::primary(0xA5);

// Overflow conversion (signed source)
pub const CONV_OVF_I1: Opcode = Opcode::primary(0xB3);
pub const CONV_OVF_U1: Opcode = Opcode::primary(0xB4);
pub const CONV_OVF_I2: Opcode = Opcode::primary(0xB5);
pub const CONV_OVF_U2: Opcode = Opcode::primary(0xB6);
pub const CONV_OVF_I4: Opcode = Opcode::primary(0xB7);
pub const CONV_OVF_U4: Opcode = Opcode::primary(0xB8);
pub const CONV_OVF_I8: Opcode = Opcode::primary(0xB9);
pub const CONV_OVF_U8: Opcode = Opcode::primary(0xBA);

// Typed references
pub const REFANYVAL: Opcode = Opcode::primary(0xC2);
pub const CKFINITE: Opcode = Opcode::primary(0xC3);
pub const MKREFANY: Opcode = Opcode::primary(0xC6);

// Tokens and conversion
pub const LDTOKEN: Opcode = Opcode::primary(0xD0);
pub const CONV_U2: Opcode = Opcode::primary(0xD1);
pub const CONV_U1: Opcode = Opcode::primary(0xD2);
pub const CONV_I: Opcode = Opcode::primary(0xD3);
pub const CONV_OVF_I: Opcode = Opcode::primary(0xD4);
pub const CONV_OVF_U: Opcode = Opcode::primary(0xD5);

// Overflow arithmetic
pub const ADD_OVF: Opcode = Opcode::primary(0xD6);
pub const ADD_OVF_UN: Opcode = Opcode::primary(0xD7);
pub const MUL_OVF: Opcode = Opcode::primary(0xD8);
pub const MUL_OVF_UN: Opcode = Opcode::primary(0xD9);
pub const SUB_OVF: Opcode = Opcode::primary(0xDA);
pub const SUB_OVF_UN: Opcode = Opcode::primary(0xDB);

// Exception handling
pub const ENDFINALLY: Opcode = Opcode::primary(0xDC);
pub const LEAVE: Opcode = Opcode::primary(0xDD);
pub const LEAVE_S: Opcode = Opcode::primary(0xDE);

// Native int store and conversion
pub const STIND_I: Opcode = Opcode::primary(0xDF);
pub const CONV_U: Opcode = Opcode::primary(0xE0);

// Escape-prefixed (0xFE XX) opcodes
pub const ARGLIST: Opcode = Opcode::extended(0x00);
pub const CEQ: Opcode = Opcode::extended(0x01);
pub const CGT: Opcode = Opcode::extended(0x02);
pub const CGT_UN: Opcode = Opcode::extended(0x03);
pub const CLT: Opcode = Opcode::extended(0x04);
pub const CLT_UN: Opcode = Opcode::extended(0x05);
pub const LDFTN: Opcode = Opcode::extended(0x06);
pub const LDVIRTFTN: Opcode = Opcode::extended(0x07);
pub const LDARG: Opcode = Opcode::extended(0x09);
pub const LDARGA: Opcode = Opcode::extended(0x0A);
pub const STARG: Opcode = Opcode::extended(0x0B);
pub const LDLOC: Opcode = Opcode::extended(0x0C);
pub const LDLOCA: Opcode = Opcode::extended(0x0D);
pub const STLOC: Opcode = Opcode::extended(0x0E);
pub const LOCALLOC: Opcode = Opcode::extended(0x0F);
pub const ENDFILTER: Opcode = Opcode::extended(0x11);
pub const UNALIGNED: Opcode = Opcode::extended(0x12);
pub const VOLATILE: Opcode = Opcode::extended(0x13);
pub const TAIL: Opcode = Opcode::extended(0x14);
pub const INITOBJ: Opcode = Opcode::extended(0x15);
pub const CONSTRAINED: Opcode = Opcode::extended(0x16);
pub const CPBLK: Opcode = Opcode::extended(0x17);
pub const INITBLK: Opcode = Opcode::extended(0x18);
pub const NO: Opcode = Opcode::extended(0x19);
pub const RETHROW: Opcode = Opcode::extended(0x1A);
pub const SIZEOF: Opcode = Opcode::extended(0x1C);
pub const REFANYTYPE: Opcode = Opcode::extended(0x1D);
pub const READONLY: Opcode = Opcode::extended(0x1E);
