#![no_main]

use cilscan::disassembler::{decode_stream_with, DecoderConfig, InstructionDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut end = 0;
    for instruction in InstructionDecoder::new(data) {
        let Ok(instruction) = instruction else {
            break;
        };
        assert_eq!(instruction.offset, end);
        assert_eq!(instruction.bytes.len(), instruction.size);
        let _ = instruction.operand();
        end = instruction.next_offset();
    }
    assert!(end <= data.len());

    let _ = decode_stream_with(data, &DecoderConfig::strict());
});
